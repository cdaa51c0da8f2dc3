//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default timeout for lookup requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Alchemy network used when none is given
pub const DEFAULT_NETWORK: &str = "base-mainnet";

/// Environment variable holding the Alchemy API key
pub const API_KEY_ENV: &str = "ALCHEMY_API_KEY";

// Owner lists are paginated; popular collections need several pages
pub const DEFAULT_MAX_PAGES: usize = 10;
pub const MAX_PAGES_LIMIT: usize = 1000;

// Hex addresses never contain '-', so keys stay unambiguous
pub const COMBINATION_KEY_DELIMITER: &str = "-";

/// Smallest overlap recorded as a combination (pairs go to link data)
pub const MIN_COMBINATION_SIZE: usize = 3;

/// Length of a contract address without the 0x prefix
pub const ADDRESS_HEX_LEN: usize = 40;
