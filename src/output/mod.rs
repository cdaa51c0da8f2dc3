//! Output writers for reports and holder lists.
//!
//! This module handles writing data to disk in various formats:
//! - JSON reports
//! - Newline-delimited holder lists
//! - Text summaries

pub mod export;
pub mod json;
pub mod schema;
pub mod summary;

// Re-export main functions
pub use export::{holder_list_to_string, select_holders, write_holder_list, HolderSelection};
pub use json::{read_report, validate_path, write_report};
pub use schema::{build_report, ContractSummary, HolderReport};
pub use summary::render_summary;
