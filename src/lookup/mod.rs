//! Holder lookup against the Alchemy NFT API.

pub mod client;
pub mod source;
pub mod types;

// Re-export main types
pub use client::{default_base_url, AlchemyClient};
pub use source::{fetch_all_holders, fetch_all_metadata, HolderSource};
pub use types::ContractMetadata;
