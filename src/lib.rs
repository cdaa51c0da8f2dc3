//! Holder Overlap
//!
//! Holder-set overlap analysis across NFT contracts.
//!
//! Given the holders of N contracts, computes how many holders own exactly
//! k of them, which holders those are, the shared holders of every contract
//! pair, and every k-way (k >= 3) combination each holder belongs to.
//!
//! ## Getting Started
//!
//! ```bash
//! export ALCHEMY_API_KEY=...
//! holder-overlap analyze --contract 0x...,Main --contract 0x...,Other --summary
//! holder-overlap export --report report.json --select count:2 --output holders.txt
//! ```
//!
//! The aggregation itself is available without any network access:
//!
//! ```
//! use holder_overlap::aggregator::{analyze, ContractHolderMap, HolderSet};
//!
//! let mut map = ContractHolderMap::new();
//! map.insert("0xa", HolderSet::from(["h1".to_string(), "h2".to_string()]));
//! map.insert("0xb", HolderSet::from(["h2".to_string()]));
//!
//! let results = analyze(&map);
//! assert_eq!(results.token_holding_counts[&1], 1);
//! assert_eq!(results.token_holding_counts[&2], 1);
//! assert_eq!(results.link_data[0].addresses, vec!["h2"]);
//! ```

pub mod aggregator;
pub mod commands;
pub mod contracts;
pub mod lookup;
pub mod output;
pub mod utils;
