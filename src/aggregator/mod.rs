//! Aggregation of holder sets into overlap statistics.
//!
//! This module transforms per-contract holder sets into:
//! - Token-holding histogram and per-bucket holder sets
//! - Pairwise shared-holder links
//! - k-way (k >= 3) holder combinations

pub mod analysis;
pub mod combinations;
pub mod invariants;
pub mod schema;

// Re-export main types and functions
pub use analysis::{analyze, build_link_data, combinations_per_holder};
pub use combinations::{combination_key, combinations_of_size, split_combination_key, Combinations};
pub use invariants::check_invariants;
pub use schema::{AnalysisResults, ContractHolderMap, HolderCount, HolderSet, Link};
