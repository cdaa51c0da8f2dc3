//! Holder lookup seam and the per-contract fetch loop.
//!
//! A failing contract never aborts the run: it is logged and analyzed as
//! an empty holder set.

use super::types::ContractMetadata;
use crate::aggregator::{ContractHolderMap, HolderSet};
use crate::contracts::ContractEntry;
use crate::utils::error::LookupError;
use log::{info, warn};

/// Anything that can resolve holders and metadata for a contract
pub trait HolderSource {
    fn holders_for(&self, contract: &str) -> Result<HolderSet, LookupError>;

    fn metadata_for(&self, contract: &str) -> Result<ContractMetadata, LookupError>;
}

/// Resolve holders for every contract, in order
///
/// **Public** - the result is complete before aggregation starts
pub fn fetch_all_holders<S: HolderSource + ?Sized>(
    source: &S,
    contracts: &[ContractEntry],
) -> ContractHolderMap {
    let mut map = ContractHolderMap::with_capacity(contracts.len());

    for (i, contract) in contracts.iter().enumerate() {
        info!(
            "Contract {}/{}: {} ({})",
            i + 1,
            contracts.len(),
            contract.label(),
            contract.address
        );

        let holders = source.holders_for(&contract.address).unwrap_or_else(|e| {
            warn!("Error fetching holders for contract {}: {}", contract.address, e);
            HolderSet::new()
        });

        map.insert(contract.address.clone(), holders);
    }

    map
}

/// Resolve metadata for every contract; failures become `None`
pub fn fetch_all_metadata<S: HolderSource + ?Sized>(
    source: &S,
    contracts: &[ContractEntry],
) -> Vec<Option<ContractMetadata>> {
    contracts
        .iter()
        .map(|contract| match source.metadata_for(&contract.address) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                warn!("Error fetching metadata for contract {}: {}", contract.address, e);
                None
            }
        })
        .collect()
}
