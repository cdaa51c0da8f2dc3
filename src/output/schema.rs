//! Report schema written by the `analyze` command.

use crate::aggregator::AnalysisResults;
use crate::contracts::ContractEntry;
use crate::lookup::ContractMetadata;
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Everything a run produced, as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderReport {
    /// Report schema version
    pub version: String,

    /// Lookup network the holders came from
    pub network: String,

    /// ISO 8601 timestamp
    pub generated_at: String,

    /// Analyzed contracts, in input order
    pub contracts: Vec<ContractSummary>,

    pub results: AnalysisResults,
}

/// Per-contract details shown next to the results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSummary {
    pub address: String,

    #[serde(default)]
    pub tag: String,

    pub holder_count: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ContractMetadata>,
}

/// Assemble a report from a finished analysis
///
/// `metadata` is matched to `contracts` by position; missing entries are
/// treated as `None`.
pub fn build_report(
    network: &str,
    contracts: &[ContractEntry],
    metadata: Vec<Option<ContractMetadata>>,
    results: AnalysisResults,
) -> HolderReport {
    let mut metadata = metadata.into_iter();

    let contracts = contracts
        .iter()
        .map(|entry| ContractSummary {
            address: entry.address.clone(),
            tag: entry.tag.clone(),
            holder_count: results.holder_count(&entry.address).unwrap_or(0),
            metadata: metadata.next().flatten(),
        })
        .collect();

    HolderReport {
        version: SCHEMA_VERSION.to_string(),
        network: network.to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        contracts,
        results,
    }
}

impl HolderReport {
    /// Tag of a contract, falling back to its address
    pub fn label<'a>(&'a self, address: &'a str) -> &'a str {
        self.contracts
            .iter()
            .find(|c| c.address == address && !c.tag.is_empty())
            .map(|c| c.tag.as_str())
            .unwrap_or(address)
    }

    /// The contract list this report was built from
    pub fn contract_entries(&self) -> Vec<ContractEntry> {
        self.contracts
            .iter()
            .map(|c| ContractEntry::new(c.address.clone(), c.tag.clone()))
            .collect()
    }
}
