use crate::contracts::ContractEntry;
use crate::output::HolderSelection;
use crate::utils::config::{DEFAULT_MAX_PAGES, DEFAULT_NETWORK};
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Alchemy API key
    pub api_key: String,

    /// Alchemy network name
    pub network: String,

    /// Base URL override (defaults to the network's Alchemy host)
    pub api_url: Option<String>,

    /// Contracts to analyze, first one is the main contract
    pub contracts: Vec<ContractEntry>,

    /// Output path for JSON report
    pub output_json: PathBuf,

    /// Maximum owner pages fetched per contract
    pub max_pages: usize,

    /// Also fetch contract metadata
    pub fetch_metadata: bool,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Number of links shown in the summary
    pub top_links: usize,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            network: DEFAULT_NETWORK.to_string(),
            api_url: None,
            contracts: Vec::new(),
            output_json: PathBuf::from("report.json"),
            max_pages: DEFAULT_MAX_PAGES,
            fetch_metadata: false,
            print_summary: false,
            top_links: 10,
        }
    }
}

/// Arguments for the export command
#[derive(Debug, Clone)]
pub struct ExportArgs {
    /// Report produced by analyze
    pub report: PathBuf,

    /// Holders to export
    pub selection: HolderSelection,

    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
}

/// Arguments for the contracts command
#[derive(Debug, Clone)]
pub struct ContractsArgs {
    /// Contracts gathered from flags, file and share string
    pub contracts: Vec<ContractEntry>,

    /// Output CSV path; only the share string is printed when absent
    pub output: Option<PathBuf>,
}
