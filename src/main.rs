//! Holder Overlap CLI
//!
//! Fetches holder lists for a set of NFT contracts, computes how their
//! holders overlap, and exports selected holder subsets.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use holder_overlap::commands::{
    collect_contracts, display_schema, display_version, execute_analyze, execute_contracts,
    execute_export, validate_report_file, AnalyzeArgs, ContractsArgs, ExportArgs,
};
use holder_overlap::contracts::ContractEntry;
use holder_overlap::output::HolderSelection;
use holder_overlap::utils::config::{API_KEY_ENV, DEFAULT_MAX_PAGES, DEFAULT_NETWORK};

/// Holder Overlap - shared-holder analysis for NFT contracts
#[derive(Parser, Debug)]
#[command(name = "holder-overlap")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Where the contract list comes from
#[derive(Args, Debug)]
struct ContractInput {
    /// Contract as ADDRESS or ADDRESS,TAG (repeatable, first is the main contract)
    #[arg(short, long = "contract")]
    contracts: Vec<ContractEntry>,

    /// CSV file with an address,tag header
    #[arg(long)]
    contracts_file: Option<PathBuf>,

    /// Share string: ADDRESS,TAG;ADDRESS,TAG
    #[arg(long)]
    share: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch holders and analyze their overlap
    Analyze {
        #[command(flatten)]
        input: ContractInput,

        /// Alchemy API key
        #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
        api_key: String,

        /// Alchemy network
        #[arg(short, long, default_value = DEFAULT_NETWORK)]
        network: String,

        /// Base URL override for the lookup service
        #[arg(long)]
        api_url: Option<String>,

        /// Maximum owner pages fetched per contract
        #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
        max_pages: usize,

        /// Also fetch contract metadata
        #[arg(long)]
        metadata: bool,

        /// Output path for JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Number of links shown in the summary
        #[arg(long, default_value = "10")]
        top_links: usize,
    },

    /// Export holders from a report
    Export {
        /// Report JSON produced by analyze
        #[arg(short, long)]
        report: PathBuf,

        /// all | count:K | link:A,B | combo:A-B-C
        #[arg(short, long, default_value = "all")]
        select: HolderSelection,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Normalize a contract list, write it as CSV and print its share string
    Contracts {
        #[command(flatten)]
        input: ContractInput,

        /// Read the contract list from a report instead
        #[arg(long, conflicts_with_all = ["contracts", "contracts_file", "share"])]
        report: Option<PathBuf>,

        /// Output CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

impl ContractInput {
    fn resolve(&self) -> Result<Vec<ContractEntry>> {
        collect_contracts(
            self.contracts_file.as_deref(),
            self.share.as_deref(),
            &self.contracts,
        )
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            api_key,
            network,
            api_url,
            max_pages,
            metadata,
            output,
            summary,
            top_links,
        } => {
            let args = AnalyzeArgs {
                api_key,
                network,
                api_url,
                contracts: input.resolve()?,
                output_json: output,
                max_pages,
                fetch_metadata: metadata,
                print_summary: summary,
                top_links,
            };

            execute_analyze(args)?;
        }

        Commands::Export {
            report,
            select,
            output,
        } => {
            execute_export(ExportArgs {
                report,
                selection: select,
                output,
            })?;
        }

        Commands::Contracts {
            input,
            report,
            output,
        } => {
            let contracts = match report {
                Some(path) => holder_overlap::output::read_report(path)?.contract_entries(),
                None => input.resolve()?,
            };

            execute_contracts(ContractsArgs { contracts, output })?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
