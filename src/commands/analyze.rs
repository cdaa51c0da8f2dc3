//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Fetches holder sets for every contract
//! 2. Fetches contract metadata (optional)
//! 3. Computes overlap statistics
//! 4. Writes the report

use super::models::AnalyzeArgs;
use crate::aggregator::{analyze, combinations_per_holder};
use crate::contracts::validate_address;
use crate::lookup::{fetch_all_holders, fetch_all_metadata, AlchemyClient, HolderSource};
use crate::output::{build_report, render_summary, write_report, HolderReport};
use crate::utils::config::MAX_PAGES_LIMIT;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Invalid arguments
/// * Lookup client construction failures
/// * File write errors
///
/// Lookup failures for single contracts are not errors; those contracts
/// are analyzed with an empty holder set.
pub fn execute_analyze(args: AnalyzeArgs) -> Result<HolderReport> {
    validate_args(&args)?;

    let client = match &args.api_url {
        Some(url) => AlchemyClient::with_base_url(&args.api_key, url),
        None => AlchemyClient::new(&args.api_key, &args.network),
    }
    .context("Failed to create lookup client")?
    .with_max_pages(args.max_pages);

    run_analysis(&client, &args)
}

/// Run the pipeline against any holder source
///
/// **Public** - lets tests and other callers supply their own lookup
pub fn run_analysis<S: HolderSource + ?Sized>(source: &S, args: &AnalyzeArgs) -> Result<HolderReport> {
    let start_time = Instant::now();

    info!("Starting analysis of {} contracts", args.contracts.len());

    info!("Step 1/4: Fetching holders...");
    let contract_holders = fetch_all_holders(source, &args.contracts);

    let empty = contract_holders
        .iter()
        .filter(|(_, holders)| holders.is_empty())
        .count();
    if empty > 0 {
        warn!("{} of {} contracts have no holders", empty, contract_holders.len());
    }

    let metadata = if args.fetch_metadata {
        info!("Step 2/4: Fetching contract metadata...");
        fetch_all_metadata(source, &args.contracts)
    } else {
        info!("Step 2/4: Skipping metadata (not requested)");
        Vec::new()
    };

    info!("Step 3/4: Computing holder overlaps...");
    debug!(
        "A holder of all {} contracts contributes {} combinations",
        contract_holders.len(),
        combinations_per_holder(contract_holders.len())
    );
    let results = analyze(&contract_holders);
    info!(
        "{} unique holders, {} links",
        results.total_holders(),
        results.link_data.len()
    );

    info!("Step 4/4: Writing report...");
    let report = build_report(&args.network, &args.contracts, metadata, results);

    write_report(&report, &args.output_json).context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.output_json.display());

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("HOLDER OVERLAP SUMMARY");
        println!("{}", "=".repeat(80));
        println!("{}", render_summary(&report, args.top_links));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.api_key.trim().is_empty() {
        anyhow::bail!("API key cannot be empty");
    }

    if let Some(url) = &args.api_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("API URL must start with http:// or https://");
        }
    } else if args.network.trim().is_empty() {
        anyhow::bail!("Network cannot be empty");
    }

    if args.contracts.is_empty() {
        anyhow::bail!("At least one contract address is required");
    }

    let mut seen = HashSet::new();
    for contract in &args.contracts {
        validate_address(&contract.address)
            .with_context(|| format!("Invalid contract entry '{}'", contract.label()))?;

        if !seen.insert(contract.address.as_str()) {
            anyhow::bail!("Duplicate contract address: {}", contract.address);
        }
    }

    if args.max_pages == 0 {
        anyhow::bail!("max_pages must be greater than 0");
    }

    if args.max_pages > MAX_PAGES_LIMIT {
        anyhow::bail!("max_pages is too large (max {})", MAX_PAGES_LIMIT);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::ContractEntry;

    const ADDR_A: &str = "0x1111111111111111111111111111111111111111";
    const ADDR_B: &str = "0x2222222222222222222222222222222222222222";

    fn valid_args() -> AnalyzeArgs {
        AnalyzeArgs {
            api_key: "key".to_string(),
            contracts: vec![ContractEntry::new(ADDR_A, "A"), ContractEntry::new(ADDR_B, "B")],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&valid_args()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_api_key() {
        let args = AnalyzeArgs {
            api_key: " ".to_string(),
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_invalid_url_scheme() {
        let args = AnalyzeArgs {
            api_url: Some("ftp://localhost:9000".to_string()),
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_no_contracts() {
        let args = AnalyzeArgs {
            contracts: Vec::new(),
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_duplicate_contract() {
        let args = AnalyzeArgs {
            contracts: vec![ContractEntry::new(ADDR_A, "A"), ContractEntry::new(ADDR_A, "again")],
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_bad_address() {
        let args = AnalyzeArgs {
            contracts: vec![ContractEntry::new("0x1234", "short")],
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_max_pages_bounds() {
        let args = AnalyzeArgs {
            max_pages: 0,
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());

        let args = AnalyzeArgs {
            max_pages: MAX_PAGES_LIMIT + 1,
            ..valid_args()
        };
        assert!(validate_args(&args).is_err());
    }
}
