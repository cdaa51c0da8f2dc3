use crate::aggregator::check_invariants;
use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Network: {}", report.network);
    println!("  Contracts: {}", report.contracts.len());
    println!("  Unique Holders: {}", report.results.total_holders());
    println!("  Links: {}", report.results.link_data.len());

    let issues = check_invariants(&report.results);
    if !issues.is_empty() {
        for issue in &issues {
            println!("  ✗ {}", issue);
        }
        anyhow::bail!("Report has {} inconsistencies", issues.len());
    }

    println!("✓ Results are consistent");
    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Holder Overlap Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string           - Schema version (e.g., '1.0.0')");
        println!("  network: string           - Lookup network");
        println!("  generated_at: string      - ISO 8601 timestamp");
        println!("  contracts: array          - Analyzed contracts, input order");
        println!("    address: string         - Contract address");
        println!("    tag: string             - Label");
        println!("    holder_count: number    - Holders of this contract");
        println!("    metadata: object?       - name/symbol/decimals/logo");
        println!("  results: object");
        println!("    token_holding_counts    - k -> holders of exactly k contracts");
        println!("    holders_by_token_count  - k -> holder addresses");
        println!("    holder_counts: array    - {{address, holders}} per contract");
        println!("    link_data: array        - {{source, target, value, addresses}}");
        println!("    token_combinations      - k (>= 3) -> key -> holder addresses");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Holder Overlap v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Holder-set overlap analysis across NFT contracts.");
}
