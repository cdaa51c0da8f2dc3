//! Contract list command and the helper that gathers contracts from CLI input.

use super::models::ContractsArgs;
use crate::contracts::{
    normalize_entries, parse_share_string, read_contract_list, to_share_string,
    write_contract_list, ContractEntry,
};
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Merge contracts from a CSV file, a share string and `--contract` flags
///
/// **Public** - file entries come first, then the share string, then flags.
/// Addresses are normalized.
pub fn collect_contracts(
    file: Option<&Path>,
    share: Option<&str>,
    flags: &[ContractEntry],
) -> Result<Vec<ContractEntry>> {
    let mut entries = Vec::new();

    if let Some(path) = file {
        let from_file = read_contract_list(path)
            .with_context(|| format!("Failed to read contract list {}", path.display()))?;
        entries.extend(from_file);
    }

    if let Some(share) = share {
        entries.extend(parse_share_string(share));
    }

    entries.extend(flags.iter().cloned());

    Ok(normalize_entries(entries))
}

/// Write the contract list as CSV and print its share string
///
/// **Public** - main entry point called from main.rs
pub fn execute_contracts(args: ContractsArgs) -> Result<String> {
    if args.contracts.is_empty() {
        anyhow::bail!("No contract data available for export");
    }

    if let Some(path) = &args.output {
        write_contract_list(&args.contracts, path).context("Failed to write contract list")?;
        info!("✓ Contract list written to: {}", path.display());
    }

    let share = to_share_string(&args.contracts);
    println!("{}", share);

    Ok(share)
}
