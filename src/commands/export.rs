//! Export command implementation.

use super::models::ExportArgs;
use crate::output::{holder_list_to_string, read_report, select_holders, write_holder_list};
use anyhow::{Context, Result};
use log::info;

/// Export the holders matching a selection from a saved report
///
/// **Public** - main entry point called from main.rs
pub fn execute_export(args: ExportArgs) -> Result<usize> {
    let report = read_report(&args.report)
        .with_context(|| format!("Failed to read report {}", args.report.display()))?;

    info!("Selecting holders: {}", args.selection);

    let holders = select_holders(&report.results, &args.selection)
        .with_context(|| format!("Selection '{}' matched nothing", args.selection))?;

    match &args.output {
        Some(path) => {
            write_holder_list(&holders, path).context("Failed to write holder list")?;
            info!("✓ {} holders written to: {}", holders.len(), path.display());
        }
        None => print!("{}", holder_list_to_string(&holders)),
    }

    Ok(holders.len())
}
