//! Holder-list export for an explicit selection.
//!
//! The selection (all holders, a k-bucket, a link or a combination) is
//! always passed in; nothing here remembers what was selected last.

use super::json::{create_parent_dirs, validate_path};
use crate::aggregator::{combination_key, split_combination_key, AnalysisResults};
use crate::contracts::normalize_address;
use crate::utils::error::{ExportError, OutputError};
use log::info;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Which holders to export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HolderSelection {
    /// Union of all holder sets
    All,

    /// Holders of exactly k contracts
    TokenCount(usize),

    /// Holders shared by two contracts
    Link { source: String, target: String },

    /// Holders of every contract in a combination key
    Combination(String),
}

/// Parses `all`, `count:K`, `link:A,B` or `combo:A-B-C`
impl FromStr for HolderSelection {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(HolderSelection::All);
        }

        let (kind, value) = s
            .split_once(':')
            .ok_or_else(|| ExportError::InvalidSelection(s.to_string()))?;

        match kind.trim().to_ascii_lowercase().as_str() {
            "count" => value
                .trim()
                .parse()
                .map(HolderSelection::TokenCount)
                .map_err(|_| ExportError::InvalidSelection(s.to_string())),
            "link" => {
                let (source, target) = value
                    .split_once(',')
                    .ok_or_else(|| ExportError::InvalidSelection(s.to_string()))?;
                Ok(HolderSelection::Link {
                    source: normalize_address(source),
                    target: normalize_address(target),
                })
            }
            "combo" => {
                let parts: Vec<String> = split_combination_key(value.trim())
                    .into_iter()
                    .map(normalize_address)
                    .collect();
                if parts.is_empty() {
                    return Err(ExportError::InvalidSelection(s.to_string()));
                }
                Ok(HolderSelection::Combination(combination_key(&parts)))
            }
            _ => Err(ExportError::InvalidSelection(s.to_string())),
        }
    }
}

impl fmt::Display for HolderSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolderSelection::All => write!(f, "all"),
            HolderSelection::TokenCount(k) => write!(f, "count:{}", k),
            HolderSelection::Link { source, target } => write!(f, "link:{},{}", source, target),
            HolderSelection::Combination(key) => write!(f, "combo:{}", key),
        }
    }
}

/// Resolve a selection to a sorted list of holder addresses
///
/// # Errors
/// * `ExportError::Empty` - the selection matched no holders
pub fn select_holders(
    results: &AnalysisResults,
    selection: &HolderSelection,
) -> Result<Vec<String>, ExportError> {
    let holders: Vec<String> = match selection {
        HolderSelection::All => results.all_holders().into_iter().map(str::to_string).collect(),
        HolderSelection::TokenCount(k) => results
            .holders_by_token_count
            .get(k)
            .map(|holders| holders.iter().cloned().collect())
            .unwrap_or_default(),
        HolderSelection::Link { source, target } => results
            .link(source, target)
            .map(|link| link.addresses.clone())
            .unwrap_or_default(),
        HolderSelection::Combination(key) => results
            .combination(key)
            .map(|holders| holders.iter().cloned().collect())
            .unwrap_or_default(),
    };

    if holders.is_empty() {
        return Err(ExportError::Empty);
    }

    Ok(holders)
}

/// Newline-delimited address list
pub fn holder_list_to_string(holders: &[String]) -> String {
    holders.iter().map(|h| format!("{}\n", h)).collect()
}

/// Write a newline-delimited address list
pub fn write_holder_list(holders: &[String], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    validate_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(holder_list_to_string(holders).as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("Wrote {} holders to {}", holders.len(), output_path.display());
    Ok(())
}
