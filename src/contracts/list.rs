//! Parsing and writing of contract lists.

use crate::utils::config::ADDRESS_HEX_LEN;
use crate::utils::error::ContractListError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// One contract to analyze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEntry {
    pub address: String,

    /// Human-readable label; may be empty
    #[serde(default)]
    pub tag: String,
}

impl ContractEntry {
    pub fn new(address: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            tag: tag.into(),
        }
    }

    /// Tag if present, otherwise the address
    pub fn label(&self) -> &str {
        if self.tag.is_empty() {
            &self.address
        } else {
            &self.tag
        }
    }
}

/// Parses `address` or `address,tag`
impl FromStr for ContractEntry {
    type Err = ContractListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, tag) = match s.split_once(',') {
            Some((address, tag)) => (address.trim(), tag.trim()),
            None => (s.trim(), ""),
        };

        if address.is_empty() {
            return Err(ContractListError::InvalidAddress(s.to_string()));
        }

        Ok(ContractEntry::new(address, tag))
    }
}

/// Parse the share format `addr,tag;addr,tag`
///
/// Blank segments are skipped; a segment without a comma gets an empty tag.
pub fn parse_share_string(share: &str) -> Vec<ContractEntry> {
    share
        .split(';')
        .filter_map(|segment| segment.parse().ok())
        .collect()
}

/// Inverse of [`parse_share_string`]
pub fn to_share_string(entries: &[ContractEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{},{}", entry.address, entry.tag))
        .collect::<Vec<_>>()
        .join(";")
}

/// Parse a CSV contract list with an `address,tag` header
///
/// Rows with a blank address are skipped.
pub fn parse_contract_csv<R: Read>(reader: R) -> Result<Vec<ContractEntry>, ContractListError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let address_col = column("address").unwrap_or(0);
    let tag_col = column("tag").unwrap_or(1);

    let mut entries = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let address = record.get(address_col).unwrap_or("");
        if address.is_empty() {
            debug!("Skipping contract row without address");
            continue;
        }
        entries.push(ContractEntry::new(address, record.get(tag_col).unwrap_or("")));
    }

    Ok(entries)
}

/// Read a CSV contract list from disk
pub fn read_contract_list(path: impl AsRef<Path>) -> Result<Vec<ContractEntry>, ContractListError> {
    let path = path.as_ref();
    debug!("Reading contract list from: {}", path.display());

    let file = File::open(path)?;
    let entries = parse_contract_csv(file)?;

    info!("Loaded {} contracts from {}", entries.len(), path.display());
    Ok(entries)
}

/// Write a contract list as a two-column `address,tag` CSV
pub fn write_contract_list(
    entries: &[ContractEntry],
    path: impl AsRef<Path>,
) -> Result<(), ContractListError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new().has_headers(true).from_path(path)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;

    info!("Wrote {} contracts to {}", entries.len(), path.display());
    Ok(())
}

/// Trim, lowercase and add the `0x` prefix if missing
pub fn normalize_address(address: &str) -> String {
    let address = address.trim().to_ascii_lowercase();
    if address.starts_with("0x") {
        address
    } else {
        format!("0x{}", address)
    }
}

/// Check for `0x` followed by 40 hex digits
pub fn validate_address(address: &str) -> Result<(), ContractListError> {
    let hex = address
        .strip_prefix("0x")
        .ok_or_else(|| ContractListError::InvalidAddress(address.to_string()))?;

    if hex.len() != ADDRESS_HEX_LEN || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ContractListError::InvalidAddress(address.to_string()));
    }

    Ok(())
}

/// Normalize every address and trim every tag
pub fn normalize_entries(entries: Vec<ContractEntry>) -> Vec<ContractEntry> {
    entries
        .into_iter()
        .map(|entry| ContractEntry::new(normalize_address(&entry.address), entry.tag.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ADDR_A: &str = "0x1111111111111111111111111111111111111111";

    #[test]
    fn test_parse_entry_with_and_without_tag() {
        let entry: ContractEntry = "0xabc, Apes ".parse().unwrap();
        assert_eq!(entry, ContractEntry::new("0xabc", "Apes"));

        let entry: ContractEntry = "0xabc".parse().unwrap();
        assert_eq!(entry.tag, "");
        assert_eq!(entry.label(), "0xabc");

        assert!(",tag".parse::<ContractEntry>().is_err());
    }

    #[test]
    fn test_tag_may_contain_commas() {
        let entry: ContractEntry = "0xabc,Apes, Yacht Club".parse().unwrap();
        assert_eq!(entry.tag, "Apes, Yacht Club");
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(normalize_address(" 0xABCdef "), "0xabcdef");
        assert_eq!(normalize_address("abcdef"), "0xabcdef");
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address(ADDR_A).is_ok());
        assert!(validate_address("0x1234").is_err());
        assert!(validate_address(&ADDR_A[2..]).is_err());
        assert!(validate_address("0xgggggggggggggggggggggggggggggggggggggggg").is_err());
    }

    #[test]
    fn test_to_share_string() {
        let entries = vec![ContractEntry::new("0xa", "A"), ContractEntry::new("0xb", "")];
        assert_eq!(to_share_string(&entries), "0xa,A;0xb,");
        assert_eq!(parse_share_string(&to_share_string(&entries)), entries);
    }
}
