//! Data types consumed and produced by the holder-set aggregator.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Holder addresses of a single contract
pub type HolderSet = HashSet<String>;

/// Contract address -> holder set, kept in insertion order.
///
/// The first entry is the "main" contract as far as the caller is
/// concerned; the aggregator treats every entry the same.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractHolderMap {
    entries: Vec<(String, HolderSet)>,
}

impl ContractHolderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a holder set for a contract.
    ///
    /// An existing address keeps its position and gets the new set; the
    /// previous set is returned.
    pub fn insert(&mut self, address: impl Into<String>, holders: HolderSet) -> Option<HolderSet> {
        let address = address.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == address) {
            Some((_, slot)) => Some(std::mem::replace(slot, holders)),
            None => {
                self.entries.push((address, holders));
                None
            }
        }
    }

    pub fn get(&self, address: &str) -> Option<&HolderSet> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == address)
            .map(|(_, holders)| holders)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HolderSet)> {
        self.entries
            .iter()
            .map(|(address, holders)| (address.as_str(), holders))
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(address, _)| address.as_str())
    }
}

impl FromIterator<(String, HolderSet)> for ContractHolderMap {
    fn from_iter<I: IntoIterator<Item = (String, HolderSet)>>(iter: I) -> Self {
        let mut map = ContractHolderMap::new();
        for (address, holders) in iter {
            map.insert(address, holders);
        }
        map
    }
}

/// Holder count of one contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderCount {
    pub address: String,
    pub holders: usize,
}

/// Shared holders between two contracts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,

    /// Number of shared holders (always equal to `addresses.len()`)
    pub value: usize,

    /// Shared holder addresses, sorted
    pub addresses: Vec<String>,
}

impl Link {
    /// True if this link connects `a` and `b`, in either direction
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// Output of [`analyze`](super::analyze)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// k -> number of holders holding exactly k contracts
    pub token_holding_counts: BTreeMap<usize, usize>,

    /// k -> holders holding exactly k contracts
    pub holders_by_token_count: BTreeMap<usize, BTreeSet<String>>,

    /// Holder count per contract, in input order
    pub holder_counts: Vec<HolderCount>,

    /// One entry per contract pair with shared holders, in input-index order
    pub link_data: Vec<Link>,

    /// k (>= 3) -> combination key -> holders holding every contract in the key
    pub token_combinations: BTreeMap<usize, BTreeMap<String, BTreeSet<String>>>,
}

impl AnalysisResults {
    /// Size of the holder union across all contracts
    pub fn total_holders(&self) -> usize {
        self.token_holding_counts.values().sum()
    }

    pub fn holder_count(&self, address: &str) -> Option<usize> {
        self.holder_counts
            .iter()
            .find(|count| count.address == address)
            .map(|count| count.holders)
    }

    /// Find the link between two contracts regardless of direction
    pub fn link(&self, a: &str, b: &str) -> Option<&Link> {
        self.link_data.iter().find(|link| link.connects(a, b))
    }

    /// Holders of a combination key, looked up at the key's own arity
    pub fn combination(&self, key: &str) -> Option<&BTreeSet<String>> {
        let size = super::combinations::split_combination_key(key).len();
        self.token_combinations.get(&size)?.get(key)
    }

    /// Every holder seen in any contract, sorted
    pub fn all_holders(&self) -> BTreeSet<&str> {
        self.holders_by_token_count
            .values()
            .flat_map(|holders| holders.iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HolderSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_insert_keeps_position_on_replace() {
        let mut map = ContractHolderMap::new();
        map.insert("0xa", set(&["h1"]));
        map.insert("0xb", set(&["h2"]));

        let previous = map.insert("0xa", set(&["h3"]));

        assert_eq!(previous, Some(set(&["h1"])));
        assert_eq!(map.len(), 2);
        assert_eq!(map.addresses().collect::<Vec<_>>(), vec!["0xa", "0xb"]);
        assert!(map.get("0xa").unwrap().contains("h3"));
    }

    #[test]
    fn test_link_connects_either_direction() {
        let link = Link {
            source: "0xa".to_string(),
            target: "0xb".to_string(),
            value: 1,
            addresses: vec!["h1".to_string()],
        };

        assert!(link.connects("0xa", "0xb"));
        assert!(link.connects("0xb", "0xa"));
        assert!(!link.connects("0xa", "0xc"));
    }
}
