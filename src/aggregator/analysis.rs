//! Holder-set aggregation.
//!
//! Turns a contract -> holder-set map into the token-holding histogram,
//! per-bucket holder sets, pairwise links and k-way combinations.

use super::combinations::{binomial, combination_key, combinations_of_size};
use super::schema::{AnalysisResults, ContractHolderMap, HolderCount, HolderSet, Link};
use crate::utils::config::MIN_COMBINATION_SIZE;
use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashSet};

type CombinationIndex = BTreeMap<usize, BTreeMap<String, BTreeSet<String>>>;

/// Compute overlap statistics for a set of contracts
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `contract_holders` - Holder set per contract, in input order
///
/// # Returns
/// Freshly allocated results; the input is only read. An empty map
/// produces empty results.
pub fn analyze(contract_holders: &ContractHolderMap) -> AnalysisResults {
    debug!("Analyzing holders of {} contracts", contract_holders.len());

    let all_holders = collect_holder_union(contract_holders);
    debug!("Found {} unique holders", all_holders.len());

    let mut token_holding_counts = BTreeMap::new();
    let mut holders_by_token_count: BTreeMap<usize, BTreeSet<String>> = BTreeMap::new();
    let mut token_combinations = CombinationIndex::new();

    for holder in &all_holders {
        let held = held_contracts(contract_holders, holder);
        let tokens_owned = held.len();

        *token_holding_counts.entry(tokens_owned).or_insert(0) += 1;
        holders_by_token_count
            .entry(tokens_owned)
            .or_default()
            .insert(holder.to_string());

        if tokens_owned >= MIN_COMBINATION_SIZE {
            record_combinations(&mut token_combinations, holder, &held);
        }
    }

    let holder_counts = contract_holders
        .iter()
        .map(|(address, holders)| HolderCount {
            address: address.to_string(),
            holders: holders.len(),
        })
        .collect();

    let link_data = build_link_data(contract_holders);

    debug!(
        "Built {} links and {} combination groups",
        link_data.len(),
        token_combinations.values().map(BTreeMap::len).sum::<usize>()
    );

    AnalysisResults {
        token_holding_counts,
        holders_by_token_count,
        holder_counts,
        link_data,
        token_combinations,
    }
}

/// Build one link per contract pair that shares holders
///
/// **Public** - pairs are produced in input-index order (i < j), not
/// sorted by value
pub fn build_link_data(contract_holders: &ContractHolderMap) -> Vec<Link> {
    let entries: Vec<(&str, &HolderSet)> = contract_holders.iter().collect();
    let mut links = Vec::new();

    for (i, (source, source_holders)) in entries.iter().enumerate() {
        for (target, target_holders) in &entries[i + 1..] {
            let addresses = shared_holders(source_holders, target_holders);
            if addresses.is_empty() {
                continue;
            }

            links.push(Link {
                source: source.to_string(),
                target: target.to_string(),
                value: addresses.len(),
                addresses,
            });
        }
    }

    links
}

/// Number of combinations a holder of `held` contracts contributes
pub fn combinations_per_holder(held: usize) -> u64 {
    (MIN_COMBINATION_SIZE..=held)
        .map(|size| binomial(held, size))
        .fold(0u64, u64::saturating_add)
}

/// Union of every holder set
///
/// **Private** - borrowed addresses, sized for the largest set
fn collect_holder_union(contract_holders: &ContractHolderMap) -> HashSet<&str> {
    let largest = contract_holders
        .iter()
        .map(|(_, holders)| holders.len())
        .max()
        .unwrap_or(0);

    let mut union = HashSet::with_capacity(largest);
    for (_, holders) in contract_holders.iter() {
        union.extend(holders.iter().map(String::as_str));
    }
    union
}

/// Contracts held by `holder`, in input order
fn held_contracts<'a>(contract_holders: &'a ContractHolderMap, holder: &str) -> Vec<&'a str> {
    contract_holders
        .iter()
        .filter(|(_, holders)| holders.contains(holder))
        .map(|(address, _)| address)
        .collect()
}

/// Sorted intersection, probing the larger set with the smaller one
fn shared_holders(a: &HolderSet, b: &HolderSet) -> Vec<String> {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut shared: Vec<String> = small
        .iter()
        .filter(|holder| large.contains(*holder))
        .cloned()
        .collect();
    shared.sort_unstable();
    shared
}

/// Add `holder` under every k-subset (k >= 3) of the contracts it holds
fn record_combinations(index: &mut CombinationIndex, holder: &str, held: &[&str]) {
    for size in MIN_COMBINATION_SIZE..=held.len() {
        let groups = index.entry(size).or_default();
        for combination in combinations_of_size(held, size) {
            groups
                .entry(combination_key(&combination))
                .or_default()
                .insert(holder.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(items: &[&str]) -> HolderSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_shared_holders_sorted() {
        let a = set(&["h3", "h1", "h2"]);
        let b = set(&["h2", "h3", "h4", "h5"]);

        assert_eq!(shared_holders(&a, &b), vec!["h2", "h3"]);
        assert_eq!(shared_holders(&b, &a), vec!["h2", "h3"]);
    }

    #[test]
    fn test_held_contracts_input_order() {
        let map: ContractHolderMap = vec![
            ("0xb".to_string(), set(&["h1"])),
            ("0xa".to_string(), set(&["h1", "h2"])),
            ("0xc".to_string(), set(&["h2"])),
        ]
        .into_iter()
        .collect();

        assert_eq!(held_contracts(&map, "h1"), vec!["0xb", "0xa"]);
        assert_eq!(held_contracts(&map, "h2"), vec!["0xa", "0xc"]);
        assert!(held_contracts(&map, "h9").is_empty());
    }

    #[test]
    fn test_combinations_per_holder() {
        assert_eq!(combinations_per_holder(2), 0);
        assert_eq!(combinations_per_holder(3), 1);
        assert_eq!(combinations_per_holder(4), 5);
        // 2^5 - 1 - 5 - 10
        assert_eq!(combinations_per_holder(5), 16);
    }

    #[test]
    fn test_record_combinations_skips_pairs() {
        let mut index = CombinationIndex::new();
        record_combinations(&mut index, "h1", &["0xa", "0xb"]);
        assert!(index.is_empty());
    }
}
