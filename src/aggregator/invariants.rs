//! Consistency checks for analysis results.
//!
//! Used when validating a report read back from disk.

use super::combinations::split_combination_key;
use super::schema::AnalysisResults;
use crate::utils::config::MIN_COMBINATION_SIZE;
use std::collections::{BTreeSet, HashMap};

/// Return a description of every violated invariant (empty if consistent)
pub fn check_invariants(results: &AnalysisResults) -> Vec<String> {
    let mut issues = Vec::new();
    let contract_count = results.holder_counts.len();

    check_buckets(results, contract_count, &mut issues);
    check_links(results, &mut issues);
    check_combinations(results, &mut issues);

    issues
}

fn check_buckets(results: &AnalysisResults, contract_count: usize, issues: &mut Vec<String>) {
    let count_keys: BTreeSet<_> = results.token_holding_counts.keys().collect();
    let bucket_keys: BTreeSet<_> = results.holders_by_token_count.keys().collect();
    if count_keys != bucket_keys {
        issues.push("token_holding_counts and holders_by_token_count have different keys".to_string());
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (&k, holders) in &results.holders_by_token_count {
        if k == 0 || k > contract_count {
            issues.push(format!("bucket {} is outside 1..={}", k, contract_count));
        }

        let counted = results.token_holding_counts.get(&k).copied().unwrap_or(0);
        if counted != holders.len() {
            issues.push(format!(
                "bucket {} lists {} holders but counts {}",
                k,
                holders.len(),
                counted
            ));
        }

        for holder in holders {
            if let Some(previous) = seen.insert(holder.as_str(), k) {
                issues.push(format!("holder {} appears in buckets {} and {}", holder, previous, k));
            }
        }
    }
}

fn check_links(results: &AnalysisResults, issues: &mut Vec<String>) {
    for link in &results.link_data {
        if link.source == link.target {
            issues.push(format!("link {} links a contract to itself", link.source));
        }
        if link.value == 0 {
            issues.push(format!("link {} -> {} has no shared holders", link.source, link.target));
        }
        if link.value != link.addresses.len() {
            issues.push(format!(
                "link {} -> {} has value {} but {} addresses",
                link.source,
                link.target,
                link.value,
                link.addresses.len()
            ));
        }
        for end in [&link.source, &link.target] {
            if results.holder_count(end).is_none() {
                issues.push(format!("link references unknown contract {}", end));
            }
        }
    }
}

fn check_combinations(results: &AnalysisResults, issues: &mut Vec<String>) {
    let bucket_of: HashMap<&str, usize> = results
        .holders_by_token_count
        .iter()
        .flat_map(|(&k, holders)| holders.iter().map(move |h| (h.as_str(), k)))
        .collect();

    for (&k, groups) in &results.token_combinations {
        if k < MIN_COMBINATION_SIZE {
            issues.push(format!("combination size {} is below {}", k, MIN_COMBINATION_SIZE));
        }

        for (key, holders) in groups {
            let arity = split_combination_key(key).len();
            if arity != k {
                issues.push(format!("combination {} listed under size {}", key, k));
            }

            for holder in holders {
                let held = bucket_of.get(holder.as_str()).copied().unwrap_or(0);
                if held < k {
                    issues.push(format!(
                        "holder {} holds {} contracts but appears in {}",
                        holder, held, key
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::schema::{HolderCount, Link};

    fn consistent() -> AnalysisResults {
        let mut results = AnalysisResults::default();
        results.holder_counts = vec![
            HolderCount { address: "0xa".to_string(), holders: 2 },
            HolderCount { address: "0xb".to_string(), holders: 1 },
        ];
        results.token_holding_counts.insert(1, 1);
        results.token_holding_counts.insert(2, 1);
        results.holders_by_token_count.insert(1, ["h2".to_string()].into());
        results.holders_by_token_count.insert(2, ["h1".to_string()].into());
        results.link_data.push(Link {
            source: "0xa".to_string(),
            target: "0xb".to_string(),
            value: 1,
            addresses: vec!["h1".to_string()],
        });
        results
    }

    #[test]
    fn test_consistent_results_pass() {
        assert!(check_invariants(&consistent()).is_empty());
    }

    #[test]
    fn test_count_mismatch_detected() {
        let mut results = consistent();
        results.token_holding_counts.insert(1, 5);
        assert_eq!(check_invariants(&results).len(), 1);
    }

    #[test]
    fn test_overlapping_buckets_detected() {
        let mut results = consistent();
        results
            .holders_by_token_count
            .get_mut(&1)
            .unwrap()
            .insert("h1".to_string());
        results.token_holding_counts.insert(1, 2);

        let issues = check_invariants(&results);
        assert!(issues.iter().any(|i| i.contains("appears in buckets")));
    }

    #[test]
    fn test_link_value_mismatch_detected() {
        let mut results = consistent();
        results.link_data[0].value = 3;
        let issues = check_invariants(&results);
        assert!(issues.iter().any(|i| i.contains("has value 3")));
    }

    #[test]
    fn test_combination_for_lower_bucket_detected() {
        let mut results = consistent();
        results
            .token_combinations
            .entry(3)
            .or_default()
            .insert("0xa-0xb-0xc".to_string(), ["h1".to_string()].into());

        let issues = check_invariants(&results);
        assert!(issues.iter().any(|i| i.contains("holds 2 contracts")));
    }
}
