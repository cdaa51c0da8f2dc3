//! Lazy k-combination enumeration and canonical combination keys.
//!
//! A holder present in every one of C contracts produces
//! 2^C - C(C,0) - C(C,1) - C(C,2) combinations on its own, so subsets are
//! produced one at a time and never collected up front.

use crate::utils::config::COMBINATION_KEY_DELIMITER;
use itertools::Itertools;

/// Lazy iterator over the `size`-length subsequences of a slice
pub type Combinations<'a, T> = itertools::Combinations<std::slice::Iter<'a, T>>;

/// Enumerate all combinations of `size` items.
///
/// Relative input order is preserved inside each combination, and
/// combinations come out in lexicographic index order. `size == 0` yields
/// a single empty combination; `size > items.len()` yields nothing.
pub fn combinations_of_size<T>(items: &[T], size: usize) -> Combinations<'_, T> {
    items.iter().combinations(size)
}

/// Canonical key for a set of contract addresses: sorted, joined by `-`
pub fn combination_key<S: AsRef<str>>(addresses: &[S]) -> String {
    let parts: Vec<&str> = addresses.iter().map(|address| address.as_ref()).collect();
    parts.into_iter().sorted().join(COMBINATION_KEY_DELIMITER)
}

/// Split a combination key back into its contract addresses
pub fn split_combination_key(key: &str) -> Vec<&str> {
    if key.is_empty() {
        return Vec::new();
    }
    key.split(COMBINATION_KEY_DELIMITER).collect()
}

/// Binomial coefficient C(n, k), saturating on overflow
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k)
        .try_fold(1u64, |acc, i| {
            acc.checked_mul((n - i) as u64).map(|product| product / (i as u64 + 1))
        })
        .unwrap_or(u64::MAX)
}
