//! Plain-text summary of a report.

use super::schema::HolderReport;
use std::fmt::Write;

const BAR_WIDTH: usize = 40;

/// Render the token-holding histogram, top links and combination counts
pub fn render_summary(report: &HolderReport, top_links: usize) -> String {
    let results = &report.results;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Contracts: {} | Unique holders: {}",
        report.contracts.len(),
        results.total_holders()
    );

    for contract in &report.contracts {
        let _ = writeln!(
            out,
            "  {:<44} {:>8} holders",
            report.label(&contract.address),
            contract.holder_count
        );
    }

    let _ = writeln!(out, "\nHolders by number of contracts held:");
    let max_count = results.token_holding_counts.values().copied().max().unwrap_or(0);
    for (k, count) in &results.token_holding_counts {
        let _ = writeln!(
            out,
            "  {:>3} | {:<width$} {}",
            k,
            bar(*count, max_count),
            count,
            width = BAR_WIDTH
        );
    }

    let mut links: Vec<_> = results.link_data.iter().collect();
    links.sort_by(|a, b| b.value.cmp(&a.value));

    let _ = writeln!(out, "\nTop shared-holder links:");
    if links.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for link in links.into_iter().take(top_links) {
        let _ = writeln!(
            out,
            "  {} <-> {}: {}",
            report.label(&link.source),
            report.label(&link.target),
            link.value
        );
    }

    if !results.token_combinations.is_empty() {
        let _ = writeln!(out, "\nMulti-contract combinations:");
        for (k, groups) in &results.token_combinations {
            let holders: usize = groups.values().map(|h| h.len()).sum();
            let _ = writeln!(out, "  {}-way: {} groups, {} memberships", k, groups.len(), holders);
        }
    }

    out
}

fn bar(count: usize, max_count: usize) -> String {
    if max_count == 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH).div_ceil(max_count);
    "#".repeat(len)
}
