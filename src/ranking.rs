use crate::analyzer::FrequencyTable;
use crate::models::RankedEntry;
use std::cmp::Ordering;

/// Number of entries in every ranked report.
pub const TOP_K: usize = 10;

/// Share of `total` taken by `count`, in percent rounded to one decimal place.
///
/// Rounding is done on the exact ratio in integer tenths, half away from zero,
/// so `1/16` gives `6.3` and `2/3` gives `66.7`. A zero total yields `0.0`.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let count = u128::from(count);
    let total = u128::from(total);
    let tenths = (count * 2000 + total) / (total * 2);
    tenths as f64 / 10.0
}

/// Highest count first, ties broken by label in ascending order.
fn by_rank(a: &(&str, u64), b: &(&str, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// The `TOP_K` largest entries of `table`, with percentages taken over the full
/// certified total rather than the sum of the entries kept.
pub fn rank_top(table: &FrequencyTable, certified_total: u64) -> Vec<RankedEntry> {
    let mut entries: Vec<(&str, u64)> = table.iter().collect();
    entries.sort_by(by_rank);

    entries
        .into_iter()
        .take(TOP_K)
        .map(|(label, count)| RankedEntry {
            label: label.to_string(),
            count,
            percentage: percentage(count, certified_total),
        })
        .collect()
}
