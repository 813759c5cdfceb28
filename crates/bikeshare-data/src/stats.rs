//! Frequency helpers shared by the reporters.
//!
//! Ties are resolved towards the smallest value in the column's ordering, so
//! every result is deterministic regardless of row order.

use std::collections::BTreeMap;

use serde::Serialize;

/// Most frequent value of `values`; on a tie, the smallest of the tied values.
///
/// Returns `None` for an empty input.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<(T, usize)> = None;
    // Keys arrive in ascending order; only a strictly higher count replaces
    // the current best.
    for (value, count) in tally(values) {
        if best.as_ref().map_or(true, |(_, best_count)| count > *best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Occurrences of each distinct value, by descending count then ascending
/// value.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: Vec<(T, usize)> = tally(values).into_iter().collect();
    // Stable sort keeps the ascending-value order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn tally<T: Ord, I: IntoIterator<Item = T>>(values: I) -> BTreeMap<T, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

// ── ValueCount ────────────────────────────────────────────────────────────────

/// One row of a categorical frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// [`value_counts`] over string slices, as owned [`ValueCount`] rows.
pub fn category_counts<'a, I>(values: I) -> Vec<ValueCount>
where
    I: IntoIterator<Item = &'a str>,
{
    value_counts(values)
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect()
}
