//! Grouping helpers shared by the views.
//!
//! Groups are kept in an [`IndexMap`] so that iteration order is the order in
//! which each key was first seen. Combined with stable sorts this gives every
//! ranking its tie-break.

use std::cmp::Reverse;

use indexmap::IndexMap;

use super::{CountEntry, ValueEntry};
use crate::schema::Row;

/// Rows per key, in first-seen key order.
pub(crate) fn count_by<'a, I, F>(rows: I, key: F) -> IndexMap<&'a str, usize>
where
    I: IntoIterator<Item = &'a Row>,
    F: Fn(&'a Row) -> &'a str,
{
    let mut counts = IndexMap::new();
    for row in rows {
        *counts.entry(key(row)).or_insert(0) += 1;
    }
    counts
}

/// Arithmetic mean of `value` per key, in first-seen key order.
pub(crate) fn mean_by<'a, I, K, V>(rows: I, key: K, value: V) -> IndexMap<&'a str, f64>
where
    I: IntoIterator<Item = &'a Row>,
    K: Fn(&'a Row) -> &'a str,
    V: Fn(&Row) -> f64,
{
    let mut sums: IndexMap<&str, (f64, usize)> = IndexMap::new();
    for row in rows {
        let slot = sums.entry(key(row)).or_insert((0.0, 0));
        slot.0 += value(row);
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(k, (sum, n))| (k, sum / n as f64))
        .collect()
}

/// Counts ranked descending; equal counts keep first-seen order.
pub(crate) fn rank_counts(counts: IndexMap<&str, usize>) -> Vec<CountEntry> {
    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(label, count)| CountEntry {
            label: label.to_string(),
            count,
        })
        .collect();
    entries.sort_by_key(|e| Reverse(e.count));
    entries
}

/// Values ranked descending; equal values keep first-seen order.
pub(crate) fn rank_values(values: IndexMap<&str, f64>) -> Vec<ValueEntry> {
    let mut entries: Vec<ValueEntry> = values
        .into_iter()
        .map(|(label, value)| ValueEntry {
            label: label.to_string(),
            value,
        })
        .collect();
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(brand: &str, price: f64) -> Row {
        Row {
            brand: brand.to_string(),
            model: "m".to_string(),
            mobile: "p".to_string(),
            colors: "Black".to_string(),
            selling_price: price,
            original_price: price,
            discount: 0.0,
            rating: 4.0,
        }
    }

    #[test]
    fn test_count_by_keeps_first_seen_order() {
        let rows = vec![row("B", 1.0), row("A", 1.0), row("B", 1.0)];
        let counts = count_by(&rows, |r| r.brand.as_str());
        let keys: Vec<_> = counts.keys().copied().collect();
        assert_eq!(keys, vec!["B", "A"]);
        assert_eq!(counts["B"], 2);
    }

    #[test]
    fn test_rank_counts_is_stable() {
        let rows = vec![row("C", 1.0), row("A", 1.0), row("B", 1.0), row("B", 1.0)];
        let ranked = rank_counts(count_by(&rows, |r| r.brand.as_str()));
        let labels: Vec<_> = ranked.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_mean_by() {
        let rows = vec![row("A", 10.0), row("B", 5.0), row("A", 20.0)];
        let ranked = rank_values(mean_by(&rows, |r| r.brand.as_str(), |r| r.selling_price));
        assert_eq!(ranked[0].label, "A");
        assert_eq!(ranked[0].value, 15.0);
        assert_eq!(ranked[1].value, 5.0);
    }
}
