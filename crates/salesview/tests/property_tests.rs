//! Property-based tests for cleaning and the aggregate views.
//!
//! ```bash
//! cargo test -p salesview --test property_tests
//! PROPTEST_CASES=10000 cargo test -p salesview --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use salesview::input::clean_rows;
use salesview::views;
use salesview::{DatasetLoader, RawRow, Table};

// =============================================================================
// Test Strategies
// =============================================================================

fn brand() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Apple", "Samsung", "Xiaomi", "Nokia", "Oppo", "Vivo"])
        .prop_map(str::to_string)
}

fn color() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Black", "Blue", "Gold", "Midnight Black", "Mystic Bronze"])
        .prop_map(str::to_string)
}

/// Whole currency amounts, so decimal text round-trips exactly.
fn price() -> impl Strategy<Value = f64> {
    (0u32..200_000).prop_map(f64::from)
}

fn rating() -> impl Strategy<Value = f64> {
    (0u32..=50).prop_map(|r| f64::from(r) / 10.0)
}

/// A raw row where each field is occasionally missing.
fn raw_row() -> impl Strategy<Value = RawRow> {
    (
        prop::option::weighted(0.95, brand()),
        prop::option::weighted(0.95, "[A-Z][0-9]{1,2}"),
        prop::option::weighted(0.95, "[A-Z][a-z]{2,6} [0-9]{1,2}"),
        prop::option::weighted(0.95, color()),
        prop::option::weighted(0.95, price()),
        prop::option::weighted(0.95, price()),
        prop::option::weighted(0.95, price()),
        prop::option::weighted(0.95, rating()),
    )
        .prop_map(
            |(brand, model, mobile, colors, selling_price, original_price, discount, rating)| {
                RawRow {
                    brand,
                    model,
                    mobile,
                    colors,
                    selling_price,
                    original_price,
                    discount,
                    rating,
                }
            },
        )
}

/// Raw rows with some exact repeats mixed in.
fn raw_rows() -> impl Strategy<Value = Vec<RawRow>> {
    prop::collection::vec(raw_row(), 0..60).prop_flat_map(|rows| {
        let n = rows.len();
        let repeats = prop::collection::vec(0..n.max(1), 0..10);
        (Just(rows), repeats).prop_map(move |(mut rows, picks)| {
            if n > 0 {
                for i in picks {
                    let copy = rows[i].clone();
                    rows.push(copy);
                }
            }
            rows
        })
    })
}

fn table() -> impl Strategy<Value = Table> {
    raw_rows().prop_map(|rows| clean_rows(rows).0)
}

// =============================================================================
// Cleaning Properties
// =============================================================================

proptest! {
    #[test]
    fn cleaning_is_idempotent(rows in raw_rows()) {
        let (table, report) = clean_rows(rows);
        let again: Vec<RawRow> = table.iter().map(RawRow::from).collect();
        let (table2, report2) = clean_rows(again);

        prop_assert_eq!(&table2, &table);
        prop_assert_eq!(report2.duplicates_removed, 0);
        prop_assert_eq!(report2.incomplete_removed, 0);
        prop_assert_eq!(
            report.rows_read,
            report.duplicates_removed + report.incomplete_removed + report.rows_kept
        );
    }

    #[test]
    fn cleaned_rows_are_distinct(t in table()) {
        let keys: HashSet<_> = t.iter().map(|r| RawRow::from(r).key()).collect();
        prop_assert_eq!(keys.len(), t.len());
    }

    #[test]
    fn csv_export_round_trips(t in table()) {
        let mut out = Vec::new();
        t.write_csv(&mut out).unwrap();
        let (reloaded, _) = DatasetLoader::new().load_bytes(&out).unwrap();
        prop_assert_eq!(reloaded, t);
    }
}

// =============================================================================
// View Properties
// =============================================================================

proptest! {
    #[test]
    fn brand_buckets_cover_every_row(t in table(), threshold in 0i64..20) {
        let view = views::brand_distribution(&t, threshold).unwrap();
        let total: usize = view.counts().unwrap().iter().map(|e| e.count).sum();
        prop_assert_eq!(total, t.len());
        prop_assert_eq!(&view.counts().unwrap().last().unwrap().label, views::OTHERS_LABEL);
    }

    #[test]
    fn single_row_brand_mean_is_its_value(t in table()) {
        let price = views::mean_selling_price(&t);
        let rating = views::mean_rating(&t, 4.0);
        let discount = views::mean_discount(&t);

        for entry in price.values().unwrap() {
            let rows: Vec<_> = t.iter().filter(|r| r.brand == entry.label).collect();
            if rows.len() == 1 {
                prop_assert_eq!(entry.value, rows[0].selling_price);
                let r = rating.values().unwrap().iter().find(|e| e.label == entry.label).unwrap();
                prop_assert_eq!(r.value, rows[0].rating);
                let d = discount.values().unwrap().iter().find(|e| e.label == entry.label).unwrap();
                prop_assert_eq!(d.value, rows[0].discount);
            }
        }
    }

    #[test]
    fn means_are_ranked_descending(t in table()) {
        let view = views::mean_selling_price(&t);
        let values: Vec<f64> = view.values().unwrap().iter().map(|e| e.value).collect();
        prop_assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn top_discounts_distinct_and_ordered(t in table(), n in 1usize..15) {
        let view = views::top_discounts(&t, n);
        let entries = view.discounts().unwrap();

        prop_assert!(entries.len() <= n);
        let triples: HashSet<_> = entries
            .iter()
            .map(|e| (e.mobile.clone(), e.original_price.to_bits(), e.discount.to_bits()))
            .collect();
        prop_assert_eq!(triples.len(), entries.len());
        prop_assert!(entries.windows(2).all(|w| w[0].original_price >= w[1].original_price));
    }

    #[test]
    fn revenue_is_sum_of_selling_prices(t in table()) {
        let view = views::revenue(&t);
        for entry in view.values().unwrap() {
            let expected: f64 = t
                .iter()
                .filter(|r| r.brand == entry.label)
                .map(|r| r.selling_price)
                .sum();
            prop_assert!((entry.value - expected).abs() <= 1e-6 * expected.abs().max(1.0));
        }
    }

    #[test]
    fn views_are_deterministic(t in table()) {
        prop_assert_eq!(views::models_per_brand(&t), views::models_per_brand(&t));
        prop_assert_eq!(views::brand_leaders(&t, 5), views::brand_leaders(&t, 5));
        prop_assert_eq!(views::top_colors(&t, 10), views::top_colors(&t, 10));
    }
}
