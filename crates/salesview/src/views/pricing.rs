//! Price, rating and discount views.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::group::{mean_by, rank_values};
use super::{AggregateView, DiscountEntry, ViewData, ViewKind};
use crate::schema::{Row, Table};

fn brand(row: &Row) -> &str {
    row.brand.as_str()
}

/// Mean selling price per brand, highest first.
pub fn mean_selling_price(table: &Table) -> AggregateView {
    let entries = rank_values(mean_by(table, brand, |r| r.selling_price));
    AggregateView::new(
        ViewKind::MeanSellingPrice,
        "Mean Selling Price of Each Brand",
        ViewData::Values {
            entries,
            cutoff: None,
        },
    )
}

/// Mean rating per brand, highest first, with a fixed reference line.
pub fn mean_rating(table: &Table, cutoff: f64) -> AggregateView {
    let entries = rank_values(mean_by(table, brand, |r| r.rating));
    AggregateView::new(
        ViewKind::MeanRating,
        "Mean Ratings of Each Brand",
        ViewData::Values {
            entries,
            cutoff: Some(cutoff),
        },
    )
}

/// Mean discount per brand, highest first.
///
/// The reference line is the unweighted mean of the per-brand means, so a
/// brand with one row counts as much as a brand with a thousand.
pub fn mean_discount(table: &Table) -> AggregateView {
    let entries = rank_values(mean_by(table, brand, |r| r.discount));
    let cutoff = if entries.is_empty() {
        None
    } else {
        Some(entries.iter().map(|e| e.value).sum::<f64>() / entries.len() as f64)
    };

    AggregateView::new(
        ViewKind::MeanDiscount,
        "Mean Discount of Each Brand",
        ViewData::Values { entries, cutoff },
    )
}

/// The `top_n` rows by discount, de-duplicated on product and prices, then
/// ordered by original price.
///
/// De-duplication happens after the cut, so fewer than `top_n` entries may
/// remain.
pub fn top_discounts(table: &Table, top_n: usize) -> AggregateView {
    let mut ranked: Vec<&Row> = table.iter().collect();
    ranked.sort_by(|a, b| b.discount.total_cmp(&a.discount));

    let mut seen = HashSet::new();
    let mut entries: Vec<DiscountEntry> = ranked
        .into_iter()
        .take(top_n)
        .filter(|r| {
            seen.insert((
                r.mobile.as_str(),
                (r.original_price + 0.0).to_bits(),
                (r.discount + 0.0).to_bits(),
            ))
        })
        .map(|r| DiscountEntry {
            mobile: r.mobile.clone(),
            original_price: r.original_price,
            discount: r.discount,
        })
        .collect();
    entries.sort_by(|a, b| b.original_price.total_cmp(&a.original_price));

    AggregateView::new(
        ViewKind::TopDiscounts,
        "Top Mobiles by Discount",
        ViewData::Discounts { entries },
    )
}

/// Revenue per brand: for every distinct selling price, price times the rows
/// sold at it, summed per brand.
pub fn revenue(table: &Table) -> AggregateView {
    let mut by_price: IndexMap<&str, IndexMap<u64, (f64, usize)>> = IndexMap::new();
    for row in table {
        let slot = by_price
            .entry(row.brand.as_str())
            .or_default()
            .entry((row.selling_price + 0.0).to_bits())
            .or_insert((row.selling_price, 0));
        slot.1 += 1;
    }

    let totals = by_price
        .into_iter()
        .map(|(brand, prices)| {
            let total = prices
                .values()
                .map(|(price, units)| price * *units as f64)
                .sum::<f64>();
            (brand, total)
        })
        .collect();

    AggregateView::new(
        ViewKind::Revenue,
        "Total Revenue Generated by Each Brand",
        ViewData::Values {
            entries: rank_values(totals),
            cutoff: None,
        },
    )
}
