//! Count-based views: brands, models, products and colors.

use indexmap::{IndexMap, IndexSet};

use super::group::{count_by, rank_counts};
use super::{AggregateView, BrandLeader, CountEntry, ViewData, ViewKind, slugify};
use crate::error::{Result, SalesviewError};
use crate::schema::Table;

/// Bucket that collects brands below the distribution threshold.
pub const OTHERS_LABEL: &str = "Others";

/// Rows per brand; brands with fewer than `threshold` rows are summed into
/// a trailing "Others" bucket. A brand literally named "Others" always joins
/// the bucket.
pub fn brand_distribution(table: &Table, threshold: i64) -> Result<AggregateView> {
    if threshold < 0 {
        return Err(SalesviewError::InvalidThreshold(threshold));
    }
    let threshold = usize::try_from(threshold).unwrap_or(usize::MAX);

    let mut kept = IndexMap::new();
    let mut others = 0;
    for (brand, count) in count_by(table, |r| r.brand.as_str()) {
        if count >= threshold && brand != OTHERS_LABEL {
            kept.insert(brand, count);
        } else {
            others += count;
        }
    }

    let mut entries = rank_counts(kept);
    entries.push(CountEntry {
        label: OTHERS_LABEL.to_string(),
        count: others,
    });

    Ok(AggregateView::new(
        ViewKind::BrandDistribution,
        "Brand-wise Distribution",
        ViewData::Counts { entries },
    ))
}

/// Distinct models per brand.
pub fn models_per_brand(table: &Table) -> AggregateView {
    let mut models: IndexMap<&str, IndexSet<&str>> = IndexMap::new();
    for row in table {
        models
            .entry(row.brand.as_str())
            .or_default()
            .insert(row.model.as_str());
    }

    let counts = models.into_iter().map(|(b, m)| (b, m.len())).collect();

    AggregateView::new(
        ViewKind::ModelsPerBrand,
        "Number of Models By Brands",
        ViewData::Counts {
            entries: rank_counts(counts),
        },
    )
}

/// The `top_n` brands by rows, each with its most frequent model.
///
/// A model tie goes to the model seen first in the source.
pub fn brand_leaders(table: &Table, top_n: usize) -> AggregateView {
    let mut brands = rank_counts(count_by(table, |r| r.brand.as_str()));
    brands.truncate(top_n);

    let entries = brands
        .into_iter()
        .filter_map(|brand| {
            let models = count_by(
                table.iter().filter(|r| r.brand == brand.label),
                |r| r.model.as_str(),
            );
            let mut best: Option<(&str, usize)> = None;
            for (model, count) in models {
                if best.is_none_or(|(_, top)| count > top) {
                    best = Some((model, count));
                }
            }
            best.map(|(model, model_count)| BrandLeader {
                model: model.to_string(),
                model_count,
                brand_count: brand.count,
                brand: brand.label,
            })
        })
        .collect();

    AggregateView::new(
        ViewKind::BrandLeaders,
        "Top Performing Brands and Their Best-Selling Models",
        ViewData::BrandLeaders { entries },
    )
}

/// The `top_n` products by rows.
pub fn top_products(table: &Table, top_n: usize) -> AggregateView {
    let mut entries = rank_counts(count_by(table, |r| r.mobile.as_str()));
    entries.truncate(top_n);

    AggregateView::new(
        ViewKind::TopProducts,
        format!("Top {} Most Sold Phones", top_n),
        ViewData::Counts { entries },
    )
}

/// Rows per model for one brand. The brand match is exact and case-sensitive.
pub fn brand_models(table: &Table, brand: &str) -> AggregateView {
    let entries = rank_counts(count_by(
        table.iter().filter(|r| r.brand == brand),
        |r| r.model.as_str(),
    ));

    let stem = slugify(brand);
    let slug = if stem.is_empty() {
        ViewKind::BrandModels.slug().to_string()
    } else {
        format!("{}_models", stem)
    };

    AggregateView::new(
        ViewKind::BrandModels,
        format!("Distribution of {} Models", brand),
        ViewData::Counts { entries },
    )
    .with_slug(slug)
}

/// The `top_n` colors by rows.
pub fn top_colors(table: &Table, top_n: usize) -> AggregateView {
    let mut entries = rank_counts(count_by(table, |r| r.colors.as_str()));
    entries.truncate(top_n);

    AggregateView::new(
        ViewKind::TopColors,
        format!("Top {} Colors", top_n),
        ViewData::Counts { entries },
    )
}
