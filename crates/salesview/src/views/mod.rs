//! Aggregate views derived from the cleaned table.
//!
//! Every view is a pure function of a [`Table`](crate::schema::Table) and its
//! parameters. Rankings are stable: equal values keep the order in which their
//! group was first seen in the source.

mod distribution;
mod group;
mod pricing;

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use distribution::{
    OTHERS_LABEL, brand_distribution, brand_leaders, brand_models, models_per_brand, top_colors,
    top_products,
};
pub use pricing::{mean_discount, mean_rating, mean_selling_price, revenue, top_discounts};

static SLUG_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug pattern"));

/// The eleven views, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    BrandDistribution,
    ModelsPerBrand,
    BrandLeaders,
    TopProducts,
    BrandModels,
    TopColors,
    MeanSellingPrice,
    MeanRating,
    MeanDiscount,
    TopDiscounts,
    Revenue,
}

impl ViewKind {
    /// All views in reporting order.
    pub const ALL: [ViewKind; 11] = [
        ViewKind::BrandDistribution,
        ViewKind::ModelsPerBrand,
        ViewKind::BrandLeaders,
        ViewKind::TopProducts,
        ViewKind::BrandModels,
        ViewKind::TopColors,
        ViewKind::MeanSellingPrice,
        ViewKind::MeanRating,
        ViewKind::MeanDiscount,
        ViewKind::TopDiscounts,
        ViewKind::Revenue,
    ];

    /// 1-based position in the report.
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// Artifact name for views whose name does not depend on parameters.
    pub fn slug(self) -> &'static str {
        match self {
            ViewKind::BrandDistribution => "brand_distribution",
            ViewKind::ModelsPerBrand => "models_by_brand",
            ViewKind::BrandLeaders => "top_brands_mobiles",
            ViewKind::TopProducts => "top_10_mobiles",
            ViewKind::BrandModels => "brand_models",
            ViewKind::TopColors => "top_colors",
            ViewKind::MeanSellingPrice => "mean_selling_price",
            ViewKind::MeanRating => "mean_ratings",
            ViewKind::MeanDiscount => "mean_discount",
            ViewKind::TopDiscounts => "top_discount_mobiles",
            ViewKind::Revenue => "total_revenue",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewKind::BrandDistribution => "brand distribution",
            ViewKind::ModelsPerBrand => "models per brand",
            ViewKind::BrandLeaders => "top brands and their best sellers",
            ViewKind::TopProducts => "best-selling products",
            ViewKind::BrandModels => "model distribution",
            ViewKind::TopColors => "top colors",
            ViewKind::MeanSellingPrice => "mean selling price",
            ViewKind::MeanRating => "mean rating",
            ViewKind::MeanDiscount => "mean discount",
            ViewKind::TopDiscounts => "top discounts",
            ViewKind::Revenue => "total revenue",
        };
        f.write_str(name)
    }
}

/// Lowercase ASCII slug with runs of other characters collapsed to `_`.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    SLUG_SEPARATORS
        .replace_all(&lower, "_")
        .trim_matches('_')
        .to_string()
}

/// Rows in a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
}

/// A derived decimal per group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueEntry {
    pub label: String,
    pub value: f64,
}

/// A top brand and its best-selling model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandLeader {
    pub brand: String,
    pub brand_count: usize,
    pub model: String,
    pub model_count: usize,
}

/// A heavily discounted product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountEntry {
    pub mobile: String,
    pub original_price: f64,
    pub discount: f64,
}

/// Payload of an [`AggregateView`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewData {
    Counts {
        entries: Vec<CountEntry>,
    },
    Values {
        entries: Vec<ValueEntry>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cutoff: Option<f64>,
    },
    BrandLeaders {
        entries: Vec<BrandLeader>,
    },
    Discounts {
        entries: Vec<DiscountEntry>,
    },
}

/// One named aggregate, immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateView {
    pub kind: ViewKind,
    pub title: String,
    pub slug: String,
    pub data: ViewData,
}

impl AggregateView {
    pub(crate) fn new(kind: ViewKind, title: impl Into<String>, data: ViewData) -> Self {
        Self {
            kind,
            title: title.into(),
            slug: kind.slug().to_string(),
            data,
        }
    }

    pub(crate) fn with_slug(mut self, slug: String) -> Self {
        self.slug = slug;
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        match &self.data {
            ViewData::Counts { entries } => entries.len(),
            ViewData::Values { entries, .. } => entries.len(),
            ViewData::BrandLeaders { entries } => entries.len(),
            ViewData::Discounts { entries } => entries.len(),
        }
    }

    /// True when the underlying group had no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn counts(&self) -> Option<&[CountEntry]> {
        match &self.data {
            ViewData::Counts { entries } => Some(entries),
            _ => None,
        }
    }

    pub fn values(&self) -> Option<&[ValueEntry]> {
        match &self.data {
            ViewData::Values { entries, .. } => Some(entries),
            _ => None,
        }
    }

    pub fn cutoff(&self) -> Option<f64> {
        match &self.data {
            ViewData::Values { cutoff, .. } => *cutoff,
            _ => None,
        }
    }

    pub fn leaders(&self) -> Option<&[BrandLeader]> {
        match &self.data {
            ViewData::BrandLeaders { entries } => Some(entries),
            _ => None,
        }
    }

    pub fn discounts(&self) -> Option<&[DiscountEntry]> {
        match &self.data {
            ViewData::Discounts { entries } => Some(entries),
            _ => None,
        }
    }

    /// Column headers of the tabular form.
    pub fn headers(&self) -> Vec<&'static str> {
        match (&self.data, self.kind) {
            (ViewData::Counts { .. }, ViewKind::BrandDistribution) => vec!["Brand", "Count"],
            (ViewData::Counts { .. }, ViewKind::ModelsPerBrand) => vec!["Brand", "Models"],
            (ViewData::Counts { .. }, ViewKind::TopProducts) => vec!["Mobile", "Count"],
            (ViewData::Counts { .. }, ViewKind::BrandModels) => vec!["Model", "Count"],
            (ViewData::Counts { .. }, ViewKind::TopColors) => vec!["Color", "Count"],
            (ViewData::Counts { .. }, _) => vec!["Label", "Count"],
            (ViewData::Values { .. }, ViewKind::MeanSellingPrice) => {
                vec!["Brand", "Mean Selling Price"]
            }
            (ViewData::Values { .. }, ViewKind::MeanRating) => vec!["Brand", "Mean Rating"],
            (ViewData::Values { .. }, ViewKind::MeanDiscount) => vec!["Brand", "Mean Discount"],
            (ViewData::Values { .. }, ViewKind::Revenue) => vec!["Brand", "Revenue"],
            (ViewData::Values { .. }, _) => vec!["Label", "Value"],
            (ViewData::BrandLeaders { .. }, _) => {
                vec!["Brand", "Brand Rows", "Top Model", "Model Rows"]
            }
            (ViewData::Discounts { .. }, _) => vec!["Mobile", "Original Price", "Discount"],
        }
    }

    /// Entries formatted as text cells, one row per entry.
    pub fn table_rows(&self) -> Vec<Vec<String>> {
        match &self.data {
            ViewData::Counts { entries } => entries
                .iter()
                .map(|e| vec![e.label.clone(), e.count.to_string()])
                .collect(),
            ViewData::Values { entries, .. } => entries
                .iter()
                .map(|e| vec![e.label.clone(), format_decimal(e.value)])
                .collect(),
            ViewData::BrandLeaders { entries } => entries
                .iter()
                .map(|e| {
                    vec![
                        e.brand.clone(),
                        e.brand_count.to_string(),
                        e.model.clone(),
                        e.model_count.to_string(),
                    ]
                })
                .collect(),
            ViewData::Discounts { entries } => entries
                .iter()
                .map(|e| {
                    vec![
                        e.mobile.clone(),
                        format_decimal(e.original_price),
                        format_decimal(e.discount),
                    ]
                })
                .collect(),
        }
    }
}

/// Two decimals, trailing zeros kept for alignment.
fn format_decimal(value: f64) -> String {
    format!("{:.2}", value)
}
