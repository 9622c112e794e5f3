//! Typed row definitions for the sales dataset.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tracked column of the sales dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Brand,
    Model,
    Mobile,
    Colors,
    SellingPrice,
    OriginalPrice,
    Discount,
    Rating,
}

impl Field {
    /// All tracked fields, in canonical column order.
    pub const ALL: [Field; 8] = [
        Field::Brand,
        Field::Model,
        Field::Mobile,
        Field::Colors,
        Field::SellingPrice,
        Field::OriginalPrice,
        Field::Discount,
        Field::Rating,
    ];

    /// Header text of this field in the source file.
    pub fn header(self) -> &'static str {
        match self {
            Field::Brand => "Brands",
            Field::Model => "Models",
            Field::Mobile => "Mobile",
            Field::Colors => "Colors",
            Field::SellingPrice => "Selling Price",
            Field::OriginalPrice => "Original Price",
            Field::Discount => "Discount",
            Field::Rating => "Rating",
        }
    }

    /// Whether values of this field are decimals.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Field::SellingPrice | Field::OriginalPrice | Field::Discount | Field::Rating
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One fully populated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub brand: String,
    pub model: String,
    pub mobile: String,
    pub colors: String,
    pub selling_price: f64,
    pub original_price: f64,
    pub discount: f64,
    pub rating: f64,
}

/// A listing before incomplete rows are dropped; any field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub mobile: Option<String>,
    pub colors: Option<String>,
    pub selling_price: Option<f64>,
    pub original_price: Option<f64>,
    pub discount: Option<f64>,
    pub rating: Option<f64>,
}

impl RawRow {
    /// Promote to a [`Row`] when every field is present.
    pub fn complete(self) -> Option<Row> {
        Some(Row {
            brand: self.brand?,
            model: self.model?,
            mobile: self.mobile?,
            colors: self.colors?,
            selling_price: self.selling_price?,
            original_price: self.original_price?,
            discount: self.discount?,
            rating: self.rating?,
        })
    }

    /// Identity used for exact-duplicate detection.
    ///
    /// Decimals compare by bit pattern with `-0.0` folded into `0.0`.
    pub fn key(&self) -> RowKey {
        fn bits(v: Option<f64>) -> Option<u64> {
            v.map(|x| (x + 0.0).to_bits())
        }

        RowKey {
            text: [
                self.brand.clone(),
                self.model.clone(),
                self.mobile.clone(),
                self.colors.clone(),
            ],
            numbers: [
                bits(self.selling_price),
                bits(self.original_price),
                bits(self.discount),
                bits(self.rating),
            ],
        }
    }
}

impl From<&Row> for RawRow {
    fn from(row: &Row) -> Self {
        Self {
            brand: Some(row.brand.clone()),
            model: Some(row.model.clone()),
            mobile: Some(row.mobile.clone()),
            colors: Some(row.colors.clone()),
            selling_price: Some(row.selling_price),
            original_price: Some(row.original_price),
            discount: Some(row.discount),
            rating: Some(row.rating),
        }
    }
}

/// Hashable identity of a [`RawRow`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    text: [Option<String>; 4],
    numbers: [Option<u64>; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(brand: &str, price: f64) -> RawRow {
        RawRow {
            brand: Some(brand.to_string()),
            model: Some("13".to_string()),
            mobile: Some("Apple iPhone 13".to_string()),
            colors: Some("Blue".to_string()),
            selling_price: Some(price),
            original_price: Some(price),
            discount: Some(0.0),
            rating: Some(4.5),
        }
    }

    #[test]
    fn test_complete_requires_all_fields() {
        assert!(raw("Apple", 1.0).complete().is_some());

        let mut missing = raw("Apple", 1.0);
        missing.colors = None;
        assert!(missing.complete().is_none());
    }

    #[test]
    fn test_key_folds_negative_zero() {
        let mut a = raw("Apple", 1.0);
        let mut b = raw("Apple", 1.0);
        a.discount = Some(0.0);
        b.discount = Some(-0.0);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_key_distinguishes_values() {
        assert_ne!(raw("Apple", 1.0).key(), raw("Apple", 2.0).key());
        assert_ne!(raw("Apple", 1.0).key(), raw("Samsung", 1.0).key());
    }

    #[test]
    fn test_headers() {
        let headers: Vec<&str> = Field::ALL.iter().map(|f| f.header()).collect();
        assert_eq!(headers[0], "Brands");
        assert_eq!(headers[4], "Selling Price");
        assert!(Field::Rating.is_numeric());
        assert!(!Field::Mobile.is_numeric());
    }
}
