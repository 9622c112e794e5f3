//! The cleaned, read-only sales table.

use std::io::Write;

use serde::Serialize;

use super::row::{Field, Row};
use crate::error::Result;

/// An ordered sequence of complete, distinct rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Wrap rows that already satisfy the cleaning invariants.
    pub(crate) fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// All rows in source order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterate rows in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as comma-separated text with the canonical headers.
    ///
    /// Decimals use their shortest round-trip representation, so loading the
    /// output again yields an identical table.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(Field::ALL.iter().map(|f| f.header()))?;

        for row in &self.rows {
            out.write_record([
                row.brand.clone(),
                row.model.clone(),
                row.mobile.clone(),
                row.colors.clone(),
                row.selling_price.to_string(),
                row.original_price.to_string(),
                row.discount.to_string(),
                row.rating.to_string(),
            ])?;
        }

        out.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
