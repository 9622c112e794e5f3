//! Typing and cleaning of raw source rows into a [`Table`].

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::parser::{Parser, ParserConfig};
use super::source::{DataTable, SourceMetadata};
use crate::error::{Result, SalesviewError};
use crate::schema::{Field, RawRow, Table};

/// Currency symbols, thousands separators and whitespace tolerated in decimals.
static NUMERIC_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[₹$€£,\s]").expect("valid numeric noise pattern"));

const MAX_RATING: f64 = 5.0;

/// Row accounting for one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows read from the source.
    pub rows_read: usize,
    /// Exact duplicates dropped (first occurrence kept).
    pub duplicates_removed: usize,
    /// Rows dropped for a missing field.
    pub incomplete_removed: usize,
    /// Rows in the cleaned table.
    pub rows_kept: usize,
}

/// A cleaned table together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub table: Table,
    pub source: SourceMetadata,
    pub report: CleaningReport,
}

/// Reads a source file and produces the cleaned table.
pub struct DatasetLoader {
    parser: Parser,
}

impl DatasetLoader {
    /// Create a loader with default parser settings.
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    /// Create a loader with custom parser settings.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            parser: Parser::with_config(config),
        }
    }

    /// Read, type and clean a delimited file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedDataset> {
        let (data, source) = self.parser.parse_file(path)?;
        let (table, report) = self.load_table(&data)?;

        info!(
            file = %source.file,
            rows_read = report.rows_read,
            duplicates = report.duplicates_removed,
            incomplete = report.incomplete_removed,
            rows = report.rows_kept,
            "loaded dataset"
        );

        Ok(LoadedDataset {
            table,
            source,
            report,
        })
    }

    /// Type and clean rows that are already in memory.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<(Table, CleaningReport)> {
        let data = self.parser.parse_bytes(bytes)?;
        self.load_table(&data)
    }

    /// Type and clean an untyped table.
    pub fn load_table(&self, data: &DataTable) -> Result<(Table, CleaningReport)> {
        let columns = resolve_columns(data)?;

        let mut raw_rows = Vec::with_capacity(data.row_count());
        for (idx, cells) in data.rows.iter().enumerate() {
            raw_rows.push(type_row(idx + 1, cells, &columns)?);
        }

        Ok(clean_rows(raw_rows))
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop exact duplicates (keeping the first) and then incomplete rows.
///
/// The product name is expected to be trimmed already; [`DatasetLoader`] does this
/// while typing cells.
pub fn clean_rows(rows: Vec<RawRow>) -> (Table, CleaningReport) {
    let rows_read = rows.len();
    let mut seen = HashSet::with_capacity(rows_read);

    let distinct: Vec<RawRow> = rows.into_iter().filter(|r| seen.insert(r.key())).collect();
    let duplicates_removed = rows_read - distinct.len();

    let after_dedup = distinct.len();
    let complete: Vec<_> = distinct.into_iter().filter_map(RawRow::complete).collect();
    let incomplete_removed = after_dedup - complete.len();

    debug!(rows_read, duplicates_removed, incomplete_removed, "cleaned rows");

    let report = CleaningReport {
        rows_read,
        duplicates_removed,
        incomplete_removed,
        rows_kept: complete.len(),
    };

    (Table::from_rows(complete), report)
}

/// Map every tracked field to its column, or fail naming all absent fields.
fn resolve_columns(data: &DataTable) -> Result<[usize; 8]> {
    let mut columns = [0usize; 8];
    let mut missing = Vec::new();

    for (slot, field) in Field::ALL.iter().enumerate() {
        match data.column_index(field.header()) {
            Some(idx) => {
                let never_present = data.row_count() > 0
                    && data.rows.iter().all(|r| DataTable::is_null_value(&r[idx]));
                if never_present {
                    missing.push(field.header().to_string());
                }
                columns[slot] = idx;
            }
            None => missing.push(field.header().to_string()),
        }
    }

    if missing.is_empty() {
        Ok(columns)
    } else {
        Err(SalesviewError::SchemaMismatch { missing })
    }
}

fn type_row(row: usize, cells: &[String], columns: &[usize; 8]) -> Result<RawRow> {
    let text = |field: Field| -> Option<String> {
        let cell = &cells[columns[field as usize]];
        if DataTable::is_null_value(cell) {
            None
        } else if field == Field::Mobile {
            Some(cell.trim().to_string())
        } else {
            Some(cell.clone())
        }
    };
    let number = |field: Field| -> Result<Option<f64>> {
        parse_decimal(&cells[columns[field as usize]])
            .and_then(|value| check_range(field, value))
            .map_err(|message| SalesviewError::Parse {
                row,
                column: field.header().to_string(),
                message,
            })
    };

    Ok(RawRow {
        brand: text(Field::Brand),
        model: text(Field::Model),
        mobile: text(Field::Mobile),
        colors: text(Field::Colors),
        selling_price: number(Field::SellingPrice)?,
        original_price: number(Field::OriginalPrice)?,
        discount: number(Field::Discount)?,
        rating: number(Field::Rating)?,
    })
}

/// Parse a decimal cell; null tokens are `Ok(None)`.
fn parse_decimal(cell: &str) -> std::result::Result<Option<f64>, String> {
    if DataTable::is_null_value(cell) {
        return Ok(None);
    }

    let cleaned = NUMERIC_NOISE.replace_all(cell, "");
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(format!("'{}' is not a decimal number", cell.trim())),
    }
}

/// Prices and discounts are non-negative; ratings lie in `[0, 5]`.
fn check_range(field: Field, value: Option<f64>) -> std::result::Result<Option<f64>, String> {
    let Some(v) = value else {
        return Ok(None);
    };
    match field {
        Field::Rating if !(0.0..=MAX_RATING).contains(&v) => {
            Err(format!("rating {} is outside 0 to {}", v, MAX_RATING))
        }
        Field::SellingPrice | Field::OriginalPrice | Field::Discount if v < 0.0 => {
            Err(format!("{} must not be negative", v))
        }
        _ => Ok(Some(v)),
    }
}
