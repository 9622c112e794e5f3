//! Typed schema for the sales dataset.

mod row;
mod table;

pub use row::{Field, RawRow, Row, RowKey};
pub use table::Table;
