//! Input parsing, typing and cleaning of the raw source.

mod loader;
mod parser;
mod source;

pub use loader::{CleaningReport, DatasetLoader, LoadedDataset, clean_rows};
pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
