//! Error types for the salesview library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for salesview operations.
#[derive(Debug, Error)]
pub enum SalesviewError {
    /// The raw source could not be opened or read.
    #[error("Source unavailable '{path}': {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cell could not be parsed into its field type.
    #[error("Parse error at row {row}, column '{column}': {message}")]
    Parse {
        row: usize,
        column: String,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// One or more required fields are absent from every row.
    #[error("Schema mismatch: required field(s) missing: {}", missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    /// A caller-supplied threshold was out of range.
    #[error("Invalid threshold {0}: must be zero or greater")]
    InvalidThreshold(i64),

    /// An artifact could not be written.
    #[error("Render failure for '{target}': {source}")]
    RenderFailure {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for salesview operations.
pub type Result<T> = std::result::Result<T, SalesviewError>;
