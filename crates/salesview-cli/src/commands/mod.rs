//! CLI command implementations.

pub mod clean;
pub mod generate;
pub mod inspect;
pub mod serve;

use std::path::Path;

use salesview::ReportConfig;

/// Configuration from `--config`, or the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> salesview::Result<ReportConfig> {
    match path {
        Some(path) => ReportConfig::from_toml_file(path),
        None => Ok(ReportConfig::default()),
    }
}
