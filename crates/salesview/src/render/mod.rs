//! Turning chart specifications into files.

mod dashboard;
mod html;

use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::ChartSpec;
use crate::error::{Result, SalesviewError};
use crate::views::AggregateView;

pub use dashboard::{DashboardEntry, render_dashboard};
pub use html::{PlotlyHtmlRenderer, escape_html, figure};

/// A rendered document, not yet written anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    /// File stem, without extension.
    pub name: String,
    pub extension: &'static str,
    pub contents: String,
}

impl Artifact {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }
}

/// Produces one artifact per view.
pub trait ChartRenderer {
    fn render(&self, view: &AggregateView, chart: &ChartSpec) -> Result<Artifact>;
}

/// Writes artifacts into one output directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    /// Create the directory (and parents) if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| SalesviewError::RenderFailure {
            target: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write an artifact, replacing any previous file of the same name.
    pub fn write(&self, artifact: &Artifact) -> Result<PathBuf> {
        self.write_file(&artifact.file_name(), artifact.contents.as_bytes())
    }

    /// Write raw bytes under `file_name`.
    pub fn write_file(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        fs::write(&path, contents).map_err(|source| SalesviewError::RenderFailure {
            target: path.display().to_string(),
            source,
        })?;
        Ok(path)
    }
}
