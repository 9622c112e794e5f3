//! Salesview: aggregate reports over mobile-phone sales listings.
//!
//! A delimited sales file is loaded, typed and cleaned once into a read-only
//! [`Table`]. Eleven independent views are computed from it, each paired with
//! a declarative [`ChartSpec`] and rendered into its own standalone page.
//!
//! # Example
//!
//! ```no_run
//! use salesview::{ArtifactWriter, Pipeline, PlotlyHtmlRenderer, ReportConfig};
//!
//! let config = ReportConfig::default();
//! let renderer = PlotlyHtmlRenderer::from_source(&config.plotly_js).unwrap();
//! let writer = ArtifactWriter::create(&config.output_dir).unwrap();
//!
//! let pipeline = Pipeline::load("mobile_sales_dataset.csv", config).unwrap();
//! let summary = pipeline.run(&renderer, &writer);
//!
//! println!("Rendered {} views", summary.rendered());
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod schema;
pub mod views;

mod pipeline;

pub use crate::pipeline::{
    ArtifactOutcome, DASHBOARD_FILE, MANIFEST_FILE, Pipeline, Report, RunSummary, ViewOutcome,
    ViewRecord,
};
pub use chart::{ChartBuilder, ChartKind, ChartSpec};
pub use config::{ColorSettings, PlotlySource, ReportConfig, ViewSettings};
pub use error::{Result, SalesviewError};
pub use input::{CleaningReport, DataTable, DatasetLoader, LoadedDataset, SourceMetadata};
pub use render::{Artifact, ArtifactWriter, ChartRenderer, PlotlyHtmlRenderer};
pub use schema::{Field, RawRow, Row, Table};
pub use views::{AggregateView, ViewData, ViewKind};
