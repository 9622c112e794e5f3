//! Computes every view over one cleaned table and writes the report.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::chart::{ChartBuilder, ChartSpec};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::input::{CleaningReport, DatasetLoader, LoadedDataset, SourceMetadata};
use crate::render::{ArtifactWriter, ChartRenderer, DashboardEntry, render_dashboard};
use crate::schema::Table;
use crate::views::{self, AggregateView, ViewKind};

/// File name of the run manifest inside the output directory.
pub const MANIFEST_FILE: &str = "manifest.json";
/// File name of the index page inside the output directory.
pub const DASHBOARD_FILE: &str = "index.html";

/// A view and the chart that displays it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub view: AggregateView,
    pub chart: ChartSpec,
}

/// What happened to one view during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewOutcome {
    Rendered {
        path: PathBuf,
        rows: usize,
        empty: bool,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRecord {
    pub kind: ViewKind,
    pub number: usize,
    pub title: String,
    pub slug: String,
    pub outcome: ViewOutcome,
}

/// Outcome of writing the index page or the manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArtifactOutcome {
    Written { path: PathBuf },
    Failed { error: String },
}

impl ArtifactOutcome {
    fn from_result(result: Result<PathBuf>, what: &str) -> Self {
        match result {
            Ok(path) => ArtifactOutcome::Written { path },
            Err(e) => {
                error!(artifact = what, error = %e, "failed to write artifact");
                ArtifactOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ArtifactOutcome::Failed { .. })
    }
}

/// Result of [`Pipeline::run`].
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub output_dir: PathBuf,
    pub views: Vec<ViewRecord>,
    pub dashboard: ArtifactOutcome,
    pub manifest: ArtifactOutcome,
}

impl RunSummary {
    pub fn rendered(&self) -> usize {
        self.views
            .iter()
            .filter(|v| matches!(v.outcome, ViewOutcome::Rendered { .. }))
            .count()
    }

    pub fn empty(&self) -> usize {
        self.views
            .iter()
            .filter(|v| matches!(v.outcome, ViewOutcome::Rendered { empty: true, .. }))
            .count()
    }

    /// Views that failed, not counting the index page or manifest.
    pub fn failed_views(&self) -> usize {
        self.views.len() - self.rendered()
    }

    /// Every failure in the run.
    pub fn failures(&self) -> usize {
        self.failed_views()
            + usize::from(self.dashboard.is_failed())
            + usize::from(self.manifest.is_failed())
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }
}

#[derive(Serialize)]
struct Manifest<'a> {
    generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a SourceMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cleaning: Option<&'a CleaningReport>,
    settings: &'a crate::config::ViewSettings,
    views: &'a [ViewRecord],
}

/// The cleaned table plus everything needed to report on it.
#[derive(Debug, Clone)]
pub struct Pipeline {
    table: Table,
    config: ReportConfig,
    source: Option<SourceMetadata>,
    cleaning: Option<CleaningReport>,
}

impl Pipeline {
    /// Pipeline over an already cleaned table.
    pub fn new(table: Table, config: ReportConfig) -> Self {
        Self {
            table,
            config,
            source: None,
            cleaning: None,
        }
    }

    /// Pipeline over a loaded dataset, keeping its provenance for the manifest.
    pub fn from_dataset(dataset: LoadedDataset, config: ReportConfig) -> Self {
        Self {
            table: dataset.table,
            config,
            source: Some(dataset.source),
            cleaning: Some(dataset.report),
        }
    }

    /// Validate `config`, then load and clean `path`.
    pub fn load(path: impl AsRef<Path>, config: ReportConfig) -> Result<Self> {
        config.validate()?;
        let dataset = DatasetLoader::with_config(config.parser.clone()).load(path)?;
        Ok(Self::from_dataset(dataset, config))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    pub fn cleaning(&self) -> Option<&CleaningReport> {
        self.cleaning.as_ref()
    }

    fn report(&self, view: AggregateView) -> Report {
        let chart = ChartBuilder::new(&self.config.views, &self.config.colors).build(&view);
        Report { view, chart }
    }

    pub fn brand_distribution(&self) -> Result<Report> {
        let view = views::brand_distribution(&self.table, self.config.views.brand_threshold)?;
        Ok(self.report(view))
    }

    pub fn models_per_brand(&self) -> Report {
        self.report(views::models_per_brand(&self.table))
    }

    pub fn brand_leaders(&self) -> Report {
        self.report(views::brand_leaders(&self.table, self.config.views.top_brands))
    }

    pub fn top_products(&self) -> Report {
        self.report(views::top_products(&self.table, self.config.views.top_products))
    }

    pub fn brand_models(&self) -> Report {
        self.report(views::brand_models(&self.table, &self.config.views.focus_brand))
    }

    pub fn top_colors(&self) -> Report {
        self.report(views::top_colors(&self.table, self.config.views.top_colors))
    }

    pub fn mean_selling_price(&self) -> Report {
        self.report(views::mean_selling_price(&self.table))
    }

    pub fn mean_rating(&self) -> Report {
        self.report(views::mean_rating(&self.table, self.config.views.rating_cutoff))
    }

    pub fn mean_discount(&self) -> Report {
        self.report(views::mean_discount(&self.table))
    }

    pub fn top_discounts(&self) -> Report {
        self.report(views::top_discounts(&self.table, self.config.views.top_discounts))
    }

    pub fn revenue(&self) -> Report {
        self.report(views::revenue(&self.table))
    }

    /// Compute one view and its chart.
    pub fn build(&self, kind: ViewKind) -> Result<Report> {
        let report = match kind {
            ViewKind::BrandDistribution => self.brand_distribution()?,
            ViewKind::ModelsPerBrand => self.models_per_brand(),
            ViewKind::BrandLeaders => self.brand_leaders(),
            ViewKind::TopProducts => self.top_products(),
            ViewKind::BrandModels => self.brand_models(),
            ViewKind::TopColors => self.top_colors(),
            ViewKind::MeanSellingPrice => self.mean_selling_price(),
            ViewKind::MeanRating => self.mean_rating(),
            ViewKind::MeanDiscount => self.mean_discount(),
            ViewKind::TopDiscounts => self.top_discounts(),
            ViewKind::Revenue => self.revenue(),
        };
        Ok(report)
    }

    /// Compute every view, in report order.
    pub fn build_all(&self) -> Vec<(ViewKind, Result<Report>)> {
        ViewKind::ALL
            .iter()
            .map(|&kind| (kind, self.build(kind)))
            .collect()
    }

    /// Render and write every view, then the index page and manifest.
    ///
    /// A failing view is recorded and the remaining views still run.
    pub fn run(&self, renderer: &dyn ChartRenderer, writer: &ArtifactWriter) -> RunSummary {
        let generated_at = Utc::now();
        let mut records = Vec::with_capacity(ViewKind::ALL.len());

        for (kind, built) in self.build_all() {
            let (title, slug) = match &built {
                Ok(report) => (report.view.title.clone(), report.view.slug.clone()),
                Err(_) => (kind.to_string(), kind.slug().to_string()),
            };

            let outcome = match built.and_then(|report| self.write_view(&report, renderer, writer))
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(view = %slug, error = %e, "view failed");
                    ViewOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            records.push(ViewRecord {
                kind,
                number: kind.number(),
                title,
                slug,
                outcome,
            });
        }

        let dashboard = ArtifactOutcome::from_result(
            self.write_dashboard(generated_at, &records, writer),
            DASHBOARD_FILE,
        );
        let manifest = ArtifactOutcome::from_result(
            self.write_manifest(generated_at, &records, writer),
            MANIFEST_FILE,
        );

        let summary = RunSummary {
            generated_at,
            output_dir: writer.dir().to_path_buf(),
            views: records,
            dashboard,
            manifest,
        };

        info!(
            dir = %writer.dir().display(),
            rendered = summary.rendered(),
            empty = summary.empty(),
            failed = summary.failures(),
            "report complete"
        );

        summary
    }

    fn write_view(
        &self,
        report: &Report,
        renderer: &dyn ChartRenderer,
        writer: &ArtifactWriter,
    ) -> Result<ViewOutcome> {
        let view = &report.view;
        let rows = view.len();
        if view.is_empty() {
            warn!(view = %view.slug, "view has no rows");
        }

        let artifact = renderer.render(view, &report.chart)?;
        let path = writer.write(&artifact)?;
        debug!(view = %view.slug, rows, path = %path.display(), "rendered view");

        Ok(ViewOutcome::Rendered {
            path,
            rows,
            empty: rows == 0,
        })
    }

    fn write_dashboard(
        &self,
        generated_at: DateTime<Utc>,
        records: &[ViewRecord],
        writer: &ArtifactWriter,
    ) -> Result<PathBuf> {
        let entries: Vec<DashboardEntry> = records
            .iter()
            .map(|record| match &record.outcome {
                ViewOutcome::Rendered { path, rows, empty } => DashboardEntry {
                    number: record.number,
                    title: record.title.clone(),
                    href: path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned()),
                    detail: if *empty {
                        "no data".to_string()
                    } else {
                        format!("{} rows", rows)
                    },
                },
                ViewOutcome::Failed { error } => DashboardEntry {
                    number: record.number,
                    title: record.title.clone(),
                    href: None,
                    detail: error.clone(),
                },
            })
            .collect();

        let heading = match &self.source {
            Some(source) => format!("Mobile Sales Report: {}", source.file),
            None => "Mobile Sales Report".to_string(),
        };
        let html = render_dashboard(&heading, generated_at, &entries);
        writer.write_file(DASHBOARD_FILE, html.as_bytes())
    }

    fn write_manifest(
        &self,
        generated_at: DateTime<Utc>,
        records: &[ViewRecord],
        writer: &ArtifactWriter,
    ) -> Result<PathBuf> {
        let manifest = Manifest {
            generated_at,
            source: self.source.as_ref(),
            cleaning: self.cleaning.as_ref(),
            settings: &self.config.views,
            views: records,
        };
        let json = serde_json::to_vec_pretty(&manifest)?;
        writer.write_file(MANIFEST_FILE, &json)
    }
}
