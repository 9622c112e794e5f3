//! Generate command - clean a sales file and write one chart per view.

use std::path::PathBuf;

use colored::Colorize;
use salesview::{ArtifactOutcome, ArtifactWriter, Pipeline, PlotlyHtmlRenderer, ViewOutcome};

use super::load_config;

/// Returns the number of failed artifacts.
pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    threshold: Option<i64>,
    brand: Option<String>,
    verbose: bool,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(dir) = output {
        config.output_dir = dir;
    }
    if let Some(threshold) = threshold {
        config.views.brand_threshold = threshold;
    }
    if let Some(brand) = brand {
        config.views.focus_brand = brand;
    }
    config.validate()?;

    println!(
        "{} {}",
        "Generating report for".cyan().bold(),
        file.display().to_string().white()
    );

    let renderer = PlotlyHtmlRenderer::from_source(&config.plotly_js)?;
    let pipeline = Pipeline::load(&file, config)?;
    let writer = ArtifactWriter::create(&pipeline.config().output_dir)?;

    if let Some(report) = pipeline.cleaning() {
        println!(
            "  Rows: {} read, {} duplicates, {} incomplete, {} kept",
            report.rows_read,
            report.duplicates_removed,
            report.incomplete_removed,
            report.rows_kept.to_string().white().bold()
        );
    }
    if verbose {
        if let Some(source) = pipeline.source() {
            println!("  Source: {} ({}, {})", source.path.display(), source.format, source.hash);
        }
    }
    println!();

    let summary = pipeline.run(&renderer, &writer);

    for record in &summary.views {
        match &record.outcome {
            ViewOutcome::Rendered { path, empty, .. } if *empty => println!(
                "  {} {:>2}. {} {} {}",
                "!".yellow().bold(),
                record.number,
                record.title,
                "(no data)".yellow(),
                path.display().to_string().dimmed()
            ),
            ViewOutcome::Rendered { path, rows, .. } => println!(
                "  {} {:>2}. {} ({} rows) {}",
                "✓".green().bold(),
                record.number,
                record.title,
                rows,
                path.display().to_string().dimmed()
            ),
            ViewOutcome::Failed { error } => println!(
                "  {} {:>2}. {} {}",
                "✗".red().bold(),
                record.number,
                record.title,
                error.red()
            ),
        }
    }

    println!();
    for (name, outcome) in [("Dashboard", &summary.dashboard), ("Manifest", &summary.manifest)] {
        match outcome {
            ArtifactOutcome::Written { path } => println!("  {}: {}", name, path.display()),
            ArtifactOutcome::Failed { error } => {
                println!("  {}: {}", name, error.red())
            }
        }
    }
    println!();

    let failures = summary.failures();
    if failures == 0 {
        println!(
            "{} {} views written to {}",
            "Done.".green().bold(),
            summary.rendered(),
            summary.output_dir.display()
        );
    } else {
        println!(
            "{} {} of {} artifacts failed",
            "Warning:".yellow().bold(),
            failures,
            summary.views.len() + 2
        );
    }

    Ok(failures)
}
