//! Inspect command - print every view without writing files.

use std::path::PathBuf;

use colored::Colorize;
use salesview::{AggregateView, Pipeline};

use super::load_config;

pub fn run(
    file: PathBuf,
    json_output: bool,
    config_path: Option<PathBuf>,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path.as_deref())?;
    let pipeline = Pipeline::load(&file, config)?;

    if json_output {
        let mut views = Vec::new();
        for (kind, built) in pipeline.build_all() {
            views.push(match built {
                Ok(report) => serde_json::to_value(&report)?,
                Err(e) => serde_json::json!({ "kind": kind, "error": e.to_string() }),
            });
        }

        let output = serde_json::json!({
            "source": pipeline.source(),
            "cleaning": pipeline.cleaning(),
            "views": views,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Views for".cyan().bold(),
        file.display().to_string().white()
    );
    if let Some(report) = pipeline.cleaning() {
        println!();
        println!("  Rows read:           {}", report.rows_read);
        println!("  Duplicates removed:  {}", report.duplicates_removed);
        println!("  Incomplete removed:  {}", report.incomplete_removed);
        println!("  Rows kept:           {}", report.rows_kept.to_string().white().bold());
    }

    for (kind, built) in pipeline.build_all() {
        println!();
        match built {
            Ok(report) => print_view(&report.view),
            Err(e) => println!(
                "{} {}. {}: {}",
                "✗".red().bold(),
                kind.number(),
                kind,
                e.to_string().red()
            ),
        }
    }

    Ok(())
}

fn print_view(view: &AggregateView) {
    println!(
        "{} {}",
        format!("{}.", view.kind.number()).cyan().bold(),
        view.title.bold()
    );
    if view.is_empty() {
        println!("   {}", "(no data)".yellow());
        return;
    }

    let headers = view.headers();
    let rows = view.table_rows();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<String>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect();
        format!("   {}", padded.join("  ").trim_end())
    };

    let header_line = line(headers.iter().map(|h| h.to_string()).collect());
    println!("{}", header_line.dimmed());
    for row in rows {
        println!("{}", line(row));
    }
}
