//! Clean command - export the cleaned table as CSV.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use colored::Colorize;
use salesview::DatasetLoader;

use super::load_config;

pub fn run(
    file: PathBuf,
    output: PathBuf,
    config_path: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path.as_deref())?;
    let dataset = DatasetLoader::with_config(config.parser).load(&file)?;
    let report = dataset.report;

    let writer = BufWriter::new(File::create(&output).map_err(|e| {
        format!("Failed to create {}: {}", output.display(), e)
    })?);
    dataset.table.write_csv(writer)?;

    if verbose {
        println!(
            "  {} duplicates and {} incomplete rows removed",
            report.duplicates_removed, report.incomplete_removed
        );
    }
    println!(
        "{} {} of {} rows written to {}",
        "Cleaned:".green().bold(),
        report.rows_kept,
        report.rows_read,
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "Brands;Models;Mobile;Colors;Selling Price;Original Price;Discount;Rating\n\
                        Apple;13;Apple iPhone 13;Blue;60000;69900;9900;4.6\n\
                        Apple;14;Apple iPhone 14;Black;70000;79900;9900;4.7\n\
                        Nokia;N1;Nokia N1;Blue;9000;10000;1000;3.9\n";

    #[test]
    fn test_clean_honors_parser_config() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sales.csv");
        let config = dir.path().join("salesview.toml");
        let output = dir.path().join("clean.csv");
        std::fs::write(&input, DATA).unwrap();
        std::fs::write(&config, "[parser]\ndelimiter = \";\"\nmax_rows = 2\n").unwrap();

        run(input, output.clone(), Some(config), false).unwrap();

        let cleaned = std::fs::read_to_string(&output).unwrap();
        assert_eq!(cleaned.lines().count(), 3);
        assert!(cleaned.contains("Apple iPhone 14"));
        assert!(!cleaned.contains("Nokia"));
    }

    #[test]
    fn test_clean_without_config_reads_everything() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sales.csv");
        let output = dir.path().join("clean.csv");
        std::fs::write(&input, DATA).unwrap();

        run(input, output.clone(), None, false).unwrap();

        let cleaned = std::fs::read_to_string(&output).unwrap();
        assert_eq!(cleaned.lines().count(), 4);
    }
}
