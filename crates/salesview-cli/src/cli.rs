//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Salesview: charts and summaries from mobile sales listings
#[derive(Parser)]
#[command(name = "salesview")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a sales file and write one chart per view
    Generate {
        /// Path to the sales data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output directory for the charts (default: charts)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Rows a brand needs to get its own slice in the brand distribution
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<i64>,

        /// Brand whose models are charted
        #[arg(long)]
        brand: Option<String>,
    },

    /// Print the cleaning summary and every view without writing files
    Inspect {
        /// Path to the sales data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON, including chart specifications
        #[arg(long)]
        json: bool,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Export the cleaned table as CSV
    Clean {
        /// Path to the sales data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the cleaned CSV
        #[arg(short, long)]
        output: PathBuf,

        /// TOML configuration file (parser settings)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Serve a chart directory over HTTP
    Serve {
        /// Directory to serve
        #[arg(value_name = "DIR", default_value = "charts")]
        dir: PathBuf,

        /// Port for the web server
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Open the index page in a browser
        #[arg(long)]
        open: bool,
    },
}
