//! Salesview CLI - charts and summaries from mobile sales listings.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Exit code when a report was written but some views failed.
const EXIT_PARTIAL: i32 = 2;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            file,
            output,
            config,
            threshold,
            brand,
        } => commands::generate::run(file, output, config, threshold, brand, cli.verbose),

        Commands::Inspect { file, json, config } => {
            commands::inspect::run(file, json, config, cli.verbose).map(|()| 0)
        }

        Commands::Clean {
            file,
            output,
            config,
        } => commands::clean::run(file, output, config, cli.verbose).map(|()| 0),

        Commands::Serve {
            dir,
            port,
            host,
            open,
        } => commands::serve::run(dir, port, host, open, cli.verbose).map(|()| 0),
    };

    match result {
        Ok(0) => {}
        Ok(_) => std::process::exit(EXIT_PARTIAL),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
