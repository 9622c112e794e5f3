//! Serve command - share a chart directory over HTTP.

use std::path::PathBuf;

use colored::Colorize;

use crate::server::app;

pub fn run(
    dir: PathBuf,
    port: u16,
    host: String,
    open_browser: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        return Err(format!(
            "Directory not found: {}\nRun 'salesview generate <FILE>' first.",
            dir.display()
        )
        .into());
    }

    let browse_host = if host == "0.0.0.0" { "localhost" } else { host.as_str() };
    let url = format!("http://{}:{}/", browse_host, port);

    println!();
    println!(
        "{} {}",
        "Serving charts at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Directory: {}", dir.display());
    if verbose {
        println!("  Bound to: {}:{}", host, port);
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if open_browser {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(dir, &host, port))
}
