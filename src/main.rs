//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `url_resolver` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use url_resolver::initialization::init_logger_with;
use url_resolver::{print_batch_summary, render, run_batch, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse().clamped();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let output = config.output;
    let report = match run_batch(config).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("url_resolver error: {e:#}");
            process::exit(1);
        }
    };

    for result in &report.results {
        let rendered = render(result, output).context("Failed to render result")?;
        println!("{}", rendered.trim_end());
    }

    if report.results.len() > 1 {
        print_batch_summary(&report.stats, report.elapsed_seconds);
    }

    if report.failed() > 0 {
        process::exit(1);
    }
    Ok(())
}
