//! Builds `parsed_logs.csv` from a folder of per-alarm migration logs.

use std::path::PathBuf;

use alarm_migrator::{config::ConfigLoader, log_index::index_folder, telemetry};
use anyhow::{Context, Result};
use clap::Parser;

/// Extract alarm log info to CSV
#[derive(Debug, Parser)]
#[command(name = "index-migration-logs", version)]
struct Cli {
    /// Folder containing .log files
    folder_path: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new()
        .load()
        .context("loading configuration")?;
    telemetry::init_tracing(&config)?;

    let (output_path, count) = index_folder(&cli.folder_path)
        .with_context(|| format!("indexing {}", cli.folder_path.display()))?;

    println!(
        "Parsed {} files. Output written to: {}",
        count,
        output_path.display()
    );
    Ok(())
}
