//! # Alarm Migrator Entry Point
//!
//! Migrates one raw alarm by id, or every alarm listed in a CSV file.

use std::path::PathBuf;
use std::process::ExitCode;

use alarm_migrator::{
    batch::run_batch,
    config::{AppConfig, ConfigLoader},
    migrate::{MigrationOutcome, run_migration},
    telemetry,
};
use anyhow::{Context, Result, bail};
use clap::Parser;

/// Migrate a raw alarm and its dependents to the destination database
#[derive(Debug, Parser)]
#[command(name = "alarm-migrator", version)]
struct Cli {
    /// Id of the raw alarm to migrate
    raw_alarm_id: Option<String>,

    /// Process alarms in batch from a CSV file
    #[arg(long)]
    batch: bool,

    /// Path to the CSV file used with --batch
    #[arg(long, default_value = "alarms.csv")]
    csv: PathBuf,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = ConfigLoader::new()
        .load()
        .context("loading configuration")?;
    telemetry::init_tracing(&config)?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }

    // One alarm at a time; no work runs concurrently
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(cli, config))
}

async fn run(cli: Cli, config: AppConfig) -> Result<ExitCode> {
    if cli.batch {
        let summary = run_batch(&config, &cli.csv).await?;
        println!(
            "Total: {}, successful: {}, failed: {}. Results written to {}",
            summary.total,
            summary.successful,
            summary.failed,
            summary.output_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let Some(raw_alarm_id) = cli.raw_alarm_id.as_deref() else {
        bail!("Please provide either --batch or a raw alarm id");
    };

    let report = run_migration(&config, raw_alarm_id).await;
    println!("{}: {}", report.raw_alarm_id, report.outcome);

    Ok(match report.outcome {
        MigrationOutcome::Success | MigrationOutcome::DuplicateSkipped => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
