//! CSV batch driver.
//!
//! Reads alarm ids from a CSV file with a `raw_alarm_id` column, migrates
//! them one after another and writes `<stem>_results.csv` next to the input
//! with `migration_status` and `processed_at` appended to every row.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

use crate::config::AppConfig;
use crate::migrate::{MigrationOutcome, run_migration};

pub const ID_COLUMN: &str = "raw_alarm_id";
pub const STATUS_COLUMN: &str = "migration_status";
pub const PROCESSED_AT_COLUMN: &str = "processed_at";

/// Errors that stop a batch before or after the migrations run.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("CSV file {} has no 'raw_alarm_id' column", .path.display())]
    MissingIdColumn { path: PathBuf },
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error(
        "line {line} of {} has {found} fields but the header has {expected}",
        .path.display()
    )]
    RowTooWide {
        path: PathBuf,
        line: u64,
        found: usize,
        expected: usize,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Totals of a finished batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub output_path: PathBuf,
}

/// Path of the results file written for `input`: `<stem>_results.csv`.
pub fn results_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "alarms".to_string());
    input.with_file_name(format!("{stem}_results.csv"))
}

/// One input row and the alarm id it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub fields: Vec<String>,
    pub raw_alarm_id: String,
}

/// Read the header and rows of `path`, locating the id column.
pub fn read_rows(path: &Path) -> Result<(Vec<String>, Vec<BatchRow>), BatchError> {
    if !path.exists() {
        return Err(BatchError::NotFound(path.to_path_buf()));
    }

    let read_error = |source| BatchError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(read_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(read_error)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let id_index = headers
        .iter()
        .position(|h| h == ID_COLUMN)
        .ok_or_else(|| BatchError::MissingIdColumn {
            path: path.to_path_buf(),
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_error)?;
        if record.len() > headers.len() {
            return Err(BatchError::RowTooWide {
                path: path.to_path_buf(),
                line: record.position().map_or(0, |pos| pos.line()),
                found: record.len(),
                expected: headers.len(),
            });
        }
        // Short rows are padded so every result row lines up with the header
        let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
        fields.resize(headers.len(), String::new());
        let raw_alarm_id = fields[id_index].trim().to_string();
        rows.push(BatchRow {
            fields,
            raw_alarm_id,
        });
    }

    Ok((headers, rows))
}

/// Migrate every alarm listed in `path` and write the results file.
///
/// A failed row is recorded in the results and never stops the batch.
pub async fn run_batch(config: &AppConfig, path: &Path) -> Result<BatchSummary, BatchError> {
    let (mut headers, rows) = read_rows(path)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Processing alarms from CSV");

    headers.push(STATUS_COLUMN.to_string());
    headers.push(PROCESSED_AT_COLUMN.to_string());

    let mut results = Vec::with_capacity(rows.len());
    let mut successful = 0;

    for row in rows {
        let outcome = if row.raw_alarm_id.is_empty() {
            MigrationOutcome::Error("empty raw_alarm_id".to_string())
        } else {
            run_migration(config, &row.raw_alarm_id).await.outcome
        };

        if outcome.is_success() {
            successful += 1;
        }

        let mut fields = row.fields;
        fields.push(outcome.to_string());
        fields.push(Utc::now().to_rfc3339());
        results.push(fields);
    }

    let output_path = results_path(path);
    write_results(&output_path, &headers, &results)?;

    let summary = BatchSummary {
        total: results.len(),
        successful,
        failed: results.len() - successful,
        output_path,
    };
    tracing::info!(
        total = summary.total,
        successful = summary.successful,
        failed = summary.failed,
        output = %summary.output_path.display(),
        "Batch processing complete"
    );
    Ok(summary)
}

fn write_results(
    output_path: &Path,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<(), BatchError> {
    let write_error = |source| BatchError::Write {
        path: output_path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(output_path).map_err(write_error)?;
    writer.write_record(headers).map_err(write_error)?;
    for row in rows {
        writer.write_record(row).map_err(write_error)?;
    }
    writer
        .flush()
        .map_err(|err| write_error(csv::Error::from(err)))?;
    Ok(())
}
