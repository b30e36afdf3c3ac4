//! Index of per-alarm migration log files.
//!
//! Scans a log folder for `<raw_alarm_id>_<YYYYMMDD>_<HHMMSS>.log` and
//! `<raw_alarm_id>.log` files and writes `parsed_logs.csv` listing each
//! alarm id with the time its log was started.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use thiserror::Error;

pub const OUTPUT_FILE: &str = "parsed_logs.csv";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATED_LOG: &str = r"^(?P<id>[^_]+)_(?P<date>\d{8})_(?P<time>\d{6})\.log$";
const UNDATED_LOG: &str = r"^(?P<id>[^_]+)\.log$";

static DEFAULT_PATTERNS: LazyLock<Result<LogNamePatterns, regex::Error>> =
    LazyLock::new(|| LogNamePatterns::compile(DATED_LOG, UNDATED_LOG));

/// Compiled file name patterns for dated and undated alarm logs.
#[derive(Debug, Clone)]
pub struct LogNamePatterns {
    dated: Regex,
    undated: Regex,
}

impl LogNamePatterns {
    /// Compile `dated` (with `id`, `date` and `time` groups) and `undated`
    /// (with an `id` group).
    pub fn compile(dated: &str, undated: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            dated: Regex::new(dated)?,
            undated: Regex::new(undated)?,
        })
    }

    /// The patterns matching `<id>_<YYYYMMDD>_<HHMMSS>.log` and `<id>.log`.
    pub fn standard() -> Result<&'static Self, LogIndexError> {
        DEFAULT_PATTERNS
            .as_ref()
            .map_err(|err| LogIndexError::Pattern(err.clone()))
    }

    /// Parse a log file name, returning `None` for names that match neither
    /// pattern.
    pub fn parse(&self, file_name: &str) -> Option<LogEntry> {
        if let Some(caps) = self.dated.captures(file_name) {
            let stamp = format!("{} {}", &caps["date"], &caps["time"]);
            let started_at = NaiveDateTime::parse_from_str(&stamp, "%Y%m%d %H%M%S").ok()?;
            return Some(LogEntry {
                raw_alarm_id: caps["id"].to_string(),
                started_at: Some(started_at),
            });
        }

        self.undated.captures(file_name).map(|caps| LogEntry {
            raw_alarm_id: caps["id"].to_string(),
            started_at: None,
        })
    }
}

/// Errors raised while indexing a log folder.
#[derive(Debug, Error)]
pub enum LogIndexError {
    #[error("invalid log file name pattern: {0}")]
    Pattern(#[source] regex::Error),
    #[error("failed to read log folder {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// One indexed log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub raw_alarm_id: String,
    pub started_at: Option<NaiveDateTime>,
}

/// Parse a log file name with the standard patterns.
pub fn parse_log_file_name(file_name: &str) -> Result<Option<LogEntry>, LogIndexError> {
    Ok(LogNamePatterns::standard()?.parse(file_name))
}

/// Index every `.log` file in `folder`, oldest first, undated entries last.
pub fn collect_entries(folder: &Path) -> Result<Vec<LogEntry>, LogIndexError> {
    let patterns = LogNamePatterns::standard()?;
    let read_dir = fs::read_dir(folder).map_err(|source| LogIndexError::ReadDir {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|source| LogIndexError::ReadDir {
            path: folder.to_path_buf(),
            source,
        })?;
        let file_name = dir_entry.file_name().to_string_lossy().into_owned();
        if !file_name.ends_with(".log") {
            continue;
        }

        match patterns.parse(&file_name) {
            Some(entry) => entries.push(entry),
            None => tracing::warn!(file_name = %file_name, "Skipping log file with unexpected name"),
        }
    }

    // None sorts before Some, so order on (is undated, timestamp)
    entries.sort_by(|a, b| {
        (a.started_at.is_none(), a.started_at, &a.raw_alarm_id).cmp(&(
            b.started_at.is_none(),
            b.started_at,
            &b.raw_alarm_id,
        ))
    });
    Ok(entries)
}

/// Write `<folder>/parsed_logs.csv` and return its path and row count.
pub fn index_folder(folder: &Path) -> Result<(PathBuf, usize), LogIndexError> {
    let entries = collect_entries(folder)?;
    let output_path = folder.join(OUTPUT_FILE);

    let write_error = |source| LogIndexError::Write {
        path: output_path.clone(),
        source,
    };

    let mut writer = csv::Writer::from_path(&output_path).map_err(write_error)?;
    writer
        .write_record(["raw_alarm_id", "timestamp"])
        .map_err(write_error)?;
    for entry in &entries {
        let timestamp = entry
            .started_at
            .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default();
        writer
            .write_record([entry.raw_alarm_id.as_str(), timestamp.as_str()])
            .map_err(write_error)?;
    }
    writer
        .flush()
        .map_err(|err| write_error(csv::Error::from(err)))?;

    tracing::info!(files = entries.len(), output = %output_path.display(), "Indexed migration logs");
    Ok((output_path, entries.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_dated_name() {
        let entry = parse_log_file_name("3f2a-9c1d_20250307_140509.log")
            .unwrap()
            .unwrap();
        assert_eq!(entry.raw_alarm_id, "3f2a-9c1d");
        assert_eq!(
            entry.started_at,
            NaiveDate::from_ymd_opt(2025, 3, 7).and_then(|d| d.and_hms_opt(14, 5, 9))
        );
    }

    #[test]
    fn test_parse_undated_and_malformed_names() {
        let patterns = LogNamePatterns::standard().unwrap();
        assert_eq!(
            patterns.parse("3f2a-9c1d.log"),
            Some(LogEntry {
                raw_alarm_id: "3f2a-9c1d".to_string(),
                started_at: None,
            })
        );
        assert_eq!(patterns.parse("a_b.log"), None);
        assert_eq!(patterns.parse("a_20251399_000000.log"), None);
        assert_eq!(patterns.parse("a_b_c_d.log"), None);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = LogNamePatterns::compile(r"^(?P<id>[^_]+", UNDATED_LOG).unwrap_err();
        let err = LogIndexError::Pattern(err);
        assert!(err.to_string().starts_with("invalid log file name pattern"));
    }

    #[test]
    fn test_index_folder_sorts_and_skips() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "late_20250102_000000.log",
            "undated.log",
            "early_20250101_093000.log",
            "bad_name_here_x.log",
            "notes.txt",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let (path, count) = index_folder(dir.path()).unwrap();
        assert_eq!(count, 3);

        let written = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            vec![
                "raw_alarm_id,timestamp",
                "early,2025-01-01 09:30:00",
                "late,2025-01-02 00:00:00",
                "undated,",
            ]
        );
    }
}
