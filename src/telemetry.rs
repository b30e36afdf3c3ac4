//! Telemetry utilities: global subscriber management and per-alarm log files.

use std::any::type_name_of_val;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::LevelFilter;
use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::Layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::AppConfig;

/// Errors that can occur while initializing global telemetry.
#[derive(Debug, Error)]
pub enum TelemetryInitError {
    #[error("failed to install log tracer bridge: {0}")]
    LogTracer(#[from] log::SetLoggerError),
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] TryInitError),
}

static TELEMETRY_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// File receiving a copy of every event while a migration is running.
static ALARM_LOG_SINK: LazyLock<Mutex<Option<File>>> = LazyLock::new(|| Mutex::new(None));

fn alarm_log_sink() -> MutexGuard<'static, Option<File>> {
    ALARM_LOG_SINK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Initialize global tracing/logging exactly once, wiring `log::` macros into the tracing pipeline.
///
/// Later calls are no-ops. Fails when another global subscriber or logger
/// was installed first.
///
/// Besides the console layer, a plain-text layer mirrors every event into the
/// log file of the migration currently attached through [`AlarmLogFile`].
pub fn init_tracing(config: &AppConfig) -> Result<(), TelemetryInitError> {
    if TELEMETRY_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Ok(());
    }

    // Install log bridge first so `log::` macros (sqlx included) route through tracing.
    if let Err(err) = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init()
    {
        // A bridge installed by an earlier subscriber setup is fine
        let logger_type = type_name_of_val(log::logger());
        if !logger_type.contains("LogTracer") {
            TELEMETRY_INITIALIZED.store(false, Ordering::SeqCst);
            return Err(err.into());
        }
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let fmt_layer = match config.log_format.as_str() {
        "pretty" => fmt::layer().pretty().boxed(),
        _ => fmt::layer().json().boxed(),
    };

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(|| AlarmLogWriter)
        .boxed();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(file_layer)
        .try_init()
        .map_err(|err| {
            TELEMETRY_INITIALIZED.store(false, Ordering::SeqCst);
            TelemetryInitError::from(err)
        })
}

/// Writer handed to the file layer; drops output when no alarm log is attached.
struct AlarmLogWriter;

impl Write for AlarmLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match alarm_log_sink().as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match alarm_log_sink().as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// File name of the log written for one migration attempt:
/// `<raw_alarm_id>_<YYYYMMDD>_<HHMMSS>.log`.
pub fn alarm_log_file_name(raw_alarm_id: &str, started_at: DateTime<Utc>) -> String {
    format!(
        "{}_{}.log",
        raw_alarm_id,
        started_at.format("%Y%m%d_%H%M%S")
    )
}

/// Guard routing log events into a per-alarm file until dropped.
#[derive(Debug)]
pub struct AlarmLogFile {
    path: PathBuf,
}

impl AlarmLogFile {
    /// Create `<dir>/<raw_alarm_id>_<timestamp>.log` and start mirroring events into it.
    ///
    /// Any file attached by an earlier guard is replaced.
    pub fn attach(dir: &Path, raw_alarm_id: &str) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(alarm_log_file_name(raw_alarm_id, Utc::now()));
        let file = File::create(&path)?;

        *alarm_log_sink() = Some(file);

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for AlarmLogFile {
    fn drop(&mut self) {
        if let Some(mut file) = alarm_log_sink().take() {
            let _ = file.flush();
        }
    }
}
