//! Migration orchestrator.
//!
//! Runs one alarm through fetch, duplicate check, dependency resolution,
//! assembly and persistence, in that order, with no retries. Only a missing
//! source alarm, a duplicate or an unreachable database stops the run early;
//! dependency failures degrade the affected link to unset.

use std::fmt;

use sea_orm::DatabaseConnection;
use tracing::Instrument;

use super::alarm_type::{TypeMatch, map_alarm_type};
use super::alarm_update::migrate_updates;
use super::assembler::{AlarmDraft, ResolvedLinks};
use super::door::migrate_door;
use super::duplicate_guard;
use super::employee::migrate_employee;
use super::media::migrate_media;
use super::ml::migrate_ml_output;
use super::resolver::Resolution;
use crate::config::{AppConfig, DestinationConfig};
use crate::db::{self, ConnectionSettings, DbRole};
use crate::error::MigrationError;
use crate::repositories::RawAlarmRepository;
use crate::telemetry::AlarmLogFile;

/// Terminal outcome of one alarm migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    Success,
    DuplicateSkipped,
    SourceNotFound,
    ConnectionFailed,
    Error(String),
}

impl MigrationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MigrationOutcome::Success)
    }

    /// Stable label used in metrics
    pub fn label(&self) -> &'static str {
        match self {
            MigrationOutcome::Success => "success",
            MigrationOutcome::DuplicateSkipped => "duplicate_skipped",
            MigrationOutcome::SourceNotFound => "source_not_found",
            MigrationOutcome::ConnectionFailed => "connection_failed",
            MigrationOutcome::Error(_) => "error",
        }
    }
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationOutcome::Success => f.write_str("Success"),
            MigrationOutcome::DuplicateSkipped => f.write_str("Duplicate alarm detected, skipped."),
            MigrationOutcome::SourceNotFound => f.write_str("Raw alarm not found"),
            MigrationOutcome::ConnectionFailed => f.write_str("Failed to connect to DB"),
            MigrationOutcome::Error(reason) => write!(f, "Error: {reason}"),
        }
    }
}

/// Stages of a single migration, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchSource,
    DuplicateCheck,
    ResolveDependencies,
    Assemble,
    Persist,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::FetchSource => "fetch_source",
            Stage::DuplicateCheck => "duplicate_check",
            Stage::ResolveDependencies => "resolve_dependencies",
            Stage::Assemble => "assemble",
            Stage::Persist => "persist",
        }
    }
}

/// Summary of one migration attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationReport {
    pub raw_alarm_id: String,
    pub outcome: MigrationOutcome,
    /// Identifier of the inserted destination alarm
    pub new_alarm_id: Option<String>,
    pub door: Option<Resolution>,
    pub employee: Option<Resolution>,
    pub alarm_type_match: Option<TypeMatch>,
    pub links: ResolvedLinks,
}

impl MigrationReport {
    /// Report for a migration that ended without writing an alarm.
    pub fn ended(raw_alarm_id: &str, outcome: MigrationOutcome) -> Self {
        Self {
            raw_alarm_id: raw_alarm_id.to_string(),
            outcome,
            new_alarm_id: None,
            door: None,
            employee: None,
            alarm_type_match: None,
            links: ResolvedLinks::default(),
        }
    }
}

/// Migrates alarms between two open connections.
pub struct AlarmMigrator<'a> {
    source: &'a DatabaseConnection,
    dest: &'a DatabaseConnection,
    target: &'a DestinationConfig,
}

impl<'a> AlarmMigrator<'a> {
    pub fn new(
        source: &'a DatabaseConnection,
        dest: &'a DatabaseConnection,
        target: &'a DestinationConfig,
    ) -> Self {
        Self {
            source,
            dest,
            target,
        }
    }

    /// Migrate the source alarm `raw_alarm_id` and its dependents.
    pub async fn migrate(&self, raw_alarm_id: &str) -> Result<MigrationReport, MigrationError> {
        let original = RawAlarmRepository::new(self.source)
            .get_by_id(raw_alarm_id)
            .await
            .map_err(|source| MigrationError::Query {
                stage: Stage::FetchSource.as_str(),
                source,
            })?
            .ok_or_else(|| MigrationError::SourceNotFound {
                raw_alarm_id: raw_alarm_id.to_string(),
            })?;
        tracing::info!(source_id = %original.source_id, "Original alarm fetched");

        let partition_key = self.target.partition_key_for(original.partition_key);
        let existing = duplicate_guard::check(
            self.dest,
            &original.source_id,
            &self.target.tenant_id,
            partition_key,
        )
        .await
        .map_err(|source| MigrationError::Query {
            stage: Stage::DuplicateCheck.as_str(),
            source,
        })?;

        if let Some(existing) = existing {
            tracing::warn!(
                source_id = %original.source_id,
                tenant_id = %self.target.tenant_id,
                partition_key,
                "Duplicate alarm detected in destination, skipping migration"
            );
            let context = duplicate_guard::gather_context(self.dest, existing).await;
            duplicate_guard::report(&context);
            return Err(MigrationError::DuplicateDetected {
                source_id: original.source_id,
                tenant_id: self.target.tenant_id.clone(),
                partition_key,
            });
        }

        tracing::debug!(stage = Stage::ResolveDependencies.as_str(), "Resolving dependencies");
        let door = migrate_door(
            self.source,
            self.dest,
            original.door_id.as_deref(),
            self.target,
        )
        .await;
        let employee = migrate_employee(
            self.source,
            self.dest,
            original.employee_id.as_deref(),
            self.target,
        )
        .await;
        let alarm_type =
            map_alarm_type(self.source, self.dest, &original.alarm_type_id, self.target).await;

        let draft = AlarmDraft::start();
        let latest_alarm_media_id =
            migrate_media(self.source, self.dest, &original.id, &draft.id).await;
        let ml_output_id = migrate_ml_output(
            self.source,
            self.dest,
            original.ml_output_id.as_deref(),
            &draft.id,
            self.target,
        )
        .await;
        let alarm_update_id =
            migrate_updates(self.source, self.dest, &original.id, &draft.id, self.target).await;

        let links = ResolvedLinks {
            alarm_type_id: alarm_type.alarm_type_id.clone(),
            door_id: door.as_ref().map(|d| d.id().to_string()),
            employee_id: employee.as_ref().map(|e| e.id().to_string()),
            latest_alarm_media_id,
            alarm_update_id,
            ml_output_id,
        };

        tracing::debug!(stage = Stage::Assemble.as_str(), new_alarm_id = %draft.id, "Assembling alarm");
        let alarm = draft.assemble(&original, &links, self.target);

        tracing::info!(new_alarm_id = %draft.id, "Inserting raw alarm");
        if let Err(source) = RawAlarmRepository::new(self.dest).insert(alarm).await {
            // Dependents written above stay in place; list them for manual cleanup
            tracing::error!(
                new_alarm_id = %draft.id,
                door_created = door.as_ref().is_some_and(Resolution::was_created),
                door_id = ?links.door_id,
                employee_created = employee.as_ref().is_some_and(Resolution::was_created),
                employee_id = ?links.employee_id,
                media_id = ?links.latest_alarm_media_id,
                ml_output_id = ?links.ml_output_id,
                alarm_update_id = ?links.alarm_update_id,
                error = %source,
                "Failed to insert raw alarm, dependent rows left in destination"
            );
            return Err(MigrationError::PersistFailure {
                alarm_id: draft.id,
                source,
            });
        }

        tracing::info!(new_alarm_id = %draft.id, "Raw alarm inserted");

        Ok(MigrationReport {
            raw_alarm_id: raw_alarm_id.to_string(),
            outcome: MigrationOutcome::Success,
            new_alarm_id: Some(draft.id),
            door,
            employee,
            alarm_type_match: Some(alarm_type.matched),
            links,
        })
    }
}

/// Migrate one alarm end to end: connect, migrate, close, report.
///
/// Never fails; every error is folded into the report's outcome. Both
/// connections are closed on every path.
pub async fn run_migration(config: &AppConfig, raw_alarm_id: &str) -> MigrationReport {
    let _log_file = match AlarmLogFile::attach(&config.log_dir, raw_alarm_id) {
        Ok(guard) => Some(guard),
        Err(err) => {
            tracing::warn!(raw_alarm_id, log_dir = %config.log_dir.display(), error = %err, "Could not create alarm log file");
            None
        }
    };

    let span = tracing::info_span!("migrate_alarm", raw_alarm_id = %raw_alarm_id);
    let report = connect_and_migrate(config, raw_alarm_id)
        .instrument(span)
        .await;

    metrics::counter!("alarm_migrations_total", "outcome" => report.outcome.label()).increment(1);
    tracing::info!(raw_alarm_id, outcome = %report.outcome, "Migration finished");
    report
}

async fn connect_and_migrate(config: &AppConfig, raw_alarm_id: &str) -> MigrationReport {
    tracing::info!("Starting alarm migration");
    let settings = ConnectionSettings::from(config);

    let source = match db::connect(DbRole::Source, &config.source_database_url, &settings).await {
        Ok(conn) => conn,
        Err(err) => return connection_failed(raw_alarm_id, DbRole::Source, err),
    };

    let dest = match db::connect(
        DbRole::Destination,
        &config.destination_database_url,
        &settings,
    )
    .await
    {
        Ok(conn) => conn,
        Err(err) => {
            db::close(DbRole::Source, source).await;
            return connection_failed(raw_alarm_id, DbRole::Destination, err);
        }
    };

    let result = AlarmMigrator::new(&source, &dest, &config.destination)
        .migrate(raw_alarm_id)
        .await;

    db::close(DbRole::Source, source).await;
    db::close(DbRole::Destination, dest).await;
    tracing::debug!("Connections closed");

    match result {
        Ok(report) => report,
        Err(err) => {
            match &err {
                MigrationError::DuplicateDetected { .. } => {
                    tracing::warn!(error = %err, "Migration skipped")
                }
                _ => tracing::error!(error = %err, "Migration failed"),
            }
            MigrationReport::ended(raw_alarm_id, err.outcome())
        }
    }
}

fn connection_failed(
    raw_alarm_id: &str,
    role: DbRole,
    source: db::DatabaseError,
) -> MigrationReport {
    let err = MigrationError::ConnectivityFailure { role, source };
    tracing::error!(error = %err, "Failed to connect to database");
    MigrationReport::ended(raw_alarm_id, err.outcome())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display_and_labels() {
        assert_eq!(MigrationOutcome::Success.to_string(), "Success");
        assert_eq!(
            MigrationOutcome::DuplicateSkipped.to_string(),
            "Duplicate alarm detected, skipped."
        );
        assert_eq!(
            MigrationOutcome::Error("boom".to_string()).to_string(),
            "Error: boom"
        );
        assert_eq!(MigrationOutcome::ConnectionFailed.label(), "connection_failed");
        assert!(!MigrationOutcome::SourceNotFound.is_success());
    }

    #[test]
    fn test_ended_report_has_no_links() {
        let report = MigrationReport::ended("a-1", MigrationOutcome::SourceNotFound);
        assert_eq!(report.new_alarm_id, None);
        assert_eq!(report.links, ResolvedLinks::default());
    }
}
