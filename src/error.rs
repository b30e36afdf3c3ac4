//! # Error Handling
//!
//! Failure taxonomy for a single alarm migration. Connectivity, missing
//! source, duplicate and persist failures abort the migration; dependency
//! and batch failures are logged and degrade the affected link to unset.

use sea_orm::DbErr;
use thiserror::Error;

use crate::db::DbRole;
use crate::migrate::MigrationOutcome;

/// Errors raised while migrating one alarm.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("{role} database unreachable: {source}")]
    ConnectivityFailure {
        role: DbRole,
        #[source]
        source: crate::db::DatabaseError,
    },
    #[error("raw alarm {raw_alarm_id} not found in source database")]
    SourceNotFound { raw_alarm_id: String },
    #[error(
        "alarm with source_id={source_id}, tenant_id={tenant_id}, partition_key={partition_key} already exists"
    )]
    DuplicateDetected {
        source_id: String,
        tenant_id: String,
        partition_key: i32,
    },
    #[error("failed to resolve {entity} ({key}): {source}")]
    DependencyResolutionFailure {
        entity: &'static str,
        key: String,
        #[source]
        source: DbErr,
    },
    #[error("{batch} batch insert rolled back: {source}")]
    BatchInsertFailure {
        batch: &'static str,
        #[source]
        source: DbErr,
    },
    #[error("failed to persist alarm {alarm_id}: {source}")]
    PersistFailure {
        alarm_id: String,
        #[source]
        source: DbErr,
    },
    #[error("database error during {stage}: {source}")]
    Query {
        stage: &'static str,
        #[source]
        source: DbErr,
    },
}

impl MigrationError {
    /// Terminal outcome reported for a migration that ended with this error.
    pub fn outcome(&self) -> MigrationOutcome {
        match self {
            MigrationError::ConnectivityFailure { .. } => MigrationOutcome::ConnectionFailed,
            MigrationError::SourceNotFound { .. } => MigrationOutcome::SourceNotFound,
            MigrationError::DuplicateDetected { .. } => MigrationOutcome::DuplicateSkipped,
            other => MigrationOutcome::Error(other.to_string()),
        }
    }
}

/// Recognizes duplicate-key errors across Postgres, MySQL and SQLite.
pub fn is_unique_violation(error: &DbErr) -> bool {
    use sea_orm::RuntimeErr;

    const PG_UNIQUE: &str = "23505";
    const MYSQL_DUPLICATE_CODES: &[&str] = &["1022", "1062", "1169", "1586"];
    const SQLITE_DUPLICATE_CODES: &[&str] = &["1555", "2067"];

    let runtime_err = match error {
        DbErr::Query(RuntimeErr::SqlxError(sqlx_err))
        | DbErr::Exec(RuntimeErr::SqlxError(sqlx_err)) => sqlx_err,
        _ => return false,
    };

    let Some(db_error) = runtime_err.as_database_error() else {
        return false;
    };

    if db_error.is_unique_violation() {
        return true;
    }

    if let Some(code) = db_error.code() {
        let code_str = code.as_ref();
        if code_str == PG_UNIQUE
            || MYSQL_DUPLICATE_CODES.contains(&code_str)
            || SQLITE_DUPLICATE_CODES.contains(&code_str)
        {
            return true;
        }
    }

    false
}
