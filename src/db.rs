//! Database connection management for the source and destination stores.
//!
//! Each migration opens one SeaORM connection per role with retry and
//! exponential backoff for transient errors.

use std::fmt;
use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use tokio::time::sleep;

use crate::config::AppConfig;

/// Which side of the migration a connection serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbRole {
    Source,
    Destination,
}

impl fmt::Display for DbRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbRole::Source => f.write_str("source"),
            DbRole::Destination => f.write_str("destination"),
        }
    }
}

/// Pool settings shared by both connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub max_connections: u32,
    pub acquire_timeout_ms: u64,
    pub connect_attempts: u32,
}

impl From<&AppConfig> for ConnectionSettings {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            max_connections: cfg.db_max_connections,
            acquire_timeout_ms: cfg.db_acquire_timeout_ms,
            connect_attempts: cfg.db_connect_attempts,
        }
    }
}

/// Errors that can occur while opening a connection.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Failed to connect to {role} database: {source}")]
    ConnectionFailed {
        role: DbRole,
        #[source]
        source: DbErr,
    },
    #[error("Invalid {role} database configuration: {message}")]
    InvalidConfiguration { role: DbRole, message: String },
}

/// Opens a connection for `role`, retrying with exponential backoff.
///
/// Credentials in `url` are never logged.
pub async fn connect(
    role: DbRole,
    url: &str,
    settings: &ConnectionSettings,
) -> Result<DatabaseConnection, DatabaseError> {
    if url.trim().is_empty() {
        return Err(DatabaseError::InvalidConfiguration {
            role,
            message: "Database URL cannot be empty".to_string(),
        });
    }

    let mut opt = ConnectOptions::new(url);
    opt.max_connections(settings.max_connections.max(1))
        .min_connections(1)
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
        .connect_timeout(Duration::from_millis(settings.acquire_timeout_ms))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let max_attempts = settings.connect_attempts.max(1);
    let mut retry_delay = Duration::from_millis(100);

    for attempt in 1..=max_attempts {
        // A pool can open lazily; only an answered `SELECT 1` counts as connected
        let connected = match Database::connect(opt.clone()).await {
            Ok(conn) => health_check(&conn).await.map(|()| conn),
            Err(e) => Err(e),
        };

        match connected {
            Ok(conn) => {
                tracing::debug!(%role, attempt, "Connected to database");
                return Ok(conn);
            }
            Err(e) if attempt == max_attempts => {
                tracing::error!(%role, attempts = max_attempts, error = %e, "Failed to connect to database");
                return Err(DatabaseError::ConnectionFailed { role, source: e });
            }
            Err(e) => {
                tracing::warn!(
                    %role,
                    attempt,
                    error = %e,
                    retry_in_ms = retry_delay.as_millis() as u64,
                    "Database connection attempt failed, retrying"
                );
                sleep(retry_delay).await;
                retry_delay *= 2;
            }
        }
    }

    Err(DatabaseError::InvalidConfiguration {
        role,
        message: "no connection attempt was made".to_string(),
    })
}

/// Health check for a database connection.
pub async fn health_check(db: &DatabaseConnection) -> Result<(), DbErr> {
    let stmt = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    db.query_one(stmt).await?;
    Ok(())
}

/// Closes a connection, logging rather than propagating failures.
pub async fn close(role: DbRole, db: DatabaseConnection) {
    if let Err(err) = db.close().await {
        tracing::warn!(%role, error = %err, "Failed to close database connection");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ConnectionSettings {
        ConnectionSettings {
            max_connections: 1,
            acquire_timeout_ms: 500,
            connect_attempts: 1,
        }
    }

    #[tokio::test]
    async fn test_empty_database_url() {
        let result = connect(DbRole::Source, "", &settings()).await;
        assert!(matches!(
            result,
            Err(DatabaseError::InvalidConfiguration {
                role: DbRole::Source,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_connect_sqlite_memory_and_health_check() {
        // connect itself runs the health check before returning
        let db = connect(DbRole::Destination, "sqlite::memory:", &settings())
            .await
            .unwrap();
        health_check(&db).await.unwrap();
        close(DbRole::Destination, db).await;
    }

    #[tokio::test]
    async fn test_unreachable_database_reports_role() {
        let err = connect(
            DbRole::Destination,
            "sqlite:///nonexistent-dir/for/sure/alarms.db?mode=ro",
            &settings(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            DatabaseError::ConnectionFailed {
                role: DbRole::Destination,
                ..
            }
        ));
        assert!(err.to_string().contains("destination"));
    }
}
