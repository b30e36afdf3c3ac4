//! Generic resolve-or-create step shared by doors, employees and users.
//!
//! A candidate read from the source database is matched against the
//! destination by its natural key. An existing row is reused untouched;
//! otherwise a copy is inserted under a fresh identifier, stamped with the
//! destination constants.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::config::DestinationConfig;
use crate::error::{MigrationError, is_unique_violation};

/// How a dependent identifier was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An equivalent destination row already existed
    Reused(String),
    /// A new destination row was inserted
    Created(String),
}

impl Resolution {
    pub fn id(&self) -> &str {
        match self {
            Resolution::Reused(id) | Resolution::Created(id) => id,
        }
    }

    pub fn into_id(self) -> String {
        match self {
            Resolution::Reused(id) | Resolution::Created(id) => id,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Resolution::Created(_))
    }
}

/// A source-side row that can be matched to, or copied into, the destination.
#[async_trait]
pub trait Resolvable: Send + Sync {
    /// Entity name used in logs, metrics and errors
    const ENTITY: &'static str;

    /// Human-readable natural key values for diagnostics
    fn natural_key(&self, target: &DestinationConfig) -> String;

    /// Identifier of an equivalent destination row, if any
    async fn find_equivalent(
        &self,
        dest: &DatabaseConnection,
        target: &DestinationConfig,
    ) -> Result<Option<String>, DbErr>;

    /// Insert a destination copy of this row under `new_id`
    async fn create(
        &self,
        dest: &DatabaseConnection,
        new_id: &str,
        target: &DestinationConfig,
    ) -> Result<(), DbErr>;
}

/// Reuse the destination equivalent of `candidate` or insert a copy of it.
///
/// Performs at most one insert and never updates an existing row.
pub async fn resolve_or_create<R: Resolvable>(
    dest: &DatabaseConnection,
    candidate: &R,
    target: &DestinationConfig,
) -> Result<Resolution, MigrationError> {
    let key = candidate.natural_key(target);

    let existing = candidate
        .find_equivalent(dest, target)
        .await
        .map_err(|source| MigrationError::DependencyResolutionFailure {
            entity: R::ENTITY,
            key: key.clone(),
            source,
        })?;

    if let Some(id) = existing {
        tracing::info!(entity = R::ENTITY, %key, id = %id, "Reusing existing destination row");
        return Ok(Resolution::Reused(id));
    }

    let new_id = Uuid::new_v4().to_string();
    match candidate.create(dest, &new_id, target).await {
        Ok(()) => {
            tracing::info!(entity = R::ENTITY, %key, id = %new_id, "Inserted destination row");
            Ok(Resolution::Created(new_id))
        }
        Err(source) => {
            if is_unique_violation(&source) {
                tracing::warn!(
                    entity = R::ENTITY,
                    %key,
                    "Insert collided with an existing destination row"
                );
            }
            Err(MigrationError::DependencyResolutionFailure {
                entity: R::ENTITY,
                key,
                source,
            })
        }
    }
}

/// Resolve an optional dependency, degrading failures to `None`.
///
/// Failures are logged with the entity's natural key and counted; they never
/// abort the alarm.
pub async fn resolve_optional<R: Resolvable>(
    dest: &DatabaseConnection,
    candidate: Option<&R>,
    target: &DestinationConfig,
) -> Option<Resolution> {
    let candidate = candidate?;
    match resolve_or_create(dest, candidate, target).await {
        Ok(resolution) => Some(resolution),
        Err(err) => {
            tracing::error!(entity = R::ENTITY, error = %err, "Dependency resolution failed, continuing without it");
            super::record_dependency_failure(R::ENTITY);
            None
        }
    }
}
