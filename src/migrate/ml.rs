//! ML output and video tag migration.
//!
//! ML output is specific to one alarm, so it is always copied under a new id,
//! never matched. Its tags are written in one transaction: either every tag
//! lands or none does, and the ML output is kept either way.

use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use uuid::Uuid;

use super::non_empty_json;
use crate::config::DestinationConfig;
use crate::error::MigrationError;
use crate::models::{ml_output, video_tag};
use crate::repositories::MlOutputRepository;

const ENTITY: &str = "ml_output";

/// Copy the source ML output `ml_output_id` and its tags onto `new_alarm_id`.
pub async fn migrate_ml_output(
    source: &DatabaseConnection,
    dest: &DatabaseConnection,
    ml_output_id: Option<&str>,
    new_alarm_id: &str,
    target: &DestinationConfig,
) -> Option<String> {
    let ml_output_id = ml_output_id?;
    let source_repo = MlOutputRepository::new(source);

    let output = match source_repo.get_by_id(ml_output_id).await {
        Ok(Some(output)) => output,
        Ok(None) => {
            tracing::warn!(ml_output_id, "ML output referenced by alarm not found in source");
            return None;
        }
        Err(err) => {
            tracing::error!(ml_output_id, error = %err, "Failed to fetch source ML output");
            super::record_dependency_failure(ENTITY);
            return None;
        }
    };

    let tags = match source_repo.list_tags(ml_output_id).await {
        Ok(tags) => tags,
        Err(err) => {
            tracing::error!(ml_output_id, error = %err, "Failed to fetch source video tags");
            super::record_dependency_failure("video_tag");
            Vec::new()
        }
    };

    let new_output_id = Uuid::new_v4().to_string();
    let copy = ml_output::Model {
        id: new_output_id.clone(),
        alarm_id: new_alarm_id.to_string(),
        tenant_id: target.tenant_id.clone(),
        processed_frames: non_empty_json(output.processed_frames.clone()),
        ..output
    };

    if let Err(err) = MlOutputRepository::new(dest).insert(copy).await {
        tracing::error!(ml_output_id, error = %err, "Failed to insert ML output");
        super::record_dependency_failure(ENTITY);
        return None;
    }

    match insert_tags(dest, &tags, &new_output_id, target).await {
        Ok(count) => {
            tracing::info!(ml_output_id = %new_output_id, tags = count, "Migrated ML output and video tags")
        }
        Err(err) => {
            tracing::error!(ml_output_id = %new_output_id, error = %err, "Video tags not migrated");
            super::record_dependency_failure("video_tag");
        }
    }

    Some(new_output_id)
}

/// Insert copies of `tags` under `ml_output_id` in a single transaction.
pub async fn insert_tags(
    dest: &DatabaseConnection,
    tags: &[video_tag::Model],
    ml_output_id: &str,
    target: &DestinationConfig,
) -> Result<usize, MigrationError> {
    if tags.is_empty() {
        return Ok(0);
    }

    let batch_failure = |source: DbErr| MigrationError::BatchInsertFailure {
        batch: "video_tags",
        source,
    };

    let txn = dest.begin().await.map_err(batch_failure)?;
    let repo = MlOutputRepository::new(&txn);

    for tag in tags {
        let copy = video_tag::Model {
            id: Uuid::new_v4().to_string(),
            ml_output_id: ml_output_id.to_string(),
            tenant_id: target.tenant_id.clone(),
            ..tag.clone()
        };
        // Dropping the transaction on error rolls back the tags inserted so far
        repo.insert_tag(copy).await.map_err(batch_failure)?;
    }

    txn.commit().await.map_err(batch_failure)?;
    Ok(tags.len())
}
