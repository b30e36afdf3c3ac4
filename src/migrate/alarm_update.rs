//! Alarm update migration.
//!
//! Updates are copied in timestamp order. Authors are resolved through the
//! user resolver before anything is written; the update rows themselves go
//! in one transaction, so a single failure leaves the new alarm with no
//! updates at all.

use std::collections::HashMap;

use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use uuid::Uuid;

use super::non_empty_json;
use super::user::migrate_user;
use crate::config::DestinationConfig;
use crate::error::MigrationError;
use crate::models::alarm_update;
use crate::repositories::AlarmUpdateRepository;

/// Copy every update of `source_alarm_id` onto `new_alarm_id`.
///
/// Returns the id of the last update written, which becomes the alarm's
/// `alarm_update_id`.
pub async fn migrate_updates(
    source: &DatabaseConnection,
    dest: &DatabaseConnection,
    source_alarm_id: &str,
    new_alarm_id: &str,
    target: &DestinationConfig,
) -> Option<String> {
    let updates = match AlarmUpdateRepository::new(source)
        .list_for_alarm(source_alarm_id)
        .await
    {
        Ok(updates) => updates,
        Err(err) => {
            tracing::error!(alarm_id = source_alarm_id, error = %err, "Failed to fetch alarm updates");
            super::record_dependency_failure("alarm_update");
            return None;
        }
    };

    if updates.is_empty() {
        tracing::info!(alarm_id = source_alarm_id, "No alarm updates to migrate");
        return None;
    }

    let mut authors: HashMap<String, Option<String>> = HashMap::new();
    let mut copies = Vec::with_capacity(updates.len());

    for update in updates {
        let author = match update.user_id.as_deref() {
            Some(user_id) => {
                if !authors.contains_key(user_id) {
                    let resolved = migrate_user(source, dest, user_id, target)
                        .await
                        .map(|resolution| resolution.into_id());
                    authors.insert(user_id.to_string(), resolved);
                }
                authors.get(user_id).cloned().flatten()
            }
            None => None,
        };

        copies.push(alarm_update::Model {
            id: Uuid::new_v4().to_string(),
            alarm_id: new_alarm_id.to_string(),
            user_id: author,
            tenant_id: target.tenant_id.clone(),
            update_details: non_empty_json(update.update_details.clone()),
            ..update
        });
    }

    match insert_updates(dest, copies).await {
        Ok(last_id) => {
            tracing::info!(alarm_id = new_alarm_id, last_update_id = ?last_id, "Alarm updates migrated");
            last_id
        }
        Err(err) => {
            tracing::error!(alarm_id = new_alarm_id, error = %err, "Alarm updates rolled back, alarm continues without updates");
            super::record_dependency_failure("alarm_update");
            None
        }
    }
}

/// Insert `updates` in order within one transaction, returning the last id.
pub async fn insert_updates(
    dest: &DatabaseConnection,
    updates: Vec<alarm_update::Model>,
) -> Result<Option<String>, MigrationError> {
    let batch_failure = |source: DbErr| MigrationError::BatchInsertFailure {
        batch: "alarm_updates",
        source,
    };

    let txn = dest.begin().await.map_err(batch_failure)?;
    let repo = AlarmUpdateRepository::new(&txn);
    let mut last_id = None;

    for update in updates {
        let inserted = repo.insert(update).await.map_err(batch_failure)?;
        tracing::debug!(update_id = %inserted.id, event = %inserted.event, "Inserted alarm update");
        last_id = Some(inserted.id);
    }

    txn.commit().await.map_err(batch_failure)?;
    Ok(last_id)
}
