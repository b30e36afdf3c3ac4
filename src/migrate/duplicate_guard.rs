//! Duplicate guard.
//!
//! An alarm is identified in the destination by `(source_id, tenant_id,
//! partition_key)`. When that key is already taken the migration stops
//! before any write. Context about the conflicting row is collected for the
//! log only; failing to collect it never affects the guard's answer.

use sea_orm::{DatabaseConnection, DbErr};

use crate::models::{camera, location_alarm, raw_alarm};
use crate::repositories::{RawAlarmRepository, SiteRepository};

/// Existing destination alarm occupying the de-duplication key, if any.
pub async fn check(
    dest: &DatabaseConnection,
    source_id: &str,
    tenant_id: &str,
    partition_key: i32,
) -> Result<Option<raw_alarm::Model>, DbErr> {
    RawAlarmRepository::new(dest)
        .find_by_natural_key(source_id, tenant_id, partition_key)
        .await
}

/// Diagnostic context around a conflicting alarm.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictContext {
    pub existing: raw_alarm::Model,
    pub camera: Option<camera::Model>,
    pub location_alarms: Vec<location_alarm::Model>,
}

/// Collect the camera and same-location alarms around `existing`.
///
/// Lookup errors are logged and leave the corresponding part empty.
pub async fn gather_context(
    dest: &DatabaseConnection,
    existing: raw_alarm::Model,
) -> ConflictContext {
    let site = SiteRepository::new(dest);

    let camera = match existing.source_entity_id.as_deref() {
        Some(device_id) => site.get_camera(device_id).await.unwrap_or_else(|err| {
            tracing::debug!(device_id, error = %err, "Could not load camera for conflict report");
            None
        }),
        None => None,
    };

    let location_alarms = match camera.as_ref() {
        Some(camera) => site
            .location_alarms_at(&camera.location_id)
            .await
            .unwrap_or_else(|err| {
                tracing::debug!(location_id = %camera.location_id, error = %err, "Could not load location alarms for conflict report");
                Vec::new()
            }),
        None => Vec::new(),
    };

    ConflictContext {
        existing,
        camera,
        location_alarms,
    }
}

/// Log the conflicting alarm and its surroundings for manual review.
pub fn report(context: &ConflictContext) {
    let existing = &context.existing;
    tracing::warn!(
        id = %existing.id,
        source_id = %existing.source_id,
        partition_key = existing.partition_key,
        alarm_type_id = %existing.alarm_type_id,
        source_entity_id = ?existing.source_entity_id,
        tenant_id = %existing.tenant_id,
        alarm_timestamp_utc = %existing.alarm_timestamp_utc,
        current_status = ?existing.current_status,
        "Existing raw alarm details"
    );

    match &context.camera {
        Some(camera) => tracing::warn!(
            camera_id = %camera.id,
            camera_name = %camera.camera_name,
            location_id = %camera.location_id,
            "Camera of existing alarm"
        ),
        None => tracing::warn!("Camera: not found"),
    }

    if context.location_alarms.is_empty() {
        tracing::warn!("No location alarms found for this location");
    } else {
        let ids: Vec<&str> = context
            .location_alarms
            .iter()
            .map(|alarm| alarm.id.as_str())
            .collect();
        tracing::warn!(location_alarm_ids = ?ids, "Location alarms at the same location");
    }
}
