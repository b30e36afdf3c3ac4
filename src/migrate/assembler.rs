//! Alarm assembly.
//!
//! The destination alarm is the source alarm with its identity, tenant,
//! links, lifecycle fields and timestamps overwritten. Everything else is
//! copied as-is.

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

use super::non_empty_json;
use crate::config::DestinationConfig;
use crate::models::raw_alarm;

/// Identity of the alarm being built.
///
/// Created before dependents are migrated so they can point at the new id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmDraft {
    pub id: String,
    pub migrated_at: DateTimeWithTimeZone,
}

/// Destination identifiers resolved for the alarm's dependents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLinks {
    pub alarm_type_id: String,
    pub door_id: Option<String>,
    pub employee_id: Option<String>,
    pub latest_alarm_media_id: Option<i32>,
    pub alarm_update_id: Option<String>,
    pub ml_output_id: Option<String>,
}

impl AlarmDraft {
    /// Start a draft with a fresh identifier stamped at the current time.
    pub fn start() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            migrated_at: Utc::now().fixed_offset(),
        }
    }

    /// Build the destination record from `original` and the resolved links.
    pub fn assemble(
        &self,
        original: &raw_alarm::Model,
        links: &ResolvedLinks,
        target: &DestinationConfig,
    ) -> raw_alarm::Model {
        let source_entity_id = match (&links.door_id, original.raised_by_door()) {
            (Some(door_id), true) => door_id.clone(),
            _ => target.camera_id.clone(),
        };

        raw_alarm::Model {
            id: self.id.clone(),
            tenant_id: target.tenant_id.clone(),
            partition_key: target.partition_key_for(original.partition_key),
            alarm_type_id: links.alarm_type_id.clone(),
            source_entity_id: Some(source_entity_id),
            door_id: links.door_id.clone(),
            employee_id: links.employee_id.clone(),
            user_id: None,
            latest_alarm_media_id: links.latest_alarm_media_id,
            alarm_update_id: links.alarm_update_id.clone(),
            ml_output_id: links.ml_output_id.clone(),
            alarm_state: target.initial_alarm_state.clone(),
            current_status: Some(target.initial_alarm_status.clone()),
            true_alarm_probability: None,
            alarm_details: non_empty_json(original.alarm_details.clone()),
            alarm_timestamp_utc: self.migrated_at,
            created_at_utc: self.migrated_at,
            updated_at_utc: self.migrated_at,
            ..original.clone()
        }
    }
}
