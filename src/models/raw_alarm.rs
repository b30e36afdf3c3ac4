//! Raw alarm entity model
//!
//! This module contains the SeaORM entity model for the raw_alarms_v2 table,
//! the aggregate root of a migration.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

/// Source entity type whose `source_entity_id` points at a door
pub const SOURCE_ENTITY_DOOR: &str = "DOOR";

/// Raw alarm entity representing a detected security or safety event
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "raw_alarms_v2")]
pub struct Model {
    /// Unique identifier for the alarm (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Identifier of the alarm in the system that raised it
    pub source_id: String,

    /// Tenant identifier for multi-tenancy
    pub tenant_id: String,

    /// Coarse time bucket (e.g. 202509) used in the de-duplication key
    pub partition_key: i32,

    /// Alarm type identifier
    pub alarm_type_id: String,

    /// Kind of device that raised the alarm (e.g. DOOR, CAMERA)
    pub source_entity_type: String,

    /// Identifier of the device that raised the alarm
    pub source_entity_id: Option<String>,

    pub door_id: Option<String>,

    pub employee_id: Option<String>,

    pub user_id: Option<String>,

    pub latest_alarm_media_id: Option<i32>,

    pub alarm_update_id: Option<String>,

    pub ml_output_id: Option<String>,

    /// Lifecycle state (e.g. UNPROCESSED)
    pub alarm_state: String,

    /// Human-facing status string (e.g. Analyzing)
    pub current_status: Option<String>,

    pub true_alarm_probability: Option<f64>,

    #[sea_orm(column_type = "Text", nullable)]
    pub alarm_description: Option<String>,

    /// Structured detail blob
    #[sea_orm(column_type = "Json", nullable)]
    pub alarm_details: Option<JsonValue>,

    /// Timestamp when the alarm occurred
    pub alarm_timestamp_utc: DateTimeWithTimeZone,

    pub created_at_utc: DateTimeWithTimeZone,

    pub updated_at_utc: DateTimeWithTimeZone,
}

impl Model {
    /// Whether the alarm was raised by a door rather than a camera
    pub fn raised_by_door(&self) -> bool {
        self.source_entity_type
            .eq_ignore_ascii_case(SOURCE_ENTITY_DOOR)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
