//! Alarm update entity model
//!
//! This module contains the SeaORM entity model for the alarm_updates table,
//! the ordered history of operator and system actions on an alarm.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

/// Alarm update entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "alarm_updates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Parent alarm identifier
    pub alarm_id: String,

    pub update_timestamp_utc: DateTimeWithTimeZone,

    /// Event type (e.g. STATUS_CHANGED, COMMENT)
    pub event: String,

    /// Author of the update, absent for system-generated updates
    pub user_id: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub plain_text_comment: Option<String>,

    /// Alarm status at the time of the update
    pub current_status: Option<String>,

    pub tenant_id: String,

    #[sea_orm(column_type = "Json", nullable)]
    pub update_details: Option<JsonValue>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
