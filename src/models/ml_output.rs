//! ML output entity model
//!
//! This module contains the SeaORM entity model for the ml_outputs table,
//! the classifier verdict attached to a single alarm.

use super::video_tag::Entity as VideoTag;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

/// ML output entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ml_outputs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Parent alarm identifier
    pub alarm_id: String,

    pub true_alarm_probability: Option<f64>,

    /// Version of the model that produced this output
    pub haie_ml_version: Option<String>,

    pub tenant_id: String,

    pub created_at_utc: DateTimeWithTimeZone,

    pub updated_at_utc: DateTimeWithTimeZone,

    pub ml_output_timestamp_utc: Option<DateTimeWithTimeZone>,

    #[sea_orm(column_type = "Json", nullable)]
    pub processed_frames: Option<JsonValue>,

    pub deadzone_detections: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "VideoTag")]
    VideoTag,
}

impl Related<VideoTag> for Entity {
    fn to() -> RelationDef {
        Relation::VideoTag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
