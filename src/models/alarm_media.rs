//! Alarm media entity model
//!
//! This module contains the SeaORM entity model for the alarm_media table,
//! which links an alarm to its recorded clip or snapshot.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Media attached to an alarm; the id is assigned by the database
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "alarm_media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub alarm_id: String,

    /// Media kind (e.g. VIDEO, IMAGE)
    pub media_type: String,

    #[sea_orm(column_type = "Text")]
    pub media_url: String,

    pub created_at_utc: DateTimeWithTimeZone,

    pub updated_at_utc: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
