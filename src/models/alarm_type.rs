//! Alarm type entity model

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// Alarm type catalogue entry (e.g. "Motion Detected")
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "alarm_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Display name, matched exactly across databases
    pub alarm_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
