//! Employee entity model
//!
//! This module contains the SeaORM entity model for the employees table.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Employee entity, matched on (tenant_id, first_name, last_name, phone_number)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub tenant_id: String,

    pub first_name: String,

    pub last_name: String,

    pub phone_number: Option<String>,

    pub email: Option<String>,

    pub created_at_utc: DateTimeWithTimeZone,

    pub updated_at_utc: DateTimeWithTimeZone,
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
