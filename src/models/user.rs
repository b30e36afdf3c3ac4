//! User entity model
//!
//! This module contains the SeaORM entity model for the users table.
//! Users appear in a migration as authors of alarm updates.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

/// User entity holding credentials and JSON-valued preference blobs
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: Option<String>,

    /// Login email, the secondary natural key
    pub email: String,

    pub is_enabled: bool,

    pub password: Option<String>,

    pub tenant_id: String,

    pub created_at_utc: DateTimeWithTimeZone,

    pub updated_at_utc: DateTimeWithTimeZone,

    #[sea_orm(column_type = "Text", nullable)]
    pub refresh_token: Option<String>,

    pub refresh_token_expires: Option<DateTimeWithTimeZone>,

    pub role_id: Option<String>,

    /// Tenants visible through the MSP console
    #[sea_orm(column_type = "Json", nullable)]
    pub msp_tenants: Option<JsonValue>,

    /// Locations visible through the MSP console
    #[sea_orm(column_type = "Json", nullable)]
    pub msp_locations: Option<JsonValue>,

    /// Tenants visible through the vision console
    #[sea_orm(column_type = "Json", nullable)]
    pub vision_tenants: Option<JsonValue>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
