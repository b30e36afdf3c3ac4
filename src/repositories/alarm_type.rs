//! Alarm type repository

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::models::alarm_type::{self, Entity as AlarmType};

/// Repository for alarm type lookups
pub struct AlarmTypeRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AlarmTypeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<alarm_type::Model>, DbErr> {
        AlarmType::find_by_id(id.to_string()).one(self.db).await
    }

    /// All alarm types whose name matches exactly, in primary key order
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<alarm_type::Model>, DbErr> {
        AlarmType::find()
            .filter(alarm_type::Column::AlarmType.eq(name))
            .order_by_asc(alarm_type::Column::Id)
            .all(self.db)
            .await
    }
}
