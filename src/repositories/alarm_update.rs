//! Alarm update repository

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::models::alarm_update::{self, Entity as AlarmUpdate};

/// Repository for alarm update database operations
pub struct AlarmUpdateRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AlarmUpdateRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Updates of an alarm ordered by timestamp, ties broken by id
    pub async fn list_for_alarm(
        &self,
        alarm_id: &str,
    ) -> Result<Vec<alarm_update::Model>, DbErr> {
        AlarmUpdate::find()
            .filter(alarm_update::Column::AlarmId.eq(alarm_id))
            .order_by_asc(alarm_update::Column::UpdateTimestampUtc)
            .order_by_asc(alarm_update::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn insert(
        &self,
        update: alarm_update::Model,
    ) -> Result<alarm_update::Model, DbErr> {
        alarm_update::ActiveModel {
            id: Set(update.id),
            alarm_id: Set(update.alarm_id),
            update_timestamp_utc: Set(update.update_timestamp_utc),
            event: Set(update.event),
            user_id: Set(update.user_id),
            plain_text_comment: Set(update.plain_text_comment),
            current_status: Set(update.current_status),
            tenant_id: Set(update.tenant_id),
            update_details: Set(update.update_details),
        }
        .insert(self.db)
        .await
    }
}
