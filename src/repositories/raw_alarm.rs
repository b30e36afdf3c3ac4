//! Raw alarm repository
//!
//! Point lookups on the aggregate root plus the de-duplication key query.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::models::raw_alarm::{self, Entity as RawAlarm};

/// Repository for raw alarm database operations
pub struct RawAlarmRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RawAlarmRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Fetch an alarm by its primary key
    pub async fn get_by_id(&self, id: &str) -> Result<Option<raw_alarm::Model>, DbErr> {
        RawAlarm::find_by_id(id.to_string()).one(self.db).await
    }

    /// Find an alarm by its de-duplication key `(source_id, tenant_id, partition_key)`.
    ///
    /// When several rows match (only possible without the unique index), the
    /// oldest one is returned.
    pub async fn find_by_natural_key(
        &self,
        source_id: &str,
        tenant_id: &str,
        partition_key: i32,
    ) -> Result<Option<raw_alarm::Model>, DbErr> {
        RawAlarm::find()
            .filter(raw_alarm::Column::SourceId.eq(source_id))
            .filter(raw_alarm::Column::TenantId.eq(tenant_id))
            .filter(raw_alarm::Column::PartitionKey.eq(partition_key))
            .order_by_asc(raw_alarm::Column::CreatedAtUtc)
            .one(self.db)
            .await
    }

    /// Insert a fully assembled alarm and return its identifier
    pub async fn insert(&self, alarm: raw_alarm::Model) -> Result<String, DbErr> {
        let inserted = insert_model(alarm).insert(self.db).await?;
        Ok(inserted.id)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        RawAlarm::find().count(self.db).await
    }
}

fn insert_model(alarm: raw_alarm::Model) -> raw_alarm::ActiveModel {
    raw_alarm::ActiveModel {
        id: Set(alarm.id),
        source_id: Set(alarm.source_id),
        tenant_id: Set(alarm.tenant_id),
        partition_key: Set(alarm.partition_key),
        alarm_type_id: Set(alarm.alarm_type_id),
        source_entity_type: Set(alarm.source_entity_type),
        source_entity_id: Set(alarm.source_entity_id),
        door_id: Set(alarm.door_id),
        employee_id: Set(alarm.employee_id),
        user_id: Set(alarm.user_id),
        latest_alarm_media_id: Set(alarm.latest_alarm_media_id),
        alarm_update_id: Set(alarm.alarm_update_id),
        ml_output_id: Set(alarm.ml_output_id),
        alarm_state: Set(alarm.alarm_state),
        current_status: Set(alarm.current_status),
        true_alarm_probability: Set(alarm.true_alarm_probability),
        alarm_description: Set(alarm.alarm_description),
        alarm_details: Set(alarm.alarm_details),
        alarm_timestamp_utc: Set(alarm.alarm_timestamp_utc),
        created_at_utc: Set(alarm.created_at_utc),
        updated_at_utc: Set(alarm.updated_at_utc),
    }
}
