//! Alarm media repository

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::models::alarm_media::{self, Entity as AlarmMedia};

/// Repository for alarm media database operations
pub struct AlarmMediaRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AlarmMediaRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Media attached to an alarm, oldest first
    pub async fn list_for_alarm(&self, alarm_id: &str) -> Result<Vec<alarm_media::Model>, DbErr> {
        AlarmMedia::find()
            .filter(alarm_media::Column::AlarmId.eq(alarm_id))
            .order_by_asc(alarm_media::Column::Id)
            .all(self.db)
            .await
    }

    /// Copy `media` onto `alarm_id`, returning the generated row id
    pub async fn insert_for_alarm(
        &self,
        media: &alarm_media::Model,
        alarm_id: &str,
    ) -> Result<i32, DbErr> {
        let inserted = alarm_media::ActiveModel {
            id: NotSet,
            alarm_id: Set(alarm_id.to_string()),
            media_type: Set(media.media_type.clone()),
            media_url: Set(media.media_url.clone()),
            created_at_utc: Set(media.created_at_utc),
            updated_at_utc: Set(media.updated_at_utc),
        }
        .insert(self.db)
        .await?;

        Ok(inserted.id)
    }
}
