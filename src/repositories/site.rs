//! Camera and location alarm lookups used for duplicate diagnostics

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::models::camera::{self, Entity as Camera};
use crate::models::location_alarm::{self, Entity as LocationAlarm};

/// Repository for camera and location alarm reads
pub struct SiteRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SiteRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_camera(&self, id: &str) -> Result<Option<camera::Model>, DbErr> {
        Camera::find_by_id(id.to_string()).one(self.db).await
    }

    pub async fn location_alarms_at(
        &self,
        location_id: &str,
    ) -> Result<Vec<location_alarm::Model>, DbErr> {
        LocationAlarm::find()
            .filter(location_alarm::Column::LocationId.eq(location_id))
            .order_by_asc(location_alarm::Column::CreatedAtUtc)
            .all(self.db)
            .await
    }
}
