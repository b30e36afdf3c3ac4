//! ML output and video tag repository

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::models::ml_output::{self, Entity as MlOutput};
use crate::models::video_tag::{self, Entity as VideoTag};

/// Repository for ML output and video tag database operations
pub struct MlOutputRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MlOutputRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<ml_output::Model>, DbErr> {
        MlOutput::find_by_id(id.to_string()).one(self.db).await
    }

    pub async fn list_tags(&self, ml_output_id: &str) -> Result<Vec<video_tag::Model>, DbErr> {
        VideoTag::find()
            .filter(video_tag::Column::MlOutputId.eq(ml_output_id))
            .order_by_asc(video_tag::Column::CreatedAtUtc)
            .order_by_asc(video_tag::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn insert(&self, output: ml_output::Model) -> Result<ml_output::Model, DbErr> {
        ml_output::ActiveModel {
            id: Set(output.id),
            alarm_id: Set(output.alarm_id),
            true_alarm_probability: Set(output.true_alarm_probability),
            haie_ml_version: Set(output.haie_ml_version),
            tenant_id: Set(output.tenant_id),
            created_at_utc: Set(output.created_at_utc),
            updated_at_utc: Set(output.updated_at_utc),
            ml_output_timestamp_utc: Set(output.ml_output_timestamp_utc),
            processed_frames: Set(output.processed_frames),
            deadzone_detections: Set(output.deadzone_detections),
        }
        .insert(self.db)
        .await
    }

    pub async fn insert_tag(&self, tag: video_tag::Model) -> Result<video_tag::Model, DbErr> {
        video_tag::ActiveModel {
            id: Set(tag.id),
            video_tag: Set(tag.video_tag),
            ml_output_id: Set(tag.ml_output_id),
            tenant_id: Set(tag.tenant_id),
            created_at_utc: Set(tag.created_at_utc),
            updated_at_utc: Set(tag.updated_at_utc),
        }
        .insert(self.db)
        .await
    }
}
