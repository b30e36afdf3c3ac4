//! Migration to create the ml_outputs and video_tags tables.
//!
//! Every ML output belongs to exactly one alarm and owns its video tags.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MlOutputs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MlOutputs::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MlOutputs::AlarmId).string_len(64).not_null())
                    .col(ColumnDef::new(MlOutputs::TrueAlarmProbability).double().null())
                    .col(ColumnDef::new(MlOutputs::HaieMlVersion).string_len(64).null())
                    .col(ColumnDef::new(MlOutputs::TenantId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(MlOutputs::CreatedAtUtc)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MlOutputs::UpdatedAtUtc)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MlOutputs::MlOutputTimestampUtc)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(MlOutputs::ProcessedFrames).json().null())
                    .col(ColumnDef::new(MlOutputs::DeadzoneDetections).integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VideoTags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VideoTags::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VideoTags::VideoTag).string().not_null())
                    .col(ColumnDef::new(VideoTags::MlOutputId).string_len(64).not_null())
                    .col(ColumnDef::new(VideoTags::TenantId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(VideoTags::CreatedAtUtc)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(VideoTags::UpdatedAtUtc)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_tags_ml_output_id")
                            .from(VideoTags::Table, VideoTags::MlOutputId)
                            .to(MlOutputs::Table, MlOutputs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_video_tags_ml_output_id")
                    .table(VideoTags::Table)
                    .col(VideoTags::MlOutputId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VideoTags::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MlOutputs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MlOutputs {
    Table,
    Id,
    AlarmId,
    TrueAlarmProbability,
    HaieMlVersion,
    TenantId,
    CreatedAtUtc,
    UpdatedAtUtc,
    MlOutputTimestampUtc,
    ProcessedFrames,
    DeadzoneDetections,
}

#[derive(DeriveIden)]
enum VideoTags {
    Table,
    Id,
    VideoTag,
    MlOutputId,
    TenantId,
    CreatedAtUtc,
    UpdatedAtUtc,
}
