//! Migration to create the alarm_media table.
//!
//! Media rows use an auto-increment integer id, which the alarm references
//! through `latest_alarm_media_id`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AlarmMedia::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AlarmMedia::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AlarmMedia::AlarmId).string_len(64).not_null())
                    .col(ColumnDef::new(AlarmMedia::MediaType).string_len(32).not_null())
                    .col(ColumnDef::new(AlarmMedia::MediaUrl).text().not_null())
                    .col(
                        ColumnDef::new(AlarmMedia::CreatedAtUtc)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AlarmMedia::UpdatedAtUtc)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_alarm_media_alarm_id")
                    .table(AlarmMedia::Table)
                    .col(AlarmMedia::AlarmId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AlarmMedia::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AlarmMedia {
    Table,
    Id,
    AlarmId,
    MediaType,
    MediaUrl,
    CreatedAtUtc,
    UpdatedAtUtc,
}
