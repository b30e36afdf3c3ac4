//! Migration to create the alarm_updates table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AlarmUpdates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AlarmUpdates::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AlarmUpdates::AlarmId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(AlarmUpdates::UpdateTimestampUtc)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AlarmUpdates::Event).string_len(64).not_null())
                    .col(ColumnDef::new(AlarmUpdates::UserId).string_len(64).null())
                    .col(ColumnDef::new(AlarmUpdates::PlainTextComment).text().null())
                    .col(ColumnDef::new(AlarmUpdates::CurrentStatus).string().null())
                    .col(ColumnDef::new(AlarmUpdates::TenantId).string_len(64).not_null())
                    .col(ColumnDef::new(AlarmUpdates::UpdateDetails).json().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_alarm_updates_alarm_id")
                    .table(AlarmUpdates::Table)
                    .col(AlarmUpdates::AlarmId)
                    .col(AlarmUpdates::UpdateTimestampUtc)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AlarmUpdates::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AlarmUpdates {
    Table,
    Id,
    AlarmId,
    UpdateTimestampUtc,
    Event,
    UserId,
    PlainTextComment,
    CurrentStatus,
    TenantId,
    UpdateDetails,
}
