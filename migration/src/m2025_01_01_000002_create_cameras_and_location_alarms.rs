//! Migration to create the cameras and location_alarms tables.
//!
//! Neither table is written by a migration run. They are read when a
//! duplicate alarm is found, to describe the conflicting record's site.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cameras::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cameras::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cameras::TenantId).string_len(64).not_null())
                    .col(ColumnDef::new(Cameras::LocationId).string_len(64).not_null())
                    .col(ColumnDef::new(Cameras::CameraName).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LocationAlarms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LocationAlarms::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LocationAlarms::TenantId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LocationAlarms::LocationId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(LocationAlarms::RawAlarmId).string_len(64).null())
                    .col(
                        ColumnDef::new(LocationAlarms::CreatedAtUtc)
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
                    .name("idx_location_alarms_location")
                    .table(LocationAlarms::Table)
                    .col(LocationAlarms::LocationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LocationAlarms::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Cameras::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Cameras {
    Table,
    Id,
    TenantId,
    LocationId,
    CameraName,
}

#[derive(DeriveIden)]
enum LocationAlarms {
    Table,
    Id,
    TenantId,
    LocationId,
    RawAlarmId,
    CreatedAtUtc,
}
