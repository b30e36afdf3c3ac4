//! Migration to create the doors table.
//!
//! Doors are matched across databases on (tenant_id, location_id, door_name),
//! so that triple is indexed.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Doors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Doors::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Doors::TenantId).string_len(64).not_null())
                    .col(ColumnDef::new(Doors::LocationId).string_len(64).not_null())
                    .col(ColumnDef::new(Doors::DoorName).string().not_null())
                    .col(ColumnDef::new(Doors::DoorType).string().null())
                    .col(ColumnDef::new(Doors::Description).text().null())
                    .col(
                        ColumnDef::new(Doors::CreatedAtUtc)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Doors::UpdatedAtUtc)
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
                    .name("idx_doors_tenant_location_name")
                    .table(Doors::Table)
                    .col(Doors::TenantId)
                    .col(Doors::LocationId)
                    .col(Doors::DoorName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Doors::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Doors {
    Table,
    Id,
    TenantId,
    LocationId,
    DoorName,
    DoorType,
    Description,
    CreatedAtUtc,
    UpdatedAtUtc,
}
