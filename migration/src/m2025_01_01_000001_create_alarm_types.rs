//! Migration to create the alarm_types table.
//!
//! Alarm types are looked up by exact name when mapping a source alarm's
//! type onto the destination catalogue.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AlarmTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AlarmTypes::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AlarmTypes::AlarmType).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_alarm_types_alarm_type")
                    .table(AlarmTypes::Table)
                    .col(AlarmTypes::AlarmType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AlarmTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AlarmTypes {
    Table,
    Id,
    AlarmType,
}
