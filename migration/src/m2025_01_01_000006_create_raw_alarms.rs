//! Migration to create the raw_alarms_v2 table.
//!
//! The unique index on (source_id, tenant_id, partition_key) is the alarm
//! de-duplication key. Dependent ids are plain columns without foreign keys
//! because dependents are written before the alarm that references them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RawAlarms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RawAlarms::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RawAlarms::SourceId).string().not_null())
                    .col(ColumnDef::new(RawAlarms::TenantId).string_len(64).not_null())
                    .col(ColumnDef::new(RawAlarms::PartitionKey).integer().not_null())
                    .col(
                        ColumnDef::new(RawAlarms::AlarmTypeId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RawAlarms::SourceEntityType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RawAlarms::SourceEntityId).string_len(64).null())
                    .col(ColumnDef::new(RawAlarms::DoorId).string_len(64).null())
                    .col(ColumnDef::new(RawAlarms::EmployeeId).string_len(64).null())
                    .col(ColumnDef::new(RawAlarms::UserId).string_len(64).null())
                    .col(ColumnDef::new(RawAlarms::LatestAlarmMediaId).integer().null())
                    .col(ColumnDef::new(RawAlarms::AlarmUpdateId).string_len(64).null())
                    .col(ColumnDef::new(RawAlarms::MlOutputId).string_len(64).null())
                    .col(ColumnDef::new(RawAlarms::AlarmState).string_len(32).not_null())
                    .col(ColumnDef::new(RawAlarms::CurrentStatus).string().null())
                    .col(ColumnDef::new(RawAlarms::TrueAlarmProbability).double().null())
                    .col(ColumnDef::new(RawAlarms::AlarmDescription).text().null())
                    .col(ColumnDef::new(RawAlarms::AlarmDetails).json().null())
                    .col(
                        ColumnDef::new(RawAlarms::AlarmTimestampUtc)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RawAlarms::CreatedAtUtc)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RawAlarms::UpdatedAtUtc)
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
                    .name("uq_raw_alarms_source_tenant_partition")
                    .table(RawAlarms::Table)
                    .col(RawAlarms::SourceId)
                    .col(RawAlarms::TenantId)
                    .col(RawAlarms::PartitionKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_raw_alarms_source_entity")
                    .table(RawAlarms::Table)
                    .col(RawAlarms::SourceEntityId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uq_raw_alarms_source_tenant_partition")
                    .table(RawAlarms::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RawAlarms::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RawAlarms {
    #[sea_orm(iden = "raw_alarms_v2")]
    Table,
    Id,
    SourceId,
    TenantId,
    PartitionKey,
    AlarmTypeId,
    SourceEntityType,
    SourceEntityId,
    DoorId,
    EmployeeId,
    UserId,
    LatestAlarmMediaId,
    AlarmUpdateId,
    MlOutputId,
    AlarmState,
    CurrentStatus,
    TrueAlarmProbability,
    AlarmDescription,
    AlarmDetails,
    AlarmTimestampUtc,
    CreatedAtUtc,
    UpdatedAtUtc,
}
