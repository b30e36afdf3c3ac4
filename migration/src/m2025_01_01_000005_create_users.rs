//! Migration to create the users table.
//!
//! Users are matched first by id and then by email, so email is indexed.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::Password).string().null())
                    .col(ColumnDef::new(Users::TenantId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAtUtc)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAtUtc)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Users::RefreshToken).text().null())
                    .col(
                        ColumnDef::new(Users::RefreshTokenExpires)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Users::RoleId).string_len(64).null())
                    .col(ColumnDef::new(Users::MspTenants).json().null())
                    .col(ColumnDef::new(Users::MspLocations).json().null())
                    .col(ColumnDef::new(Users::VisionTenants).json().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    IsEnabled,
    Password,
    TenantId,
    CreatedAtUtc,
    UpdatedAtUtc,
    RefreshToken,
    RefreshTokenExpires,
    RoleId,
    MspTenants,
    MspLocations,
    VisionTenants,
}
