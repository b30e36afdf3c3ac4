//! User repository
//!
//! Users are matched first by identifier, then by email address. Email
//! lookups are not tenant scoped: an address identifies one account.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::models::user::{self, Entity as User};

/// Repository for user database operations
pub struct UserRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id.to_string()).one(self.db).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .order_by_asc(user::Column::CreatedAtUtc)
            .one(self.db)
            .await
    }

    pub async fn insert(&self, user: user::Model) -> Result<user::Model, DbErr> {
        user::ActiveModel {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            is_enabled: Set(user.is_enabled),
            password: Set(user.password),
            tenant_id: Set(user.tenant_id),
            created_at_utc: Set(user.created_at_utc),
            updated_at_utc: Set(user.updated_at_utc),
            refresh_token: Set(user.refresh_token),
            refresh_token_expires: Set(user.refresh_token_expires),
            role_id: Set(user.role_id),
            msp_tenants: Set(user.msp_tenants),
            msp_locations: Set(user.msp_locations),
            vision_tenants: Set(user.vision_tenants),
        }
        .insert(self.db)
        .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        User::find().count(self.db).await
    }
}
