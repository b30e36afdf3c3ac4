//! Door repository
//!
//! Doors are matched across databases by `(tenant_id, location_id, door_name)`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::models::door::{self, Entity as Door};

/// Repository for door database operations
pub struct DoorRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DoorRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<door::Model>, DbErr> {
        Door::find_by_id(id.to_string()).one(self.db).await
    }

    /// Find a door by its natural key within a tenant and location
    pub async fn find_by_natural_key(
        &self,
        tenant_id: &str,
        location_id: &str,
        door_name: &str,
    ) -> Result<Option<door::Model>, DbErr> {
        Door::find()
            .filter(door::Column::TenantId.eq(tenant_id))
            .filter(door::Column::LocationId.eq(location_id))
            .filter(door::Column::DoorName.eq(door_name))
            .order_by_asc(door::Column::CreatedAtUtc)
            .one(self.db)
            .await
    }

    pub async fn insert(&self, door: door::Model) -> Result<door::Model, DbErr> {
        door::ActiveModel {
            id: Set(door.id),
            tenant_id: Set(door.tenant_id),
            location_id: Set(door.location_id),
            door_name: Set(door.door_name),
            door_type: Set(door.door_type),
            description: Set(door.description),
            created_at_utc: Set(door.created_at_utc),
            updated_at_utc: Set(door.updated_at_utc),
        }
        .insert(self.db)
        .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        Door::find().count(self.db).await
    }
}
