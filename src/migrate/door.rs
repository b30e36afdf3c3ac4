//! Door resolution: natural key `(tenant, location, door_name)`.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};

use super::resolver::{Resolution, Resolvable, resolve_optional};
use crate::config::DestinationConfig;
use crate::models::door;
use crate::repositories::DoorRepository;

#[async_trait]
impl Resolvable for door::Model {
    const ENTITY: &'static str = "door";

    fn natural_key(&self, target: &DestinationConfig) -> String {
        format!(
            "tenant={}, location={}, door_name={}",
            target.tenant_id, target.location_id, self.door_name
        )
    }

    async fn find_equivalent(
        &self,
        dest: &DatabaseConnection,
        target: &DestinationConfig,
    ) -> Result<Option<String>, DbErr> {
        let existing = DoorRepository::new(dest)
            .find_by_natural_key(&target.tenant_id, &target.location_id, &self.door_name)
            .await?;
        Ok(existing.map(|door| door.id))
    }

    async fn create(
        &self,
        dest: &DatabaseConnection,
        new_id: &str,
        target: &DestinationConfig,
    ) -> Result<(), DbErr> {
        let copy = door::Model {
            id: new_id.to_string(),
            tenant_id: target.tenant_id.clone(),
            location_id: target.location_id.clone(),
            ..self.clone()
        };
        DoorRepository::new(dest).insert(copy).await?;
        Ok(())
    }
}

/// Resolve the door referenced by a source alarm, if any.
pub async fn migrate_door(
    source: &DatabaseConnection,
    dest: &DatabaseConnection,
    door_id: Option<&str>,
    target: &DestinationConfig,
) -> Option<Resolution> {
    let door_id = door_id?;

    let source_door = match DoorRepository::new(source).get_by_id(door_id).await {
        Ok(Some(door)) => door,
        Ok(None) => {
            tracing::warn!(door_id, "Door referenced by alarm not found in source");
            return None;
        }
        Err(err) => {
            tracing::error!(door_id, error = %err, "Failed to fetch source door");
            super::record_dependency_failure(door::Model::ENTITY);
            return None;
        }
    };

    resolve_optional(dest, Some(&source_door), target).await
}
