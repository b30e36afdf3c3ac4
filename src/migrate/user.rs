//! User resolution.
//!
//! Two stages: a destination row with the same identifier means the user was
//! already migrated verbatim and wins; otherwise a row with the same email is
//! reused. Only when both miss is a copy created.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};

use super::non_empty_json;
use super::resolver::{Resolution, Resolvable, resolve_optional};
use crate::config::DestinationConfig;
use crate::models::user;
use crate::repositories::UserRepository;

#[async_trait]
impl Resolvable for user::Model {
    const ENTITY: &'static str = "user";

    fn natural_key(&self, _target: &DestinationConfig) -> String {
        format!("id={}, email={}", self.id, self.email)
    }

    async fn find_equivalent(
        &self,
        dest: &DatabaseConnection,
        _target: &DestinationConfig,
    ) -> Result<Option<String>, DbErr> {
        let users = UserRepository::new(dest);

        if let Some(same_id) = users.get_by_id(&self.id).await? {
            tracing::debug!(user_id = %same_id.id, "User already present under the same id");
            return Ok(Some(same_id.id));
        }

        let by_email = users.find_by_email(&self.email).await?;
        Ok(by_email.map(|user| user.id))
    }

    async fn create(
        &self,
        dest: &DatabaseConnection,
        new_id: &str,
        target: &DestinationConfig,
    ) -> Result<(), DbErr> {
        let copy = user::Model {
            id: new_id.to_string(),
            tenant_id: target.tenant_id.clone(),
            msp_tenants: non_empty_json(self.msp_tenants.clone()),
            msp_locations: non_empty_json(self.msp_locations.clone()),
            vision_tenants: non_empty_json(self.vision_tenants.clone()),
            ..self.clone()
        };
        UserRepository::new(dest).insert(copy).await?;
        Ok(())
    }
}

/// Destination identifier for the source user `user_id`.
///
/// Returns `None` when the user is unknown in the source or cannot be
/// resolved; the caller keeps going without an author.
pub async fn migrate_user(
    source: &DatabaseConnection,
    dest: &DatabaseConnection,
    user_id: &str,
    target: &DestinationConfig,
) -> Option<Resolution> {
    let source_user = match UserRepository::new(source).get_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!(user_id, "User not found in source, update will have no author");
            return None;
        }
        Err(err) => {
            tracing::error!(user_id, error = %err, "Failed to fetch source user");
            super::record_dependency_failure(user::Model::ENTITY);
            return None;
        }
    };

    resolve_optional(dest, Some(&source_user), target).await
}
