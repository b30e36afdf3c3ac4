//! Employee resolution: natural key `(tenant, first_name, last_name, phone_number)`.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};

use super::resolver::{Resolution, Resolvable, resolve_optional};
use crate::config::DestinationConfig;
use crate::models::employee;
use crate::repositories::EmployeeRepository;

#[async_trait]
impl Resolvable for employee::Model {
    const ENTITY: &'static str = "employee";

    fn natural_key(&self, target: &DestinationConfig) -> String {
        format!(
            "tenant={}, name={}, phone={}",
            target.tenant_id,
            self.full_name(),
            self.phone_number.as_deref().unwrap_or("<none>")
        )
    }

    async fn find_equivalent(
        &self,
        dest: &DatabaseConnection,
        target: &DestinationConfig,
    ) -> Result<Option<String>, DbErr> {
        let existing = EmployeeRepository::new(dest)
            .find_by_natural_key(
                &target.tenant_id,
                &self.first_name,
                &self.last_name,
                self.phone_number.as_deref(),
            )
            .await?;
        Ok(existing.map(|employee| employee.id))
    }

    async fn create(
        &self,
        dest: &DatabaseConnection,
        new_id: &str,
        target: &DestinationConfig,
    ) -> Result<(), DbErr> {
        let copy = employee::Model {
            id: new_id.to_string(),
            tenant_id: target.tenant_id.clone(),
            ..self.clone()
        };
        EmployeeRepository::new(dest).insert(copy).await?;
        Ok(())
    }
}

/// Resolve the employee referenced by a source alarm, if any.
pub async fn migrate_employee(
    source: &DatabaseConnection,
    dest: &DatabaseConnection,
    employee_id: Option<&str>,
    target: &DestinationConfig,
) -> Option<Resolution> {
    let employee_id = employee_id?;

    let source_employee = match EmployeeRepository::new(source).get_by_id(employee_id).await {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            tracing::warn!(employee_id, "Employee referenced by alarm not found in source");
            return None;
        }
        Err(err) => {
            tracing::error!(employee_id, error = %err, "Failed to fetch source employee");
            super::record_dependency_failure(employee::Model::ENTITY);
            return None;
        }
    };

    resolve_optional(dest, Some(&source_employee), target).await
}
