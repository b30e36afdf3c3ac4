//! Employee repository

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::models::employee::{self, Entity as Employee};

/// Repository for employee database operations
pub struct EmployeeRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EmployeeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<employee::Model>, DbErr> {
        Employee::find_by_id(id.to_string()).one(self.db).await
    }

    /// Find an employee by `(tenant_id, first_name, last_name, phone_number)`.
    ///
    /// A missing phone number only matches rows whose phone number is NULL.
    pub async fn find_by_natural_key(
        &self,
        tenant_id: &str,
        first_name: &str,
        last_name: &str,
        phone_number: Option<&str>,
    ) -> Result<Option<employee::Model>, DbErr> {
        let phone_filter = match phone_number {
            Some(phone) => employee::Column::PhoneNumber.eq(phone),
            None => employee::Column::PhoneNumber.is_null(),
        };

        Employee::find()
            .filter(employee::Column::TenantId.eq(tenant_id))
            .filter(employee::Column::FirstName.eq(first_name))
            .filter(employee::Column::LastName.eq(last_name))
            .filter(phone_filter)
            .order_by_asc(employee::Column::CreatedAtUtc)
            .one(self.db)
            .await
    }

    pub async fn insert(&self, employee: employee::Model) -> Result<employee::Model, DbErr> {
        employee::ActiveModel {
            id: Set(employee.id),
            tenant_id: Set(employee.tenant_id),
            first_name: Set(employee.first_name),
            last_name: Set(employee.last_name),
            phone_number: Set(employee.phone_number),
            email: Set(employee.email),
            created_at_utc: Set(employee.created_at_utc),
            updated_at_utc: Set(employee.updated_at_utc),
        }
        .insert(self.db)
        .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        Employee::find().count(self.db).await
    }
}
