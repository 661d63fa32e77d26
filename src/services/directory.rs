//! The employee directory.
//!
//! Canonical employee records, created at onboarding in a 1:1 pairing with
//! an identity-provider account. There is no hard delete: employees are
//! deactivated, and dependent payslip/request records keep their
//! references. Departments are name-only records referenced weakly from
//! employees.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::auth::{authorize, Actor, Operation};
use crate::error::{EngineError, EngineResult};
use crate::identity::IdentityProvider;
use crate::models::{ContractType, Department, Employee, EmployeeStatus, Role};
use crate::store::Store;

/// Input for onboarding a new employee.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    /// Full name.
    pub name: String,
    /// Contact email; also the identity-provider account email.
    pub email: String,
    /// Department name reference.
    pub department: String,
    /// Job title.
    pub designation: String,
    /// Monthly base salary. Must be non-negative.
    pub base_salary: Decimal,
    /// The date the employee joins.
    pub joining_date: NaiveDate,
    /// The contractual arrangement.
    pub contract_type: ContractType,
    /// The role to grant.
    pub role: Role,
    /// Optional reporting manager.
    pub manager_id: Option<Uuid>,
}

/// A partial update to an employee record. `None` fields are left as-is.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    /// New full name.
    pub name: Option<String>,
    /// New department reference.
    pub department: Option<String>,
    /// New job title.
    pub designation: Option<String>,
    /// New base salary. Affects future payslips only.
    pub base_salary: Option<Decimal>,
    /// New contractual arrangement.
    pub contract_type: Option<ContractType>,
    /// New role.
    pub role: Option<Role>,
    /// New reporting manager.
    pub manager_id: Option<Uuid>,
}

/// Manages employee and department records.
#[derive(Clone)]
pub struct EmployeeDirectory {
    store: Arc<Store>,
    identity: Arc<dyn IdentityProvider>,
}

impl EmployeeDirectory {
    /// Creates a directory over the given store and identity provider.
    pub fn new(store: Arc<Store>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { store, identity }
    }

    /// Onboards a new employee. HR/admin only.
    ///
    /// Creates the identity-provider account first; its id becomes the
    /// employee id, keeping the pairing 1:1. A duplicate email surfaces as
    /// a validation error from the provider and no employee record is
    /// written.
    pub async fn onboard(
        &self,
        profile: NewEmployee,
        password: &str,
        actor: &Actor,
    ) -> EngineResult<Employee> {
        authorize(actor, Operation::ManageEmployees, None)?;

        if profile.name.trim().is_empty() {
            return Err(EngineError::validation("name", "must not be empty"));
        }
        if profile.base_salary < Decimal::ZERO {
            return Err(EngineError::validation(
                "base_salary",
                "must not be negative",
            ));
        }

        let id = self
            .identity
            .create_account(&profile.email, password)
            .await?;

        let employee = Employee {
            id,
            name: profile.name,
            email: profile.email,
            department: profile.department,
            designation: profile.designation,
            base_salary: profile.base_salary,
            joining_date: profile.joining_date,
            contract_type: profile.contract_type,
            status: EmployeeStatus::Active,
            role: profile.role,
            manager_id: profile.manager_id,
        };
        let employee = self.store.employees.insert(employee).await;

        info!(
            employee_id = %employee.id,
            name = %employee.name,
            role = ?employee.role,
            actor_id = %actor.id,
            "Employee onboarded"
        );
        Ok(employee)
    }

    /// Applies a partial update to an employee record. HR/admin only.
    pub async fn update(
        &self,
        employee_id: Uuid,
        changes: EmployeeUpdate,
        actor: &Actor,
    ) -> EngineResult<Employee> {
        authorize(actor, Operation::ManageEmployees, None)?;

        if let Some(salary) = changes.base_salary {
            if salary < Decimal::ZERO {
                return Err(EngineError::validation(
                    "base_salary",
                    "must not be negative",
                ));
            }
        }

        let updated = self
            .store
            .employees
            .update(employee_id, |employee| {
                if let Some(name) = changes.name {
                    employee.name = name;
                }
                if let Some(department) = changes.department {
                    employee.department = department;
                }
                if let Some(designation) = changes.designation {
                    employee.designation = designation;
                }
                if let Some(base_salary) = changes.base_salary {
                    employee.base_salary = base_salary;
                }
                if let Some(contract_type) = changes.contract_type {
                    employee.contract_type = contract_type;
                }
                if let Some(role) = changes.role {
                    employee.role = role;
                }
                if let Some(manager_id) = changes.manager_id {
                    employee.manager_id = Some(manager_id);
                }
                Ok(())
            })
            .await?;

        info!(employee_id = %updated.id, actor_id = %actor.id, "Employee record updated");
        Ok(updated)
    }

    /// Sets an employee's status. HR/admin only.
    ///
    /// Deactivation is the engine's replacement for deletion; dependent
    /// records stay behind with a resolvable history.
    pub async fn set_status(
        &self,
        employee_id: Uuid,
        status: EmployeeStatus,
        actor: &Actor,
    ) -> EngineResult<Employee> {
        authorize(actor, Operation::ManageEmployees, None)?;

        let updated = self
            .store
            .employees
            .update(employee_id, |employee| {
                employee.status = status;
                Ok(())
            })
            .await?;

        info!(
            employee_id = %updated.id,
            status = ?updated.status,
            actor_id = %actor.id,
            "Employee status changed"
        );
        Ok(updated)
    }

    /// Returns one employee record. Employees may read their own only.
    pub async fn get(&self, employee_id: Uuid, actor: &Actor) -> EngineResult<Employee> {
        authorize(actor, Operation::ViewEmployee, Some(employee_id))?;

        self.store
            .employees
            .get(employee_id)
            .await
            .ok_or_else(|| EngineError::NotFound {
                entity: "employee".to_string(),
                id: employee_id.to_string(),
            })
    }

    /// Returns all employee records. HR/admin only.
    pub async fn list(&self, actor: &Actor) -> EngineResult<Vec<Employee>> {
        authorize(actor, Operation::ViewEmployee, None)?;
        Ok(self.store.employees.list().await)
    }

    /// Resolves an employee id to a display name, falling back to
    /// "Unknown" for references that no longer resolve.
    pub async fn resolve_name(&self, employee_id: Uuid) -> String {
        match self.store.employees.get(employee_id).await {
            Some(employee) => employee.name,
            None => "Unknown".to_string(),
        }
    }

    /// Resolves an authenticated identity id to an acting identity.
    ///
    /// Fails if no employee record exists for the id or the employee is
    /// inactive.
    pub async fn actor_for(&self, identity_id: Uuid) -> EngineResult<Actor> {
        let employee = self
            .store
            .employees
            .get(identity_id)
            .await
            .ok_or_else(|| EngineError::Unauthorized {
                actor: identity_id.to_string(),
                operation: "access the system".to_string(),
            })?;

        if employee.status == EmployeeStatus::Inactive {
            return Err(EngineError::Unauthorized {
                actor: identity_id.to_string(),
                operation: "access the system".to_string(),
            });
        }

        Ok(Actor::new(employee.id, employee.role))
    }

    /// Creates a department. Admin only; duplicate names conflict.
    pub async fn add_department(&self, name: &str, actor: &Actor) -> EngineResult<Department> {
        authorize(actor, Operation::ManageDepartments, None)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::validation("name", "must not be empty"));
        }

        let department = Department {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        let department = self
            .store
            .departments
            .insert_unique(
                department,
                |d| d.name == name,
                &format!("department '{name}' already exists"),
            )
            .await?;

        info!(department_id = %department.id, name = %department.name, "Department created");
        Ok(department)
    }

    /// Returns all departments.
    pub async fn list_departments(&self) -> Vec<Department> {
        self.store.departments.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::InMemoryIdentityProvider;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn directory() -> EmployeeDirectory {
        EmployeeDirectory::new(
            Arc::new(Store::new()),
            Arc::new(InMemoryIdentityProvider::new()),
        )
    }

    fn admin() -> Actor {
        Actor::new(Uuid::new_v4(), Role::Admin)
    }

    fn profile(email: &str) -> NewEmployee {
        NewEmployee {
            name: "Jordan Ames".to_string(),
            email: email.to_string(),
            department: "Engineering".to_string(),
            designation: "Software Engineer".to_string(),
            base_salary: dec("5000"),
            joining_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            contract_type: ContractType::FullTime,
            role: Role::Employee,
            manager_id: None,
        }
    }

    #[tokio::test]
    async fn test_onboard_pairs_employee_with_account() {
        let directory = directory();
        let employee = directory
            .onboard(profile("jordan@example.com"), "initial-pw", &admin())
            .await
            .unwrap();

        assert_eq!(employee.status, EmployeeStatus::Active);
        let fetched = directory.get(employee.id, &admin()).await.unwrap();
        assert_eq!(fetched, employee);
    }

    #[tokio::test]
    async fn test_duplicate_email_writes_no_employee() {
        let directory = directory();
        let actor = admin();
        directory
            .onboard(profile("jordan@example.com"), "pw", &actor)
            .await
            .unwrap();

        let result = directory
            .onboard(profile("jordan@example.com"), "pw", &actor)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            EngineError::Validation { .. }
        ));
        assert_eq!(directory.list(&actor).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_negative_salary_rejected_before_account_creation() {
        let directory = directory();
        let mut bad = profile("jordan@example.com");
        bad.base_salary = dec("-1");

        let result = directory.onboard(bad, "pw", &admin()).await;
        assert!(matches!(
            result.unwrap_err(),
            EngineError::Validation { field, .. } if field == "base_salary"
        ));

        // The email must still be available.
        assert!(directory
            .onboard(profile("jordan@example.com"), "pw", &admin())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_employee_cannot_onboard() {
        let directory = directory();
        let employee_actor = Actor::new(Uuid::new_v4(), Role::Employee);

        let result = directory
            .onboard(profile("x@example.com"), "pw", &employee_actor)
            .await;
        assert!(matches!(
            result.unwrap_err(),
            EngineError::Unauthorized { .. }
        ));
    }

    #[tokio::test]
    async fn test_partial_update() {
        let directory = directory();
        let actor = admin();
        let employee = directory
            .onboard(profile("jordan@example.com"), "pw", &actor)
            .await
            .unwrap();

        let updated = directory
            .update(
                employee.id,
                EmployeeUpdate {
                    base_salary: Some(dec("5500")),
                    designation: Some("Senior Engineer".to_string()),
                    ..Default::default()
                },
                &actor,
            )
            .await
            .unwrap();

        assert_eq!(updated.base_salary, dec("5500"));
        assert_eq!(updated.designation, "Senior Engineer");
        assert_eq!(updated.name, employee.name);
    }

    #[tokio::test]
    async fn test_self_view_allowed_cross_view_denied() {
        let directory = directory();
        let staff = admin();
        let first = directory
            .onboard(profile("a@example.com"), "pw", &staff)
            .await
            .unwrap();
        let second = directory
            .onboard(profile("b@example.com"), "pw", &staff)
            .await
            .unwrap();

        let first_actor = Actor::new(first.id, Role::Employee);
        assert!(directory.get(first.id, &first_actor).await.is_ok());
        assert!(matches!(
            directory.get(second.id, &first_actor).await.unwrap_err(),
            EngineError::Unauthorized { .. }
        ));
        assert!(matches!(
            directory.list(&first_actor).await.unwrap_err(),
            EngineError::Unauthorized { .. }
        ));
    }

    #[tokio::test]
    async fn test_inactive_employee_cannot_act() {
        let directory = directory();
        let actor = admin();
        let employee = directory
            .onboard(profile("jordan@example.com"), "pw", &actor)
            .await
            .unwrap();

        assert!(directory.actor_for(employee.id).await.is_ok());

        directory
            .set_status(employee.id, EmployeeStatus::Inactive, &actor)
            .await
            .unwrap();

        assert!(matches!(
            directory.actor_for(employee.id).await.unwrap_err(),
            EngineError::Unauthorized { .. }
        ));
    }

    #[tokio::test]
    async fn test_resolve_name_falls_back_to_unknown() {
        let directory = directory();
        assert_eq!(directory.resolve_name(Uuid::new_v4()).await, "Unknown");
    }

    #[tokio::test]
    async fn test_departments_are_admin_only_and_unique() {
        let directory = directory();
        let hr = Actor::new(Uuid::new_v4(), Role::Hr);
        let root = admin();

        assert!(matches!(
            directory.add_department("Engineering", &hr).await.unwrap_err(),
            EngineError::Unauthorized { .. }
        ));

        directory.add_department("Engineering", &root).await.unwrap();
        let duplicate = directory.add_department("Engineering", &root).await;
        assert!(matches!(
            duplicate.unwrap_err(),
            EngineError::Conflict { .. }
        ));
        assert_eq!(directory.list_departments().await.len(), 1);
    }
}
