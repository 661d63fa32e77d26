//! Employee and department models.
//!
//! This module defines the canonical employee record held by the employee
//! directory, together with the closed role, contract-type and status
//! enums. Free-form status strings from upstream input are rejected at the
//! serde boundary.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role an employee holds within the system.
///
/// The role determines the capability set granted by the access control
/// gate; see [`crate::auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A regular employee: self-service access only.
    Employee,
    /// HR staff: reviews requests, manages the directory and payroll.
    Hr,
    /// Administrator: HR capabilities plus department management.
    Admin,
}

impl Role {
    /// Returns true for the staff roles (HR and admin).
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Hr | Role::Admin)
    }
}

/// The contractual employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    /// Full-time employment.
    #[serde(rename = "Full-time")]
    FullTime,
    /// Part-time employment.
    #[serde(rename = "Part-time")]
    PartTime,
    /// Fixed-term contract employment.
    Contract,
}

/// The current standing of an employee in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    /// Actively employed.
    Active,
    /// No longer active. Employees are deactivated, never hard-deleted,
    /// so dependent payslip and request records keep a resolvable history.
    Inactive,
    /// Temporarily away on approved leave.
    #[serde(rename = "On Leave")]
    OnLeave,
}

/// A canonical employee record.
///
/// The id is shared 1:1 with the employee's identity-provider account,
/// created at onboarding. The department is a weak reference by name; no
/// referential integrity is enforced against [`Department`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier, equal to the identity-provider account id.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Department name reference.
    pub department: String,
    /// Job title.
    pub designation: String,
    /// Monthly base salary before deductions. Never negative.
    pub base_salary: Decimal,
    /// The date the employee joined.
    pub joining_date: NaiveDate,
    /// The contractual arrangement.
    pub contract_type: ContractType,
    /// The current standing in the directory.
    pub status: EmployeeStatus,
    /// The role granted to this employee.
    pub role: Role,
    /// Optional reference to the reporting manager's employee id.
    #[serde(default)]
    pub manager_id: Option<Uuid>,
}

/// A department record. Referenced from [`Employee`] by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier.
    pub id: Uuid,
    /// Department name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create_test_employee(role: Role) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: "Jordan Ames".to_string(),
            email: "jordan.ames@example.com".to_string(),
            department: "Engineering".to_string(),
            designation: "Software Engineer".to_string(),
            base_salary: Decimal::from_str("5000").unwrap(),
            joining_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            contract_type: ContractType::FullTime,
            status: EmployeeStatus::Active,
            role,
            manager_id: None,
        }
    }

    #[test]
    fn test_role_serialization_is_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Employee).unwrap(), "\"employee\"");
        assert_eq!(serde_json::to_string(&Role::Hr).unwrap(), "\"hr\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result: Result<Role, _> = serde_json::from_str("\"superuser\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_contract_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ContractType::FullTime).unwrap(),
            "\"Full-time\""
        );
        assert_eq!(
            serde_json::to_string(&ContractType::PartTime).unwrap(),
            "\"Part-time\""
        );
        assert_eq!(
            serde_json::to_string(&ContractType::Contract).unwrap(),
            "\"Contract\""
        );
    }

    #[test]
    fn test_status_on_leave_uses_spaced_label() {
        assert_eq!(
            serde_json::to_string(&EmployeeStatus::OnLeave).unwrap(),
            "\"On Leave\""
        );
        let parsed: EmployeeStatus = serde_json::from_str("\"On Leave\"").unwrap();
        assert_eq!(parsed, EmployeeStatus::OnLeave);
    }

    #[test]
    fn test_is_staff() {
        assert!(!Role::Employee.is_staff());
        assert!(Role::Hr.is_staff());
        assert!(Role::Admin.is_staff());
    }

    #[test]
    fn test_employee_round_trip() {
        let employee = create_test_employee(Role::Employee);
        let json = serde_json::to_string(&employee).unwrap();
        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_employee_deserializes_without_manager() {
        let id = Uuid::new_v4();
        let json = format!(
            r#"{{
                "id": "{id}",
                "name": "Sam Perez",
                "email": "sam.perez@example.com",
                "department": "Human Resources",
                "designation": "HR Officer",
                "base_salary": "4200.50",
                "joining_date": "2024-02-12",
                "contract_type": "Part-time",
                "status": "Active",
                "role": "hr"
            }}"#
        );

        let employee: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee.role, Role::Hr);
        assert_eq!(employee.contract_type, ContractType::PartTime);
        assert_eq!(employee.base_salary, Decimal::from_str("4200.50").unwrap());
        assert!(employee.manager_id.is_none());
    }
}
