//! Request types for the payroll engine API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ContractType, DeductionKind, EmployeeStatus, LeaveType, Month, Role};
use crate::services::{EmployeeUpdate, NewEmployee};

/// Body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardRequest {
    /// Full name.
    pub name: String,
    /// Account and contact email.
    pub email: String,
    /// Initial identity-provider password.
    pub password: String,
    /// Department name reference.
    pub department: String,
    /// Job title.
    pub designation: String,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Joining date.
    pub joining_date: NaiveDate,
    /// Contractual arrangement.
    pub contract_type: ContractType,
    /// Role to grant.
    pub role: Role,
    /// Optional reporting manager.
    #[serde(default)]
    pub manager_id: Option<Uuid>,
}

impl OnboardRequest {
    /// Splits the request into the directory profile and the password.
    pub fn into_parts(self) -> (NewEmployee, String) {
        (
            NewEmployee {
                name: self.name,
                email: self.email,
                department: self.department,
                designation: self.designation,
                base_salary: self.base_salary,
                joining_date: self.joining_date,
                contract_type: self.contract_type,
                role: self.role,
                manager_id: self.manager_id,
            },
            self.password,
        )
    }
}

/// Body for `PUT /employees/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    /// New full name.
    #[serde(default)]
    pub name: Option<String>,
    /// New department reference.
    #[serde(default)]
    pub department: Option<String>,
    /// New job title.
    #[serde(default)]
    pub designation: Option<String>,
    /// New base salary.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// New contractual arrangement.
    #[serde(default)]
    pub contract_type: Option<ContractType>,
    /// New role.
    #[serde(default)]
    pub role: Option<Role>,
    /// New reporting manager.
    #[serde(default)]
    pub manager_id: Option<Uuid>,
}

impl From<UpdateEmployeeRequest> for EmployeeUpdate {
    fn from(req: UpdateEmployeeRequest) -> Self {
        EmployeeUpdate {
            name: req.name,
            department: req.department,
            designation: req.designation,
            base_salary: req.base_salary,
            contract_type: req.contract_type,
            role: req.role,
            manager_id: req.manager_id,
        }
    }
}

/// Body for `PUT /employees/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatusRequest {
    /// The new status.
    pub status: EmployeeStatus,
}

/// Body for `POST /departments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartmentRequest {
    /// Department name.
    pub name: String,
}

/// Body for `POST /deductions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeductionRequest {
    /// Rule name.
    pub name: String,
    /// How the amount is interpreted.
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    /// Currency amount or percentage.
    pub amount: Decimal,
}

/// Body for `POST /payslips`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayslipRequest {
    /// The employee to pay.
    pub employee_id: Uuid,
    /// The month of the pay period.
    pub month: Month,
    /// The year of the pay period.
    pub year: i32,
}

/// Body for `POST /attendance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAttendanceRequest {
    /// The employee the claim is for.
    pub employee_id: Uuid,
    /// The day claimed.
    pub date: NaiveDate,
}

/// Body for `POST /leave`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitLeaveRequest {
    /// The user applying for leave.
    pub user_id: Uuid,
    /// First day of leave, inclusive.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// The category of leave.
    pub leave_type: LeaveType,
    /// Free-text justification.
    pub reason: String,
}

/// Body for the decision endpoints. The outcome is parsed as a closed
/// enum; unknown strings are rejected at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// `Approved` or `Rejected`. `Pending` fails validation downstream.
    pub outcome: crate::models::RequestStatus,
}

/// Query for `GET /payslips`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayslipQuery {
    /// Restrict to one employee's payslips.
    #[serde(default)]
    pub employee_id: Option<Uuid>,
}

/// Query for `GET /attendance`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceQuery {
    /// Restrict to one employee's claims.
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    /// Start of the review range, inclusive.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// End of the review range, inclusive.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// Query for `GET /leave`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaveQuery {
    /// Restrict to one user's applications.
    #[serde(default)]
    pub user_id: Option<Uuid>,
}
