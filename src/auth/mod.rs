//! Access control gate.
//!
//! Maps an authenticated actor's role to the capability set permitted on
//! the engine's components. The gate is pure and stateless; every mutating
//! service operation consults it before touching the store. Actor identity
//! is always an explicit parameter, never read from ambient context.

use tracing::warn;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::Role;

/// An authenticated actor performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// The actor's employee/identity id.
    pub id: Uuid,
    /// The actor's role from the employee directory.
    pub role: Role,
}

impl Actor {
    /// Creates a new actor.
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }
}

/// The gated operations of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Submit an attendance claim.
    SubmitAttendance,
    /// Approve or reject an attendance claim.
    DecideAttendance,
    /// Submit a leave application.
    SubmitLeave,
    /// Approve or reject a leave application.
    DecideLeave,
    /// Generate a payslip.
    GeneratePayslip,
    /// Mark a payslip as paid.
    MarkPayslipPaid,
    /// Read a payslip.
    ViewPayslip,
    /// Read an employee record.
    ViewEmployee,
    /// Create or mutate employee records.
    ManageEmployees,
    /// Create or delete deduction rules.
    ManageDeductions,
    /// Create departments.
    ManageDepartments,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Operation::SubmitAttendance => "submit attendance requests",
            Operation::DecideAttendance => "decide attendance requests",
            Operation::SubmitLeave => "submit leave requests",
            Operation::DecideLeave => "decide leave requests",
            Operation::GeneratePayslip => "generate payslips",
            Operation::MarkPayslipPaid => "mark payslips paid",
            Operation::ViewPayslip => "view payslips",
            Operation::ViewEmployee => "view employee records",
            Operation::ManageEmployees => "manage employee records",
            Operation::ManageDeductions => "manage deduction rules",
            Operation::ManageDepartments => "manage departments",
        };
        f.write_str(label)
    }
}

/// Returns whether `actor` may perform `operation` on a record owned by
/// `owner`.
///
/// Employees may submit requests and read records for themselves only.
/// HR and admin hold every capability except department management, which
/// is admin-only.
pub fn can_perform(actor: &Actor, operation: Operation, owner: Option<Uuid>) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Hr => !matches!(operation, Operation::ManageDepartments),
        Role::Employee => match operation {
            Operation::SubmitAttendance
            | Operation::SubmitLeave
            | Operation::ViewPayslip
            | Operation::ViewEmployee => owner == Some(actor.id),
            _ => false,
        },
    }
}

/// Checks the gate and returns an `Unauthorized` error on denial.
///
/// Denials are logged; they are surfaced to the caller, not retried.
pub fn authorize(actor: &Actor, operation: Operation, owner: Option<Uuid>) -> EngineResult<()> {
    if can_perform(actor, operation, owner) {
        Ok(())
    } else {
        warn!(
            actor_id = %actor.id,
            role = ?actor.role,
            operation = %operation,
            "Access denied"
        );
        Err(EngineError::Unauthorized {
            actor: actor.id.to_string(),
            operation: operation.to_string(),
        })
    }
}
