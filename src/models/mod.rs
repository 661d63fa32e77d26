//! Domain models for the payroll engine.
//!
//! This module contains the record types persisted in the document store:
//! employees and departments, deduction rules, payslips, and the two
//! request-workflow records.

mod deduction;
mod employee;
mod payslip;
mod request;

pub use deduction::{DeductionKind, DeductionRule};
pub use employee::{ContractType, Department, Employee, EmployeeStatus, Role};
pub use payslip::{DeductionLine, Month, PayPeriod, PaymentStatus, Payslip};
pub use request::{AttendanceRequest, LeaveRequest, LeaveType, RequestStatus};
