//! Workflow services.
//!
//! Each service owns one component of the engine: the deduction catalog,
//! the employee directory, the payslip lifecycle, and the attendance and
//! leave request workflows. Services hold a shared [`crate::store::Store`],
//! take the acting identity as an explicit parameter, and consult the
//! access control gate before every state change.

mod attendance;
mod catalog;
mod directory;
mod leave;
mod payslips;

pub use attendance::AttendanceWorkflow;
pub use catalog::DeductionCatalog;
pub use directory::{EmployeeDirectory, EmployeeUpdate, NewEmployee};
pub use leave::LeaveWorkflow;
pub use payslips::PayslipService;
