//! Payroll computation.
//!
//! This module contains the pure calculation core of the engine. It has no
//! access to the store: callers pass a base salary and a catalog snapshot,
//! and persist the output themselves.

mod payroll;

pub use payroll::{calculate_payroll, PayrollBreakdown};
