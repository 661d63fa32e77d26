//! Payroll & Workforce Record Engine
//!
//! This crate implements the payroll and request-approval core of a
//! workforce-record application: a deduction catalog, a pure payroll
//! calculator, a payslip lifecycle manager, attendance and leave request
//! workflows, an employee directory, and a role-based access control gate,
//! all backed by an observable in-memory document store.

#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod calculation;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod services;
pub mod store;
