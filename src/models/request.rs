//! Attendance and leave request models.
//!
//! Both records share the same one-way state machine: Pending → Approved
//! or Rejected, decided exactly once.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The state of a request in the approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Submitted, awaiting review. Initial state.
    Pending,
    /// Approved by HR/admin. Terminal.
    Approved,
    /// Rejected by HR/admin. Terminal.
    Rejected,
}

impl RequestStatus {
    /// Returns true if the request has been decided and can no longer
    /// change state.
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Rejected)
    }
}

/// An employee's claim of presence for a single calendar day.
///
/// At most one request may exist per (employee, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// Unique identifier.
    pub id: Uuid,
    /// The employee the claim is for.
    pub employee_id: Uuid,
    /// The calendar day claimed.
    pub date: NaiveDate,
    /// The workflow state.
    pub status: RequestStatus,
    /// When the claim was submitted.
    pub requested_at: DateTime<Utc>,
    /// The reviewer who decided the request, set for both outcomes.
    #[serde(default)]
    pub approved_by: Option<Uuid>,
    /// When the request was decided.
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
}

/// The category of a leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveType {
    /// Planned annual leave.
    #[serde(rename = "Annual Leave")]
    Annual,
    /// Illness-related leave.
    #[serde(rename = "Sick Leave")]
    Sick,
    /// Short-notice personal leave.
    #[serde(rename = "Casual Leave")]
    Casual,
    /// Leave without pay.
    #[serde(rename = "Unpaid Leave")]
    Unpaid,
}

/// An employee's application for a date range of leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier.
    pub id: Uuid,
    /// The user applying for leave.
    pub user_id: Uuid,
    /// First day of leave, inclusive. Never after `end_date`.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// The category of leave.
    pub leave_type: LeaveType,
    /// Free-text justification.
    pub reason: String,
    /// The workflow state.
    pub status: RequestStatus,
    /// When the application was submitted.
    pub submitted_at: DateTime<Utc>,
    /// The reviewer who decided the request, set for both outcomes.
    #[serde(default)]
    pub approved_by: Option<Uuid>,
    /// When the request was decided.
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    /// Returns true if this request's date range intersects the given
    /// inclusive range.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}
