//! The attendance request workflow.
//!
//! Employee-initiated daily presence claims, reviewed by HR/admin. At most
//! one claim may exist per (employee, date), and a claim is decided at
//! most once: the first reviewer to write wins.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::auth::{authorize, Actor, Operation};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRequest, RequestStatus};
use crate::store::Store;

/// Manages attendance claims.
#[derive(Clone)]
pub struct AttendanceWorkflow {
    store: Arc<Store>,
}

impl AttendanceWorkflow {
    /// Creates a workflow over the given store.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Submits a presence claim for one calendar day.
    ///
    /// Employees may submit for themselves only. The duplicate check and
    /// the insert run under a single store guard, so two rapid submissions
    /// for the same day cannot both succeed.
    pub async fn submit(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        actor: &Actor,
    ) -> EngineResult<AttendanceRequest> {
        authorize(actor, Operation::SubmitAttendance, Some(employee_id))?;

        if self.store.employees.get(employee_id).await.is_none() {
            return Err(EngineError::NotFound {
                entity: "employee".to_string(),
                id: employee_id.to_string(),
            });
        }

        let request = AttendanceRequest {
            id: Uuid::new_v4(),
            employee_id,
            date,
            status: RequestStatus::Pending,
            requested_at: Utc::now(),
            approved_by: None,
            approved_at: None,
        };

        let request = self
            .store
            .attendance_requests
            .insert_unique(
                request,
                |r| r.employee_id == employee_id && r.date == date,
                &format!("attendance already requested for {date}"),
            )
            .await?;

        info!(
            request_id = %request.id,
            employee_id = %employee_id,
            date = %date,
            "Attendance request submitted"
        );
        Ok(request)
    }

    /// Decides a pending claim. HR/admin only.
    ///
    /// The outcome must be terminal. A request that is no longer Pending
    /// fails the precondition, so of two concurrent reviewers exactly one
    /// wins. The reviewer and decision time are recorded for both
    /// outcomes.
    pub async fn decide(
        &self,
        request_id: Uuid,
        outcome: RequestStatus,
        actor: &Actor,
    ) -> EngineResult<AttendanceRequest> {
        authorize(actor, Operation::DecideAttendance, None)?;

        if !outcome.is_terminal() {
            return Err(EngineError::validation(
                "outcome",
                "must be Approved or Rejected",
            ));
        }

        let actor_id = actor.id;
        let request = self
            .store
            .attendance_requests
            .update(request_id, |request| {
                if request.status != RequestStatus::Pending {
                    return Err(EngineError::InvalidTransition {
                        entity: "attendance request".to_string(),
                        id: request_id.to_string(),
                        message: format!("already {:?}", request.status),
                    });
                }
                request.status = outcome;
                request.approved_by = Some(actor_id);
                request.approved_at = Some(Utc::now());
                Ok(())
            })
            .await?;

        info!(
            request_id = %request.id,
            outcome = ?outcome,
            actor_id = %actor.id,
            "Attendance request decided"
        );
        Ok(request)
    }

    /// Returns one employee's claims, oldest first. Self-service or staff.
    pub async fn list_for_employee(
        &self,
        employee_id: Uuid,
        actor: &Actor,
    ) -> EngineResult<Vec<AttendanceRequest>> {
        authorize(actor, Operation::ViewEmployee, Some(employee_id))?;
        Ok(self
            .store
            .attendance_requests
            .find(|r| r.employee_id == employee_id)
            .await)
    }

    /// Returns all claims within an inclusive date range. HR/admin review
    /// projection.
    pub async fn list_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        actor: &Actor,
    ) -> EngineResult<Vec<AttendanceRequest>> {
        authorize(actor, Operation::DecideAttendance, None)?;
        Ok(self
            .store
            .attendance_requests
            .find(|r| r.date >= from && r.date <= to)
            .await)
    }
}
