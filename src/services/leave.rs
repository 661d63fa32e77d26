//! The leave request workflow.
//!
//! Employee-initiated date-range leave applications with the same one-way
//! approval state machine as attendance. A new application may not overlap
//! the same user's pending or approved leave.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::auth::{authorize, Actor, Operation};
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveRequest, LeaveType, RequestStatus};
use crate::store::Store;

/// Manages leave applications.
#[derive(Clone)]
pub struct LeaveWorkflow {
    store: Arc<Store>,
}

impl LeaveWorkflow {
    /// Creates a workflow over the given store.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Submits a leave application.
    ///
    /// Employees may submit for themselves only. Fails with a validation
    /// error if the reason is empty or the range is inverted — before
    /// anything reaches the store. Overlap with the user's existing
    /// pending or approved leave is a conflict; rejected applications
    /// don't block.
    pub async fn submit(
        &self,
        user_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        leave_type: LeaveType,
        reason: &str,
        actor: &Actor,
    ) -> EngineResult<LeaveRequest> {
        authorize(actor, Operation::SubmitLeave, Some(user_id))?;

        if start_date > end_date {
            return Err(EngineError::validation(
                "end_date",
                "must not be before start_date",
            ));
        }
        if reason.trim().is_empty() {
            return Err(EngineError::validation("reason", "must not be empty"));
        }

        let request = LeaveRequest {
            id: Uuid::new_v4(),
            user_id,
            start_date,
            end_date,
            leave_type,
            reason: reason.trim().to_string(),
            status: RequestStatus::Pending,
            submitted_at: Utc::now(),
            approved_by: None,
            approved_at: None,
        };

        let request = self
            .store
            .leave_requests
            .insert_unique(
                request,
                |r| {
                    r.user_id == user_id
                        && r.status != RequestStatus::Rejected
                        && r.overlaps(start_date, end_date)
                },
                &format!("leave already requested between {start_date} and {end_date}"),
            )
            .await?;

        info!(
            request_id = %request.id,
            user_id = %user_id,
            start_date = %start_date,
            end_date = %end_date,
            leave_type = ?leave_type,
            "Leave request submitted"
        );
        Ok(request)
    }

    /// Decides a pending application. HR/admin only; first writer wins.
    pub async fn decide(
        &self,
        request_id: Uuid,
        outcome: RequestStatus,
        actor: &Actor,
    ) -> EngineResult<LeaveRequest> {
        authorize(actor, Operation::DecideLeave, None)?;

        if !outcome.is_terminal() {
            return Err(EngineError::validation(
                "outcome",
                "must be Approved or Rejected",
            ));
        }

        let actor_id = actor.id;
        let request = self
            .store
            .leave_requests
            .update(request_id, |request| {
                if request.status != RequestStatus::Pending {
                    return Err(EngineError::InvalidTransition {
                        entity: "leave request".to_string(),
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
            "Leave request decided"
        );
        Ok(request)
    }

    /// Returns one user's applications, oldest first. Self-service or staff.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        actor: &Actor,
    ) -> EngineResult<Vec<LeaveRequest>> {
        authorize(actor, Operation::ViewEmployee, Some(user_id))?;
        Ok(self.store.leave_requests.find(|r| r.user_id == user_id).await)
    }

    /// Returns all pending applications. HR/admin review projection.
    pub async fn list_pending(&self, actor: &Actor) -> EngineResult<Vec<LeaveRequest>> {
        authorize(actor, Operation::DecideLeave, None)?;
        Ok(self
            .store
            .leave_requests
            .find(|r| r.status == RequestStatus::Pending)
            .await)
    }
}
