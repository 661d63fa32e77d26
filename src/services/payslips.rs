//! The payslip lifecycle manager.
//!
//! Creates immutable payslip records from calculator output and manages
//! the one-way Unpaid → Paid transition. The calculator runs exactly once,
//! at generation time, and its itemized output is copied by value into the
//! record; later deduction-catalog changes never alter a generated
//! payslip's numbers.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{authorize, Actor, Operation};
use crate::calculation::calculate_payroll;
use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, PaymentStatus, Payslip};
use crate::store::Store;

/// Manages payslip generation and the payment lifecycle.
#[derive(Clone)]
pub struct PayslipService {
    store: Arc<Store>,
}

impl PayslipService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Generates a payslip for an employee and period. HR/admin only.
    ///
    /// Snapshots the current deduction catalog, runs the calculator, and
    /// persists the result in `Unpaid` state. At most one payslip may
    /// exist per (employee, period); a duplicate fails with a conflict.
    pub async fn generate(
        &self,
        employee_id: Uuid,
        period: PayPeriod,
        actor: &Actor,
    ) -> EngineResult<Payslip> {
        authorize(actor, Operation::GeneratePayslip, None)?;

        let employee = self
            .store
            .employees
            .get(employee_id)
            .await
            .ok_or_else(|| EngineError::NotFound {
                entity: "employee".to_string(),
                id: employee_id.to_string(),
            })?;

        let rules = self.store.deductions.list().await;
        let breakdown = calculate_payroll(employee.base_salary, &rules);

        if breakdown.is_net_negative() {
            warn!(
                employee_id = %employee_id,
                net_salary = %breakdown.net_salary,
                "Deductions exceed gross salary"
            );
        }

        let payslip = Payslip {
            id: Uuid::new_v4(),
            employee_id,
            period,
            gross_salary: breakdown.gross_salary,
            total_deductions: breakdown.total_deductions,
            net_salary: breakdown.net_salary,
            deduction_details: breakdown.deduction_lines,
            payment_status: PaymentStatus::Unpaid,
            generated_by: actor.id,
            generated_at: Utc::now(),
            paid_by: None,
            paid_at: None,
        };

        let payslip = self
            .store
            .payslips
            .insert_unique(
                payslip,
                |p| p.employee_id == employee_id && p.period == period,
                &format!("payslip already generated for {period}"),
            )
            .await?;

        info!(
            payslip_id = %payslip.id,
            employee_id = %employee_id,
            period = %payslip.period,
            gross_salary = %payslip.gross_salary,
            net_salary = %payslip.net_salary,
            actor_id = %actor.id,
            "Payslip generated"
        );
        Ok(payslip)
    }

    /// Marks a payslip paid. HR/admin only.
    ///
    /// The status check and the write happen under one guard, so a second
    /// concurrent call against an already-paid record fails rather than
    /// silently succeeding: payment confirmation is at-most-once.
    pub async fn mark_paid(&self, payslip_id: Uuid, actor: &Actor) -> EngineResult<Payslip> {
        authorize(actor, Operation::MarkPayslipPaid, None)?;

        let actor_id = actor.id;
        let payslip = self
            .store
            .payslips
            .update(payslip_id, |payslip| {
                if payslip.payment_status != PaymentStatus::Unpaid {
                    return Err(EngineError::InvalidTransition {
                        entity: "payslip".to_string(),
                        id: payslip_id.to_string(),
                        message: "already Paid".to_string(),
                    });
                }
                payslip.payment_status = PaymentStatus::Paid;
                payslip.paid_by = Some(actor_id);
                payslip.paid_at = Some(Utc::now());
                Ok(())
            })
            .await?;

        info!(payslip_id = %payslip.id, actor_id = %actor.id, "Payslip marked paid");
        Ok(payslip)
    }

    /// Returns one stored payslip, exactly as generated.
    ///
    /// Employees may view their own payslips only. The deduction details
    /// are the stored snapshots; nothing is recomputed.
    pub async fn view(&self, payslip_id: Uuid, actor: &Actor) -> EngineResult<Payslip> {
        let payslip = self
            .store
            .payslips
            .get(payslip_id)
            .await
            .ok_or_else(|| EngineError::NotFound {
                entity: "payslip".to_string(),
                id: payslip_id.to_string(),
            })?;

        authorize(actor, Operation::ViewPayslip, Some(payslip.employee_id))?;
        Ok(payslip)
    }

    /// Returns all payslips for one employee, oldest first.
    pub async fn list_for_employee(
        &self,
        employee_id: Uuid,
        actor: &Actor,
    ) -> EngineResult<Vec<Payslip>> {
        authorize(actor, Operation::ViewPayslip, Some(employee_id))?;
        Ok(self
            .store
            .payslips
            .find(|p| p.employee_id == employee_id)
            .await)
    }

    /// Returns the full payslip registry. HR/admin only.
    pub async fn list_all(&self, actor: &Actor) -> EngineResult<Vec<Payslip>> {
        authorize(actor, Operation::ViewPayslip, None)?;
        Ok(self.store.payslips.list().await)
    }
}
