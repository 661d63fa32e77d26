//! The deduction catalog.
//!
//! A mutable registry of deduction rule templates, independent of any
//! employee. There is deliberately no update-in-place operation: rules are
//! retired and recreated, so an edit can never silently alter what an
//! existing rule meant when historical payslips were generated.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::auth::{authorize, Actor, Operation};
use crate::error::{EngineError, EngineResult};
use crate::models::{DeductionKind, DeductionRule};
use crate::store::Store;

/// Manages the registry of deduction rules.
#[derive(Clone)]
pub struct DeductionCatalog {
    store: Arc<Store>,
}

impl DeductionCatalog {
    /// Creates a catalog over the given store.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Adds a rule to the catalog. HR/admin only.
    ///
    /// Fails with a validation error if the name is empty, the amount is
    /// negative, or a percentage amount is above 100.
    pub async fn add_rule(
        &self,
        name: &str,
        kind: DeductionKind,
        amount: Decimal,
        actor: &Actor,
    ) -> EngineResult<DeductionRule> {
        authorize(actor, Operation::ManageDeductions, None)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::validation("name", "must not be empty"));
        }
        if amount < Decimal::ZERO {
            return Err(EngineError::validation("amount", "must not be negative"));
        }
        if kind == DeductionKind::Percentage && amount > Decimal::from(100) {
            return Err(EngineError::validation(
                "amount",
                "percentage must be between 0 and 100",
            ));
        }

        let rule = DeductionRule {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            amount,
        };
        let rule = self.store.deductions.insert(rule).await;

        info!(
            rule_id = %rule.id,
            name = %rule.name,
            kind = ?rule.kind,
            amount = %rule.amount,
            actor_id = %actor.id,
            "Deduction rule added"
        );
        Ok(rule)
    }

    /// Returns the current rules in catalog order.
    pub async fn list_rules(&self) -> Vec<DeductionRule> {
        self.store.deductions.list().await
    }

    /// Deletes a rule. HR/admin only.
    ///
    /// Previously generated payslips keep their copied deduction lines and
    /// are unaffected.
    pub async fn delete_rule(&self, id: Uuid, actor: &Actor) -> EngineResult<DeductionRule> {
        authorize(actor, Operation::ManageDeductions, None)?;

        let rule = self.store.deductions.remove(id).await?;
        info!(rule_id = %rule.id, name = %rule.name, actor_id = %actor.id, "Deduction rule deleted");
        Ok(rule)
    }
}
