//! Deduction rule model.
//!
//! A deduction rule is a reusable template, not a ledger entry: it carries
//! no link to any employee or payslip. Payslips copy rule values at
//! generation time, so deleting a rule never changes history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a deduction rule's amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeductionKind {
    /// A flat currency amount per pay period.
    Fixed,
    /// A percentage of the employee's gross salary (0–100).
    Percentage,
}

/// A deduction rule in the catalog.
///
/// Rules are retired and recreated, never edited in place, so historical
/// payslip semantics can never drift under an updated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRule {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name, e.g. "Health Insurance".
    pub name: String,
    /// How the amount is interpreted.
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    /// The currency amount (Fixed) or percentage in 0–100 (Percentage).
    pub amount: Decimal,
}
