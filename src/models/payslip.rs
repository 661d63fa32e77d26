//! Payslip model and pay period types.
//!
//! A payslip is an immutable record of one employee's computed pay for one
//! period. Its deduction lines are copied by value from the catalog at
//! generation time; the only mutable part is the one-way Unpaid → Paid
//! payment transition with its audit fields.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A calendar month. Serialized with its full English name, matching the
/// stored record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// The pay period a payslip covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The month of the period.
    pub month: Month,
    /// The calendar year of the period.
    pub year: i32,
}

impl std::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {}", self.month, self.year)
    }
}

/// One itemized deduction on a payslip.
///
/// A value snapshot, never a reference: the line keeps the rule's name and
/// the computed amount as they were at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// The name of the deduction rule at generation time.
    pub name: String,
    /// The computed amount deducted.
    pub amount: Decimal,
}

/// The payment lifecycle state of a payslip.
///
/// The only legal transition is Unpaid → Paid, exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Generated but not yet paid out.
    Unpaid,
    /// Paid out. Terminal.
    Paid,
}

/// An immutable payslip record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier.
    pub id: Uuid,
    /// The employee this payslip belongs to.
    pub employee_id: Uuid,
    /// The pay period covered.
    pub period: PayPeriod,
    /// Base compensation before deductions.
    pub gross_salary: Decimal,
    /// Sum of all deduction lines.
    pub total_deductions: Decimal,
    /// `gross_salary - total_deductions`, computed once at generation.
    pub net_salary: Decimal,
    /// Itemized deduction snapshots, in catalog order at generation time.
    pub deduction_details: Vec<DeductionLine>,
    /// The payment lifecycle state.
    pub payment_status: PaymentStatus,
    /// The actor who generated the payslip.
    pub generated_by: Uuid,
    /// When the payslip was generated.
    pub generated_at: DateTime<Utc>,
    /// The actor who marked the payslip paid, once paid.
    #[serde(default)]
    pub paid_by: Option<Uuid>,
    /// When the payslip was marked paid, once paid.
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}
