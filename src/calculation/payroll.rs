//! The payroll calculator.
//!
//! A pure function from an employee's base salary and a deduction catalog
//! snapshot to gross pay, itemized deductions, and net pay. The calculator
//! must be invoked at payslip-generation time only, and its output
//! persisted by value: later catalog changes must never alter a generated
//! payslip's numbers.

use rust_decimal::Decimal;

use crate::models::{DeductionKind, DeductionLine, DeductionRule};

/// The full output of a payroll calculation.
///
/// Carries the itemized deduction lines so the caller can snapshot them
/// into a payslip record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollBreakdown {
    /// Base compensation before deductions.
    pub gross_salary: Decimal,
    /// Itemized deductions, in catalog iteration order.
    pub deduction_lines: Vec<DeductionLine>,
    /// Sum of all deduction line amounts.
    pub total_deductions: Decimal,
    /// `gross_salary - total_deductions`. May be negative.
    pub net_salary: Decimal,
}

impl PayrollBreakdown {
    /// Returns true if the deductions exceed the gross salary.
    ///
    /// Negative net pay is surfaced, never clamped; callers decide how to
    /// present it.
    pub fn is_net_negative(&self) -> bool {
        self.net_salary < Decimal::ZERO
    }
}

/// Calculates pay for one period from a base salary and a catalog snapshot.
///
/// Each Fixed rule contributes its amount unchanged; each Percentage rule
/// contributes `base_salary * amount / 100`. Deductions are summed in the
/// order the rules appear in the slice, which is the catalog's insertion
/// order.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_payroll;
/// use payroll_engine::models::{DeductionKind, DeductionRule};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use uuid::Uuid;
///
/// let rules = vec![DeductionRule {
///     id: Uuid::new_v4(),
///     name: "Tax".to_string(),
///     kind: DeductionKind::Percentage,
///     amount: Decimal::from_str("10").unwrap(),
/// }];
///
/// let breakdown = calculate_payroll(Decimal::from_str("5000").unwrap(), &rules);
/// assert_eq!(breakdown.net_salary, Decimal::from_str("4500").unwrap());
/// ```
pub fn calculate_payroll(base_salary: Decimal, rules: &[DeductionRule]) -> PayrollBreakdown {
    let hundred = Decimal::from(100);

    let deduction_lines: Vec<DeductionLine> = rules
        .iter()
        .map(|rule| {
            let amount = match rule.kind {
                DeductionKind::Fixed => rule.amount,
                DeductionKind::Percentage => base_salary * rule.amount / hundred,
            };
            DeductionLine {
                name: rule.name.clone(),
                amount,
            }
        })
        .collect();

    let total_deductions: Decimal = deduction_lines.iter().map(|line| line.amount).sum();

    PayrollBreakdown {
        gross_salary: base_salary,
        net_salary: base_salary - total_deductions,
        deduction_lines,
        total_deductions,
    }
}
