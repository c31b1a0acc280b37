//! Recurring billing runs.
//!
//! Each billing period the capped deduction is re-computed for every enrolled
//! employee of a company. The resulting invoice lines, and their roll-up, are
//! what the invoicing and analytics collaborators consume.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::StateTaxTable;
use crate::models::{CompanyProfile, EnrolledEmployee, ProjectionWarning, ProposalInput};

use super::proposal::project;

/// One employee's line on a monthly invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingLine {
    /// The employee's identifier.
    pub employee_id: String,
    /// Pre-tax benefit allotment per month.
    pub benefit_monthly: Decimal,
    /// Service fee charged to the employee per month.
    pub employee_fee_monthly: Decimal,
    /// Service fee charged to the employer per month.
    pub employer_fee_monthly: Decimal,
    /// Employer FICA savings less the employer fee, per month.
    pub employer_net_savings_monthly: Decimal,
    /// True when the safety cap reduced this employee's benefit.
    pub is_capped: bool,
    /// Fallbacks taken while computing this line.
    pub warnings: Vec<ProjectionWarning>,
}

/// Company totals for one billing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSummary {
    /// Number of employees billed.
    pub employee_count: usize,
    /// Number of employees whose benefit was capped.
    pub capped_count: usize,
    /// Sum of monthly benefit allotments.
    pub total_benefit_monthly: Decimal,
    /// Sum of monthly employee fees.
    pub total_employee_fees_monthly: Decimal,
    /// Sum of monthly employer fees.
    pub total_employer_fees_monthly: Decimal,
    /// Employee plus employer fees: the monthly invoice amount.
    pub total_invoice_monthly: Decimal,
    /// Sum of monthly employer net savings.
    pub total_employer_net_savings_monthly: Decimal,
}

/// The invoice lines and totals of one billing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingRun {
    /// One line per enrolled employee, in roster order.
    pub lines: Vec<BillingLine>,
    /// Company totals over the lines.
    pub summary: BillingSummary,
}

fn proposal_input(company: &CompanyProfile, employee: &EnrolledEmployee) -> ProposalInput {
    ProposalInput {
        paycheck_gross: employee.gross_per_pay,
        pay_period: employee.pay_period,
        filing_status: employee.filing_status,
        dependents: employee.dependents,
        state: employee.state.clone(),
        fee_model: company.fee_model.clone(),
        tier: company.tier,
        safety_cap_pct: company.safety_cap_pct,
        state_tax_rate_override: company.state_tax_rate_override,
    }
}

/// Computes one employee's invoice line.
pub fn billing_line(
    company: &CompanyProfile,
    employee: &EnrolledEmployee,
    tax_table: &StateTaxTable,
) -> BillingLine {
    let projection = project(&proposal_input(company, employee), tax_table);

    BillingLine {
        employee_id: employee.id.clone(),
        benefit_monthly: projection.benefit.monthly,
        employee_fee_monthly: projection.employee_fee.monthly,
        employer_fee_monthly: projection.employer_fee.monthly,
        employer_net_savings_monthly: projection.employer_net_savings.monthly,
        is_capped: projection.is_capped,
        warnings: projection.warnings,
    }
}

/// Totals invoice lines.
///
/// Sums are taken over the already rounded line amounts so the invoice total
/// always equals the sum of its lines.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::summarize_billing;
/// use rust_decimal::Decimal;
///
/// let summary = summarize_billing(&[]);
/// assert_eq!(summary.employee_count, 0);
/// assert_eq!(summary.total_invoice_monthly, Decimal::ZERO);
/// ```
pub fn summarize_billing(lines: &[BillingLine]) -> BillingSummary {
    let sum = |field: fn(&BillingLine) -> Decimal| -> Decimal { lines.iter().map(field).sum() };

    let total_employee_fees_monthly = sum(|line| line.employee_fee_monthly);
    let total_employer_fees_monthly = sum(|line| line.employer_fee_monthly);

    BillingSummary {
        employee_count: lines.len(),
        capped_count: lines.iter().filter(|line| line.is_capped).count(),
        total_benefit_monthly: sum(|line| line.benefit_monthly),
        total_employee_fees_monthly,
        total_employer_fees_monthly,
        total_invoice_monthly: total_employee_fees_monthly + total_employer_fees_monthly,
        total_employer_net_savings_monthly: sum(|line| line.employer_net_savings_monthly),
    }
}

/// Runs billing for a company's roster.
pub fn run_billing(
    company: &CompanyProfile,
    employees: &[EnrolledEmployee],
    tax_table: &StateTaxTable,
) -> BillingRun {
    let lines: Vec<BillingLine> = employees
        .iter()
        .map(|employee| billing_line(company, employee, tax_table))
        .collect();
    let summary = summarize_billing(&lines);

    debug!(
        tier = %company.tier,
        employees = summary.employee_count,
        capped = summary.capped_count,
        invoice_monthly = %summary.total_invoice_monthly,
        "Completed billing run"
    );

    BillingRun { lines, summary }
}
