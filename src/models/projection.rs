//! Projection input and result models.
//!
//! This module contains the [`ProposalInput`] consumed by the projector and the
//! [`BenefitProjection`] it produces, along with the structures that make up a
//! projection: amounts on three time scales, before/after paycheck breakdowns,
//! the affordability summary and the warnings raised by fallback rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FeeModel, FeeRates, FilingStatus, PayPeriod, PricingTier};

/// Everything the projector needs to know about one employee and their company.
///
/// # Example
///
/// ```
/// use benefit_engine::models::{FeeModel, FilingStatus, PayPeriod, PricingTier, ProposalInput};
/// use rust_decimal::Decimal;
///
/// let input = ProposalInput {
///     paycheck_gross: Decimal::from(2000),
///     pay_period: PayPeriod::Biweekly,
///     filing_status: FilingStatus::Single,
///     dependents: 0,
///     state: "TX".to_string(),
///     fee_model: FeeModel::parse("5/3"),
///     tier: PricingTier::Year2025,
///     safety_cap_pct: Decimal::from(50),
///     state_tax_rate_override: None,
/// };
/// assert_eq!(input.state, "TX");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalInput {
    /// Gross pay per paycheck.
    pub paycheck_gross: Decimal,
    /// How often the employee is paid.
    pub pay_period: PayPeriod,
    /// The employee's filing status.
    pub filing_status: FilingStatus,
    /// Number of dependents claimed. Negative counts are treated as zero.
    pub dependents: i32,
    /// Two-letter code of the state the employee is taxed in.
    pub state: String,
    /// The company's fee model.
    pub fee_model: FeeModel,
    /// The company's pricing tier.
    pub tier: PricingTier,
    /// Maximum share of gross pay, in percent, that may go to the benefit.
    pub safety_cap_pct: Decimal,
    /// Flat state tax rate as a fraction (0.05 = 5%) used instead of the state table.
    #[serde(default)]
    pub state_tax_rate_override: Option<Decimal>,
}

/// One amount expressed per paycheck, per month and per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAmounts {
    /// Amount per paycheck.
    pub per_pay: Decimal,
    /// Amount per month.
    pub monthly: Decimal,
    /// Amount per year.
    pub annual: Decimal,
}

impl PeriodAmounts {
    /// All-zero amounts.
    pub const ZERO: PeriodAmounts = PeriodAmounts {
        per_pay: Decimal::ZERO,
        monthly: Decimal::ZERO,
        annual: Decimal::ZERO,
    };
}

/// Per-paycheck withholding and net pay in one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaycheckBreakdown {
    /// Gross pay per paycheck.
    pub gross: Decimal,
    /// Pre-tax benefit deducted before taxes.
    pub benefit: Decimal,
    /// Estimated federal income tax withholding.
    pub federal_tax: Decimal,
    /// State income tax.
    pub state_tax: Decimal,
    /// Employee share of FICA.
    pub fica: Decimal,
    /// Service fee charged to the employee.
    pub employee_fee: Decimal,
    /// Take-home pay.
    pub net_pay: Decimal,
}

/// Whether the target benefit fits under the safety cap.
///
/// `percent_of_gross` is `None` when gross pay is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affordability {
    /// True when the full target fits under the cap.
    pub is_sufficient: bool,
    /// Target benefit per paycheck.
    pub target_per_pay: Decimal,
    /// Capped benefit per paycheck.
    pub safe_per_pay: Decimal,
    /// Portion of the target that did not fit, per paycheck.
    pub shortfall_per_pay: Decimal,
    /// Target benefit per month.
    pub target_monthly: Decimal,
    /// Capped benefit per month.
    pub safe_monthly: Decimal,
    /// Portion of the target that did not fit, per month.
    pub shortfall_monthly: Decimal,
    /// Capped benefit as a percentage of gross pay.
    pub percent_of_gross: Option<Decimal>,
}

/// Identifies the fallback rule or degraded condition a warning reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// Pay period code was not recognized; biweekly was used.
    UnknownPayPeriod,
    /// Filing status code was not recognized; single was used.
    UnknownFilingStatus,
    /// Pricing tier code was not recognized; the 2025 tier was used.
    UnknownPricingTier,
    /// Fee model could not be resolved; zero fees were used.
    UnrecognizedFeeModel,
    /// State code is not in the tax table; no state tax was applied.
    UnknownState,
    /// Gross pay was zero or negative; no benefit could be deducted.
    NonPositiveGross,
    /// Dependents were negative and were treated as zero.
    NegativeDependents,
    /// The target benefit was reduced to fit the safety cap.
    DeductionCapped,
    /// An amount or rate lay outside the supported range and was clamped to it.
    AmountOutOfRange,
}

/// A warning raised while resolving inputs or computing a projection.
///
/// Warnings never change the numbers; they tell callers which fallback
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionWarning {
    /// The kind of warning.
    pub code: WarningCode,
    /// A human-readable description of the warning.
    pub message: String,
}

impl ProjectionWarning {
    /// Creates a new warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// The complete projection for one employee.
///
/// Every monetary field is rounded to cents. Computing the same input twice
/// yields an identical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitProjection {
    /// The pay period the per-pay figures refer to.
    pub pay_period: PayPeriod,
    /// The uncapped target benefit per month from the tier table.
    pub target_monthly: Decimal,
    /// True when the safety cap reduced the benefit below the target.
    pub is_capped: bool,
    /// Resolved service fee percentages.
    pub fee_rates: FeeRates,
    /// Pre-tax benefit allotment.
    pub benefit: PeriodAmounts,
    /// Service fee charged to the employee.
    pub employee_fee: PeriodAmounts,
    /// Service fee charged to the employer.
    pub employer_fee: PeriodAmounts,
    /// Change in employee take-home pay (after minus before).
    pub employee_net_pay_change: PeriodAmounts,
    /// Employer FICA saved on the diverted pay.
    pub employer_fica_savings: PeriodAmounts,
    /// Employer FICA savings minus the employer fee.
    pub employer_net_savings: PeriodAmounts,
    /// State income tax saved by the employee.
    pub state_tax_savings: PeriodAmounts,
    /// Paycheck without the benefit.
    pub before: PaycheckBreakdown,
    /// Paycheck with the benefit.
    pub after: PaycheckBreakdown,
    /// Target versus capped benefit.
    pub affordability: Affordability,
    /// Fallbacks taken while computing the projection.
    pub warnings: Vec<ProjectionWarning>,
}
