//! Benefit proposal projection.
//!
//! Combines the tier benefit table, fee model, safety cap and state tax table
//! with fixed FICA and federal withholding estimates to project what an
//! employee and their employer gain from the pre-tax benefit.
//!
//! The projector never fails. Out-of-range inputs degrade to zero or neutral
//! figures, and every fallback taken is reported in the projection's warnings.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::StateTaxTable;
use crate::models::{
    AmountBasis, BenefitProjection, FeeRates, PaycheckBreakdown, PeriodAmounts,
    ProjectionWarning, ProposalInput, WarningCode,
};

use super::fee_model::{fee_amount, is_fee_fallback, resolve_fee_rates};
use super::limits::{clamp_fee_pct, clamp_tax_rate, max_amount};
use super::pay_frequency::{scale_per_pay, to_per_pay};
use super::rounding::round_money;
use super::safety_cap::affordability;
use super::state_tax::{StateTaxSource, resolve_state_tax};
use super::tier_benefit::target_monthly_benefit;

/// Social Security tax rate (6.2%).
pub fn social_security_rate() -> Decimal {
    Decimal::new(62, 3)
}

/// Medicare tax rate (1.45%).
pub fn medicare_rate() -> Decimal {
    Decimal::new(145, 4)
}

/// Combined FICA rate (7.65%).
pub fn fica_rate() -> Decimal {
    social_security_rate() + medicare_rate()
}

/// Flat federal income tax withholding estimate (12%).
pub fn federal_withholding_rate() -> Decimal {
    Decimal::new(12, 2)
}

/// Taxes withheld from one paycheck, unrounded.
#[derive(Debug, Clone, Copy)]
struct Withholding {
    federal: Decimal,
    state: Decimal,
    fica: Decimal,
}

impl Withholding {
    fn total(&self) -> Decimal {
        self.federal + self.state + self.fica
    }
}

/// Projects the effect of the pre-tax benefit for one employee.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::project;
/// use benefit_engine::config::ConfigLoader;
/// use benefit_engine::models::{FeeModel, FilingStatus, PayPeriod, PricingTier, ProposalInput};
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::embedded().unwrap();
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
///
/// let projection = project(&input, config.state_taxes());
/// assert!(!projection.is_capped);
/// assert_eq!(projection.benefit.per_pay, Decimal::from(600));
/// assert_eq!(projection.employee_fee.per_pay, Decimal::from(30));
/// assert_eq!(projection.employer_fee.per_pay, Decimal::from(18));
/// ```
pub fn project(input: &ProposalInput, tax_table: &StateTaxTable) -> BenefitProjection {
    let mut warnings = Vec::new();
    let pay_period = input.pay_period;
    let periods = pay_period.periods_per_year();

    if input.dependents < 0 {
        warnings.push(ProjectionWarning::new(
            WarningCode::NegativeDependents,
            format!("{} dependents treated as 0", input.dependents),
        ));
    }

    let gross = if input.paycheck_gross > max_amount() {
        warnings.push(ProjectionWarning::new(
            WarningCode::AmountOutOfRange,
            format!("Gross pay {} exceeds {}; clamped", input.paycheck_gross, max_amount()),
        ));
        max_amount()
    } else if input.paycheck_gross > Decimal::ZERO {
        input.paycheck_gross
    } else {
        warnings.push(ProjectionWarning::new(
            WarningCode::NonPositiveGross,
            format!(
                "Gross pay {} is not positive; no benefit can be deducted",
                input.paycheck_gross
            ),
        ));
        Decimal::ZERO
    };

    // Step 1: fee rates and target benefit
    let resolved_rates = resolve_fee_rates(input.tier, &input.fee_model);
    let fee_rates = FeeRates {
        employee_pct: clamp_fee_pct(resolved_rates.employee_pct),
        employer_pct: clamp_fee_pct(resolved_rates.employer_pct),
    };
    if fee_rates != resolved_rates {
        warnings.push(ProjectionWarning::new(
            WarningCode::AmountOutOfRange,
            format!(
                "Fee model '{}' has a rate outside 0 to 100 percent; clamped to {}/{}",
                input.fee_model,
                fee_rates.employee_pct.normalize(),
                fee_rates.employer_pct.normalize()
            ),
        ));
    }
    if is_fee_fallback(input.tier, &input.fee_model) {
        warnings.push(ProjectionWarning::new(
            WarningCode::UnrecognizedFeeModel,
            format!(
                "Fee model '{}' could not be resolved; no fees applied",
                input.fee_model
            ),
        ));
    }
    let target_monthly = target_monthly_benefit(input.tier, input.filing_status, input.dependents);

    // Step 2: capped benefit
    let affordability = affordability(target_monthly, gross, pay_period, input.safety_cap_pct);
    let benefit = affordability.safe_per_pay;
    let is_capped = benefit < affordability.target_per_pay;
    if is_capped && gross > Decimal::ZERO {
        warnings.push(ProjectionWarning::new(
            WarningCode::DeductionCapped,
            format!(
                "Target benefit of {} per pay exceeds {}% of gross; reduced to {}",
                affordability.target_per_pay.round_dp(2),
                input.safety_cap_pct.normalize(),
                benefit.round_dp(2)
            ),
        ));
    }

    // Step 3: state tax before and after the benefit
    let annual_gross = gross * periods;
    let annual_after_benefit = (gross - benefit) * periods;
    let override_rate = input.state_tax_rate_override.map(|rate| {
        let clamped = clamp_tax_rate(rate);
        if clamped != rate {
            warnings.push(ProjectionWarning::new(
                WarningCode::AmountOutOfRange,
                format!("State tax rate override {} is outside 0 to 1; clamped to {}", rate, clamped),
            ));
        }
        clamped
    });
    let state_before = resolve_state_tax(annual_gross, &input.state, tax_table, override_rate);
    let state_after =
        resolve_state_tax(annual_after_benefit, &input.state, tax_table, override_rate);
    if state_before.source == StateTaxSource::UnknownState {
        warnings.push(ProjectionWarning::new(
            WarningCode::UnknownState,
            format!(
                "State '{}' is not in the tax table; no state tax applied",
                input.state
            ),
        ));
    }

    // Step 4: withholding on gross, and on gross less the benefit
    let before = Withholding {
        federal: gross * federal_withholding_rate(),
        state: to_per_pay(state_before.annual_tax, AmountBasis::Annual, pay_period),
        fica: gross * fica_rate(),
    };
    let taxable_after = gross - benefit;
    let after = Withholding {
        federal: taxable_after * federal_withholding_rate(),
        state: to_per_pay(state_after.annual_tax, AmountBasis::Annual, pay_period),
        fica: taxable_after * fica_rate(),
    };

    // Step 5: fees on the benefit
    let employee_fee = fee_amount(benefit, fee_rates.employee_pct);
    let employer_fee = fee_amount(benefit, fee_rates.employer_pct);

    // Step 6: net pay
    let net_before = gross - before.total();
    let net_after = gross - after.total() - employee_fee;

    // Step 7: deltas
    let net_pay_change = net_after - net_before;
    let fica_savings = before.fica - after.fica;
    let employer_net_savings = fica_savings - employer_fee;
    let state_tax_savings = before.state - after.state;

    debug!(
        tier = %input.tier,
        pay_period = %pay_period,
        benefit_per_pay = %benefit,
        is_capped,
        net_pay_change = %net_pay_change,
        employer_net_savings = %employer_net_savings,
        "Projected benefit"
    );

    // Step 8: round at the boundary
    let scaled = |per_pay: Decimal| -> PeriodAmounts {
        scale_per_pay(per_pay, pay_period).rounded()
    };

    BenefitProjection {
        pay_period,
        target_monthly: round_money(target_monthly),
        is_capped,
        fee_rates,
        benefit: scaled(benefit),
        employee_fee: scaled(employee_fee),
        employer_fee: scaled(employer_fee),
        employee_net_pay_change: scaled(net_pay_change),
        employer_fica_savings: scaled(fica_savings),
        employer_net_savings: scaled(employer_net_savings),
        state_tax_savings: scaled(state_tax_savings),
        before: PaycheckBreakdown {
            gross,
            benefit: Decimal::ZERO,
            federal_tax: before.federal,
            state_tax: before.state,
            fica: before.fica,
            employee_fee: Decimal::ZERO,
            net_pay: net_before,
        }
        .rounded(),
        after: PaycheckBreakdown {
            gross,
            benefit,
            federal_tax: after.federal,
            state_tax: after.state,
            fica: after.fica,
            employee_fee,
            net_pay: net_after,
        }
        .rounded(),
        affordability: affordability.rounded(),
        warnings,
    }
}
