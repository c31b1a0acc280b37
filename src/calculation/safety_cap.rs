//! Safety cap on the pre-tax deduction.
//!
//! The target benefit is capped at a percentage of the employee's per-paycheck
//! gross pay so that the deduction never eats more of the paycheck than the
//! company allows. The cap percentage is always supplied by the caller.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{Affordability, AmountBasis, PayPeriod};

use super::limits::clamp_amount;
use super::pay_frequency::{from_per_pay, to_per_pay};

/// Returns the per-paycheck deduction that fits under the safety cap.
///
/// Computes `max(0, min(target_per_pay, gross_per_pay x max_pct_of_gross / 100))`.
/// Zero or negative gross pay yields zero. Amounts are clamped to
/// [`max_amount`](super::max_amount), and a cap so large that the share of gross
/// overflows leaves the target uncapped.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::safe_deduction;
/// use benefit_engine::models::PayPeriod;
/// use rust_decimal::Decimal;
///
/// // $1,300/month biweekly is $600 per paycheck; 50% of $800 is $400.
/// let safe = safe_deduction(
///     Decimal::from(1300),
///     Decimal::from(800),
///     PayPeriod::Biweekly,
///     Decimal::from(50),
/// );
/// assert_eq!(safe, Decimal::from(400));
/// ```
pub fn safe_deduction(
    target_monthly: Decimal,
    gross_per_pay: Decimal,
    pay_period: PayPeriod,
    max_pct_of_gross: Decimal,
) -> Decimal {
    if gross_per_pay <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let target_monthly = clamp_amount(target_monthly);
    let target_per_pay = to_per_pay(target_monthly, AmountBasis::Monthly, pay_period);
    let max_allowed = clamp_amount(gross_per_pay)
        .checked_mul(max_pct_of_gross.max(Decimal::ZERO))
        .map_or(target_per_pay, |share| share / Decimal::ONE_HUNDRED);
    let safe = target_per_pay.min(max_allowed).max(Decimal::ZERO);

    if safe < target_per_pay {
        debug!(
            target_per_pay = %target_per_pay,
            max_allowed = %max_allowed,
            "Deduction capped to share of gross pay"
        );
    }

    safe
}

/// Compares the target deduction with what fits under the safety cap.
///
/// Figures are unrounded. `percent_of_gross` is `None` when gross pay is zero
/// or negative, or when the ratio is too large to represent; callers must guard
/// that case themselves.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::affordability;
/// use benefit_engine::models::PayPeriod;
/// use rust_decimal::Decimal;
///
/// let result = affordability(
///     Decimal::from(1300),
///     Decimal::from(800),
///     PayPeriod::Biweekly,
///     Decimal::from(50),
/// );
/// assert!(!result.is_sufficient);
/// assert_eq!(result.shortfall_per_pay, Decimal::from(200));
/// assert_eq!(result.percent_of_gross, Some(Decimal::from(50)));
/// ```
pub fn affordability(
    target_monthly: Decimal,
    gross_per_pay: Decimal,
    pay_period: PayPeriod,
    max_pct_of_gross: Decimal,
) -> Affordability {
    let target_monthly = clamp_amount(target_monthly);
    let gross_per_pay = clamp_amount(gross_per_pay);
    let target_per_pay = to_per_pay(target_monthly, AmountBasis::Monthly, pay_period);
    let safe_per_pay = safe_deduction(target_monthly, gross_per_pay, pay_period, max_pct_of_gross);
    let shortfall_per_pay = (target_per_pay - safe_per_pay).max(Decimal::ZERO);

    let percent_of_gross = if gross_per_pay > Decimal::ZERO {
        safe_per_pay
            .checked_div(gross_per_pay)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    } else {
        None
    };

    Affordability {
        is_sufficient: safe_per_pay >= target_per_pay,
        target_per_pay,
        safe_per_pay,
        shortfall_per_pay,
        target_monthly,
        safe_monthly: from_per_pay(safe_per_pay, AmountBasis::Monthly, pay_period),
        shortfall_monthly: from_per_pay(shortfall_per_pay, AmountBasis::Monthly, pay_period),
        percent_of_gross,
    }
}
