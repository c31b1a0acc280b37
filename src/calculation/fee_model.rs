//! Service fee rate resolution.
//!
//! Maps a company's pricing tier and fee model to the employee and employer
//! percentages charged against the per-pay benefit amount. Fees are never
//! charged against gross pay.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{FeeModel, FeeRates, PricingTier};

use super::limits::{clamp_amount, clamp_fee_pct};

/// Historical fixed splits for single-number fee models, as
/// `(aggregate, employee%, employer%)`.
const AGGREGATE_SPLITS: [(u32, u32, u32); 3] = [(8, 5, 3), (7, 3, 4), (6, 1, 5)];

/// Looks up the fixed split for an aggregate fee percentage.
///
/// Returns `None` for aggregates outside the table.
pub fn aggregate_split(aggregate: Decimal) -> Option<FeeRates> {
    AGGREGATE_SPLITS
        .iter()
        .find(|(total, _, _)| Decimal::from(*total) == aggregate)
        .map(|&(_, employee, employer)| FeeRates::from_whole(employee, employer))
}

/// Resolves the fee percentages for a company.
///
/// The state school and original 6% tiers carry fixed rates regardless of the
/// fee model. For other tiers a split model is used as written, an aggregate is
/// looked up in the fixed split table, and anything else resolves to zero fees.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::resolve_fee_rates;
/// use benefit_engine::models::{FeeModel, FeeRates, PricingTier};
///
/// let rates = resolve_fee_rates(PricingTier::Year2025, &FeeModel::parse("8"));
/// assert_eq!(rates, FeeRates::from_whole(5, 3));
///
/// let rates = resolve_fee_rates(PricingTier::StateSchool, &FeeModel::parse("5/3"));
/// assert_eq!(rates, FeeRates::from_whole(6, 0));
/// ```
pub fn resolve_fee_rates(tier: PricingTier, model: &FeeModel) -> FeeRates {
    let rates = match (tier, model) {
        (PricingTier::StateSchool, _) => FeeRates::from_whole(6, 0),
        (PricingTier::Original6Pct, _) => FeeRates::from_whole(1, 5),
        (
            _,
            FeeModel::Split {
                employee_pct,
                employer_pct,
            },
        ) => FeeRates {
            employee_pct: *employee_pct,
            employer_pct: *employer_pct,
        },
        (_, FeeModel::Aggregate(aggregate)) => {
            aggregate_split(*aggregate).unwrap_or(FeeRates::ZERO)
        }
        (_, FeeModel::Unrecognized(_)) => FeeRates::ZERO,
    };

    debug!(
        tier = %tier,
        model = %model,
        employee_pct = %rates.employee_pct,
        employer_pct = %rates.employer_pct,
        "Resolved fee rates"
    );

    rates
}

/// Returns true when the fee model resolves to zero fees because it could not be
/// interpreted, rather than because it was written that way.
///
/// Tiers with fixed rates never fall back.
pub fn is_fee_fallback(tier: PricingTier, model: &FeeModel) -> bool {
    match (tier, model) {
        (PricingTier::StateSchool | PricingTier::Original6Pct, _) => false,
        (_, FeeModel::Split { .. }) => false,
        (_, FeeModel::Aggregate(aggregate)) => aggregate_split(*aggregate).is_none(),
        (_, FeeModel::Unrecognized(_)) => true,
    }
}

/// Computes a fee as `rate% x benefit`.
///
/// The percentage is clamped to `0..=100` and the benefit to the engine's
/// amount ceiling first.
pub fn fee_amount(benefit: Decimal, pct: Decimal) -> Decimal {
    clamp_amount(benefit) * clamp_fee_pct(pct) / Decimal::ONE_HUNDRED
}
