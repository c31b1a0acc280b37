//! Target benefit lookup by pricing tier.
//!
//! Each pricing tier has a fixed schedule of monthly pre-tax benefit amounts
//! keyed by filing status and whether the employee claims dependents. The
//! lookup applies no caps; the safety cap is applied downstream.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{FilingStatus, PricingTier};

/// Monthly benefit amounts, in whole dollars, for one pricing tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenefitSchedule {
    /// Single filer without dependents.
    pub single_no_dependents: u32,
    /// Single filer with one or more dependents.
    pub single_with_dependents: u32,
    /// Married filer without dependents.
    pub married_no_dependents: u32,
    /// Married filer with one or more dependents.
    pub married_with_dependents: u32,
}

impl BenefitSchedule {
    const fn flat(amount: u32) -> Self {
        Self {
            single_no_dependents: amount,
            single_with_dependents: amount,
            married_no_dependents: amount,
            married_with_dependents: amount,
        }
    }

    fn amount(&self, filing_status: FilingStatus, has_dependents: bool) -> u32 {
        match (filing_status.for_benefit_table(), has_dependents) {
            (FilingStatus::Married, true) => self.married_with_dependents,
            (FilingStatus::Married, false) => self.married_no_dependents,
            (_, true) => self.single_with_dependents,
            (_, false) => self.single_no_dependents,
        }
    }
}

const STATE_SCHOOL_SCHEDULE: BenefitSchedule = BenefitSchedule::flat(1300);

const YEAR_2025_SCHEDULE: BenefitSchedule = BenefitSchedule {
    single_no_dependents: 1300,
    single_with_dependents: 1700,
    married_no_dependents: 1700,
    married_with_dependents: 1700,
};

const PRE_2025_SCHEDULE: BenefitSchedule = BenefitSchedule {
    single_no_dependents: 800,
    single_with_dependents: 1200,
    married_no_dependents: 1200,
    married_with_dependents: 1600,
};

const ORIGINAL_6PCT_SCHEDULE: BenefitSchedule = BenefitSchedule {
    single_no_dependents: 700,
    single_with_dependents: 1100,
    married_no_dependents: 1500,
    married_with_dependents: 1500,
};

/// Returns the benefit schedule for a pricing tier.
pub fn benefit_schedule(tier: PricingTier) -> &'static BenefitSchedule {
    match tier {
        PricingTier::StateSchool => &STATE_SCHOOL_SCHEDULE,
        PricingTier::Year2025 => &YEAR_2025_SCHEDULE,
        PricingTier::Pre2025 => &PRE_2025_SCHEDULE,
        PricingTier::Original6Pct => &ORIGINAL_6PCT_SCHEDULE,
    }
}

/// Returns the target monthly pre-tax benefit for an employee.
///
/// Head of household is looked up as single, and any dependent count below one
/// (including negative counts) is treated as no dependents. Unrecognized tier
/// codes resolve to the 2025 tier before they reach this function; see
/// [`PricingTier::from_code_or_default`].
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::target_monthly_benefit;
/// use benefit_engine::models::{FilingStatus, PricingTier};
/// use rust_decimal::Decimal;
///
/// let amount = target_monthly_benefit(PricingTier::Year2025, FilingStatus::Single, 1);
/// assert_eq!(amount, Decimal::from(1700));
/// ```
pub fn target_monthly_benefit(
    tier: PricingTier,
    filing_status: FilingStatus,
    dependents: i32,
) -> Decimal {
    let has_dependents = dependents > 0;
    let amount = benefit_schedule(tier).amount(filing_status, has_dependents);

    debug!(
        tier = %tier,
        filing_status = %filing_status,
        has_dependents,
        amount,
        "Resolved target monthly benefit"
    );

    Decimal::from(amount)
}
