//! Output rounding.
//!
//! Intermediate figures keep full precision. Monetary values are rounded to
//! cents, half away from zero, only when a result is emitted.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Affordability, PaycheckBreakdown, PeriodAmounts};

/// Rounds a monetary amount to cents, half up.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("1668.125").unwrap()).to_string(), "1668.13");
/// assert_eq!(round_money(Decimal::from(600)).to_string(), "600.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

impl PeriodAmounts {
    /// Rounds every amount to cents.
    pub fn rounded(self) -> Self {
        Self {
            per_pay: round_money(self.per_pay),
            monthly: round_money(self.monthly),
            annual: round_money(self.annual),
        }
    }
}

impl PaycheckBreakdown {
    /// Rounds every amount to cents.
    pub fn rounded(self) -> Self {
        Self {
            gross: round_money(self.gross),
            benefit: round_money(self.benefit),
            federal_tax: round_money(self.federal_tax),
            state_tax: round_money(self.state_tax),
            fica: round_money(self.fica),
            employee_fee: round_money(self.employee_fee),
            net_pay: round_money(self.net_pay),
        }
    }
}

impl Affordability {
    /// Rounds every amount, and the percentage of gross, to two places.
    pub fn rounded(self) -> Self {
        Self {
            target_per_pay: round_money(self.target_per_pay),
            safe_per_pay: round_money(self.safe_per_pay),
            shortfall_per_pay: round_money(self.shortfall_per_pay),
            target_monthly: round_money(self.target_monthly),
            safe_monthly: round_money(self.safe_monthly),
            shortfall_monthly: round_money(self.shortfall_monthly),
            percent_of_gross: self.percent_of_gross.map(round_money),
            ..self
        }
    }
}
