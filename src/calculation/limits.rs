//! Numeric ceilings for engine inputs.
//!
//! `Decimal` multiplication panics on overflow. Inputs are clamped to these
//! bounds before any arithmetic, which keeps every product the engine forms far
//! below `Decimal::MAX`.

use rust_decimal::Decimal;

/// Largest amount, in either sign, the engine computes with: one trillion.
///
/// Applies to gross pay, target benefits and annual incomes.
pub fn max_amount() -> Decimal {
    Decimal::new(1_000_000_000_000, 0)
}

/// Largest fee percentage. A fee never exceeds the benefit it is charged on.
pub fn max_fee_pct() -> Decimal {
    Decimal::ONE_HUNDRED
}

/// Largest state tax rate, as a fraction.
pub fn max_tax_rate() -> Decimal {
    Decimal::ONE
}

/// Clamps an amount into `-max_amount()..=max_amount()`.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::{clamp_amount, max_amount};
/// use rust_decimal::Decimal;
///
/// assert_eq!(clamp_amount(Decimal::MAX), max_amount());
/// assert_eq!(clamp_amount(Decimal::from(2000)), Decimal::from(2000));
/// ```
pub fn clamp_amount(amount: Decimal) -> Decimal {
    amount.clamp(-max_amount(), max_amount())
}

/// Clamps a fee percentage into `0..=100`.
pub fn clamp_fee_pct(pct: Decimal) -> Decimal {
    pct.clamp(Decimal::ZERO, max_fee_pct())
}

/// Clamps a tax rate into `0..=1`.
pub fn clamp_tax_rate(rate: Decimal) -> Decimal {
    rate.clamp(Decimal::ZERO, max_tax_rate())
}
