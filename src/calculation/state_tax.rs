//! State income tax calculation.
//!
//! Computes annual state income tax on taxable wage income using a state's
//! configured method: no tax, a flat rate, or marginal brackets. Personal and
//! dependent exemptions carried in the configuration are not applied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{StateTaxMethod, StateTaxTable, TaxBracket};

use super::limits::{clamp_amount, clamp_tax_rate};

/// Where a state tax figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateTaxSource {
    /// The state's entry in the tax table.
    Table,
    /// A caller-supplied flat rate.
    Override,
    /// The state is not in the table and no override was given; no tax applies.
    UnknownState,
}

/// An annual state tax amount and its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxResult {
    /// Annual state income tax.
    pub annual_tax: Decimal,
    /// Where the amount came from.
    pub source: StateTaxSource,
}

/// Computes flat-rate tax: `max(0, income - standard_deduction) x rate`.
pub fn flat_tax(income: Decimal, rate: Decimal, standard_deduction: Decimal) -> Decimal {
    taxable(income, standard_deduction) * clamp_tax_rate(rate)
}

/// Computes marginal bracket tax over `max(0, income - standard_deduction)`.
///
/// Thresholds are clamped to the engine's amount ceiling and rates into
/// `0..=1`. Brackets must be in strictly increasing threshold order. Each bracket taxes
/// the slice of income between its threshold and the next one (unbounded for
/// the last); accrual stops at the first threshold at or above the remaining
/// taxable income.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::bracket_tax;
/// use benefit_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let brackets = [
///     TaxBracket { from: Decimal::ZERO, rate: Decimal::from_str("0.02").unwrap() },
///     TaxBracket { from: Decimal::from(10000), rate: Decimal::from_str("0.05").unwrap() },
/// ];
/// // 10,000 x 2% + 5,000 x 5%
/// let tax = bracket_tax(Decimal::from(15000), &brackets, Decimal::ZERO);
/// assert_eq!(tax, Decimal::from(450));
/// ```
pub fn bracket_tax(
    income: Decimal,
    brackets: &[TaxBracket],
    standard_deduction: Decimal,
) -> Decimal {
    let taxable = taxable(income, standard_deduction);
    let mut tax = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        let from = clamp_amount(bracket.from);
        if taxable <= from {
            break;
        }

        let upper = brackets
            .get(index + 1)
            .map_or(taxable, |next| clamp_amount(next.from).min(taxable));
        tax += (upper - from) * clamp_tax_rate(bracket.rate);
    }

    tax
}

fn taxable(income: Decimal, standard_deduction: Decimal) -> Decimal {
    (clamp_amount(income) - clamp_amount(standard_deduction)).max(Decimal::ZERO)
}

/// Computes annual tax for one state's method.
pub fn annual_tax_for_method(income: Decimal, method: &StateTaxMethod) -> Decimal {
    match method {
        StateTaxMethod::None => Decimal::ZERO,
        StateTaxMethod::Flat {
            rate,
            standard_deduction,
        } => flat_tax(income, *rate, *standard_deduction),
        StateTaxMethod::Brackets {
            brackets,
            standard_deduction,
        } => bracket_tax(income, brackets, *standard_deduction),
    }
}

/// Computes annual state income tax for a state code.
///
/// Unknown states pay no tax.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::annual_state_tax;
/// use benefit_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::embedded().unwrap();
/// let tax = annual_state_tax(Decimal::from(52000), "TX", config.state_taxes());
/// assert_eq!(tax, Decimal::ZERO);
/// ```
pub fn annual_state_tax(income: Decimal, state_code: &str, table: &StateTaxTable) -> Decimal {
    table
        .get(state_code)
        .map_or(Decimal::ZERO, |config| {
            annual_tax_for_method(income, &config.method)
        })
}

/// Computes annual state income tax, honouring an optional flat override rate.
///
/// When `override_rate` is given it is applied as `rate x income` for any
/// state, known or not, with the rate clamped into `0..=1`. Otherwise the table
/// is used, and unknown states pay no tax.
pub fn resolve_state_tax(
    income: Decimal,
    state_code: &str,
    table: &StateTaxTable,
    override_rate: Option<Decimal>,
) -> StateTaxResult {
    if let Some(rate) = override_rate {
        return StateTaxResult {
            annual_tax: clamp_amount(income).max(Decimal::ZERO) * clamp_tax_rate(rate),
            source: StateTaxSource::Override,
        };
    }

    match table.get(state_code) {
        Some(config) => StateTaxResult {
            annual_tax: annual_tax_for_method(income, &config.method),
            source: StateTaxSource::Table,
        },
        None => {
            debug!(state = state_code, "State not in tax table; no state tax applied");
            StateTaxResult {
                annual_tax: Decimal::ZERO,
                source: StateTaxSource::UnknownState,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::max_amount;
    use crate::config::{ConfigLoader, StateTaxConfig};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracket(from: &str, rate: &str) -> TaxBracket {
        TaxBracket {
            from: dec(from),
            rate: dec(rate),
        }
    }

    fn table() -> StateTaxTable {
        ConfigLoader::embedded().unwrap().state_taxes().clone()
    }

    /// ST-001: no-tax state
    #[test]
    fn test_texas_has_no_tax() {
        assert_eq!(annual_state_tax(dec("250000"), "TX", &table()), Decimal::ZERO);
    }

    /// ST-002: flat rate without deduction
    #[test]
    fn test_illinois_flat_rate() {
        assert_eq!(annual_state_tax(dec("52000"), "IL", &table()), dec("2574"));
    }

    /// ST-003: flat rate with standard deduction
    #[test]
    fn test_north_carolina_flat_rate_after_deduction() {
        // (52,000 - 12,750) x 4.25%
        assert_eq!(annual_state_tax(dec("52000"), "NC", &table()), dec("1668.125"));
    }

    #[test]
    fn test_flat_rate_floor_at_zero_below_deduction() {
        assert_eq!(annual_state_tax(dec("10000"), "NC", &table()), Decimal::ZERO);
    }

    /// ST-004: progressive brackets with deduction
    #[test]
    fn test_virginia_brackets() {
        // taxable 52,000 - 8,500 = 43,500
        // 3,000 x 2% + 2,000 x 3% + 12,000 x 5% + 26,500 x 5.75%
        let expected = dec("60") + dec("60") + dec("600") + dec("1523.75");
        assert_eq!(annual_state_tax(dec("52000"), "VA", &table()), expected);
    }

    #[test]
    fn test_brackets_stop_when_income_exhausted() {
        let brackets = [
            bracket("0", "0.01"),
            bracket("1000", "0.02"),
            bracket("5000", "0.10"),
        ];
        // 1,000 x 1% + 1,000 x 2%; the 10% bracket is never reached
        assert_eq!(bracket_tax(dec("2000"), &brackets, Decimal::ZERO), dec("30"));
    }

    #[test]
    fn test_income_exactly_at_threshold() {
        let brackets = [bracket("0", "0.01"), bracket("1000", "0.02")];
        assert_eq!(bracket_tax(dec("1000"), &brackets, Decimal::ZERO), dec("10"));
    }

    #[test]
    fn test_zero_and_negative_income() {
        let brackets = [bracket("0", "0.05")];
        assert_eq!(bracket_tax(Decimal::ZERO, &brackets, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(bracket_tax(dec("-500"), &brackets, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(flat_tax(dec("-500"), dec("0.05"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_exemptions_are_not_applied() {
        // Illinois carries a personal exemption but the flat rate applies to all income.
        let table = table();
        let illinois: &StateTaxConfig = table.get("IL").unwrap();
        assert!(illinois.personal_exemption.is_some());
        assert_eq!(annual_state_tax(dec("10000"), "IL", &table), dec("495"));
    }

    #[test]
    fn test_unknown_state_pays_nothing() {
        let result = resolve_state_tax(dec("52000"), "ZZ", &table(), None);
        assert_eq!(result.annual_tax, Decimal::ZERO);
        assert_eq!(result.source, StateTaxSource::UnknownState);
    }

    #[test]
    fn test_override_applies_to_unknown_state() {
        let result = resolve_state_tax(dec("52000"), "ZZ", &table(), Some(dec("0.05")));
        assert_eq!(result.annual_tax, dec("2600"));
        assert_eq!(result.source, StateTaxSource::Override);
    }

    #[test]
    fn test_override_replaces_table_lookup() {
        let result = resolve_state_tax(dec("52000"), "CA", &table(), Some(dec("0.03")));
        assert_eq!(result.annual_tax, dec("1560"));
    }

    #[test]
    fn test_override_rate_is_clamped_to_whole_income() {
        let table = table();
        let result = resolve_state_tax(dec("52000"), "TX", &table, Some(Decimal::MAX));
        assert_eq!(result.annual_tax, dec("52000"));

        let result = resolve_state_tax(dec("52000"), "TX", &table, Some(dec("-0.05")));
        assert_eq!(result.annual_tax, Decimal::ZERO);
    }

    #[test]
    fn test_unrepresentable_income_does_not_overflow() {
        let table = table();
        assert_eq!(annual_state_tax(Decimal::MAX, "TX", &table), Decimal::ZERO);
        assert!(annual_state_tax(Decimal::MAX, "VA", &table) > Decimal::ZERO);
        assert_eq!(annual_state_tax(Decimal::MIN, "NC", &table), Decimal::ZERO);

        let result = resolve_state_tax(Decimal::MAX, "ZZ", &table, Some(Decimal::MAX));
        assert_eq!(result.annual_tax, max_amount());
    }

    #[test]
    fn test_state_code_is_case_insensitive() {
        let table = table();
        assert_eq!(
            annual_state_tax(dec("52000"), "il", &table),
            annual_state_tax(dec("52000"), "IL", &table)
        );
    }

    #[test]
    fn test_every_embedded_state_is_non_negative_and_monotonic() {
        let table = table();
        let incomes = ["0", "15000", "52000", "120000", "600000", "2000000"];
        for code in table.states().keys() {
            let mut previous = Decimal::ZERO;
            for income in incomes {
                let tax = annual_state_tax(dec(income), code, &table);
                assert!(tax >= previous, "{code} at {income}");
                previous = tax;
            }
        }
    }

    proptest! {
        #[test]
        fn prop_no_tax_method_is_always_zero(income_cents in -1_000_000_000i64..1_000_000_000) {
            let income = Decimal::new(income_cents, 2);
            prop_assert_eq!(annual_tax_for_method(income, &StateTaxMethod::None), Decimal::ZERO);
        }

        #[test]
        fn prop_single_zero_bracket_matches_flat(
            income_cents in -1_000_000_000i64..1_000_000_000,
            rate_bps in 0i64..1500,
            deduction in 0u32..20_000,
        ) {
            let income = Decimal::new(income_cents, 2);
            let rate = Decimal::new(rate_bps, 4);
            let deduction = Decimal::from(deduction);
            let brackets = [TaxBracket { from: Decimal::ZERO, rate }];

            prop_assert_eq!(
                bracket_tax(income, &brackets, deduction),
                flat_tax(income, rate, deduction)
            );
        }
    }
}
