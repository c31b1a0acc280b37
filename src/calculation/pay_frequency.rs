//! Pay frequency conversions.
//!
//! Converts amounts between annual, monthly and per-paycheck bases for a given
//! [`PayPeriod`]. Nothing here rounds; rounding happens once, when a projection
//! is emitted.

use rust_decimal::Decimal;

use crate::models::{AmountBasis, PayPeriod, PeriodAmounts};

const MONTHS_PER_YEAR: u32 = 12;

fn months_per_year() -> Decimal {
    Decimal::from(MONTHS_PER_YEAR)
}

/// Converts an amount on the given basis to a per-paycheck amount.
///
/// Monthly amounts are divided by the number of paychecks per month
/// (`periods_per_year / 12`). The multiplication happens first so that common
/// targets divide exactly.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::to_per_pay;
/// use benefit_engine::models::{AmountBasis, PayPeriod};
/// use rust_decimal::Decimal;
///
/// let per_pay = to_per_pay(Decimal::from(1300), AmountBasis::Monthly, PayPeriod::Biweekly);
/// assert_eq!(per_pay, Decimal::from(600));
///
/// let per_pay = to_per_pay(Decimal::from(52000), AmountBasis::Annual, PayPeriod::Weekly);
/// assert_eq!(per_pay, Decimal::from(1000));
/// ```
pub fn to_per_pay(amount: Decimal, basis: AmountBasis, pay_period: PayPeriod) -> Decimal {
    let periods = pay_period.periods_per_year();
    match basis {
        AmountBasis::Annual => amount / periods,
        AmountBasis::Monthly => amount * months_per_year() / periods,
        AmountBasis::PerPay => amount,
    }
}

/// Converts a per-paycheck amount to the given basis.
///
/// # Examples
///
/// ```
/// use benefit_engine::calculation::from_per_pay;
/// use benefit_engine::models::{AmountBasis, PayPeriod};
/// use rust_decimal::Decimal;
///
/// let monthly = from_per_pay(Decimal::from(600), AmountBasis::Monthly, PayPeriod::Biweekly);
/// assert_eq!(monthly, Decimal::from(1300));
/// ```
pub fn from_per_pay(amount: Decimal, basis: AmountBasis, pay_period: PayPeriod) -> Decimal {
    let periods = pay_period.periods_per_year();
    match basis {
        AmountBasis::Annual => amount * periods,
        AmountBasis::Monthly => amount * periods / months_per_year(),
        AmountBasis::PerPay => amount,
    }
}

/// Scales a per-paycheck amount to all three bases, unrounded.
pub fn scale_per_pay(per_pay: Decimal, pay_period: PayPeriod) -> PeriodAmounts {
    PeriodAmounts {
        per_pay,
        monthly: from_per_pay(per_pay, AmountBasis::Monthly, pay_period),
        annual: from_per_pay(per_pay, AmountBasis::Annual, pay_period),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_monthly_to_per_pay_for_each_period() {
        let monthly = dec("1300");
        assert_eq!(to_per_pay(monthly, AmountBasis::Monthly, PayPeriod::Weekly), dec("300"));
        assert_eq!(to_per_pay(monthly, AmountBasis::Monthly, PayPeriod::Biweekly), dec("600"));
        assert_eq!(
            to_per_pay(monthly, AmountBasis::Monthly, PayPeriod::Semimonthly),
            dec("650")
        );
        assert_eq!(to_per_pay(monthly, AmountBasis::Monthly, PayPeriod::Monthly), dec("1300"));
    }

    #[test]
    fn test_annual_to_per_pay() {
        assert_eq!(
            to_per_pay(dec("52000"), AmountBasis::Annual, PayPeriod::Biweekly),
            dec("2000")
        );
        assert_eq!(
            to_per_pay(dec("48000"), AmountBasis::Annual, PayPeriod::Semimonthly),
            dec("2000")
        );
    }

    #[test]
    fn test_per_pay_basis_is_identity() {
        assert_eq!(
            to_per_pay(dec("123.45"), AmountBasis::PerPay, PayPeriod::Monthly),
            dec("123.45")
        );
        assert_eq!(
            from_per_pay(dec("123.45"), AmountBasis::PerPay, PayPeriod::Weekly),
            dec("123.45")
        );
    }

    #[test]
    fn test_converter_does_not_round() {
        let per_pay = to_per_pay(dec("1700"), AmountBasis::Monthly, PayPeriod::Biweekly);
        assert!(per_pay.scale() > 2);
        assert!(per_pay > dec("784.61") && per_pay < dec("784.62"));
    }

    #[test]
    fn test_unknown_code_converts_as_biweekly() {
        let period = PayPeriod::from_code_or_default("every-other-tuesday");
        assert_eq!(
            to_per_pay(dec("26000"), AmountBasis::Annual, period),
            dec("1000")
        );
    }

    #[test]
    fn test_scale_per_pay() {
        let amounts = scale_per_pay(dec("30"), PayPeriod::Biweekly);
        assert_eq!(amounts.per_pay, dec("30"));
        assert_eq!(amounts.monthly, dec("65"));
        assert_eq!(amounts.annual, dec("780"));
    }
}
