//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type describing how often an employee is
//! paid, and the [`AmountBasis`] used when converting amounts between time scales.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// How often an employee receives a paycheck.
///
/// Unknown codes fall back to [`PayPeriod::Biweekly`], which is also the
/// [`Default`] value.
///
/// # Example
///
/// ```
/// use benefit_engine::models::PayPeriod;
/// use rust_decimal::Decimal;
///
/// assert_eq!(PayPeriod::Weekly.periods_per_year(), Decimal::from(52));
/// assert_eq!(PayPeriod::from_code_or_default("fortnightly"), PayPeriod::Biweekly);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayPeriod {
    /// Paid every week (52 periods per year).
    Weekly,
    /// Paid every other week (26 periods per year).
    #[default]
    Biweekly,
    /// Paid twice a month (24 periods per year).
    Semimonthly,
    /// Paid once a month (12 periods per year).
    Monthly,
}

impl PayPeriod {
    /// All pay periods, in order of increasing period length.
    pub const ALL: [PayPeriod; 4] = [
        PayPeriod::Weekly,
        PayPeriod::Biweekly,
        PayPeriod::Semimonthly,
        PayPeriod::Monthly,
    ];

    /// Returns the number of paychecks per year.
    pub fn periods_per_year(self) -> Decimal {
        let periods: u32 = match self {
            PayPeriod::Weekly => 52,
            PayPeriod::Biweekly => 26,
            PayPeriod::Semimonthly => 24,
            PayPeriod::Monthly => 12,
        };
        Decimal::from(periods)
    }

    /// Returns the canonical code for this pay period.
    pub fn code(self) -> &'static str {
        match self {
            PayPeriod::Weekly => "weekly",
            PayPeriod::Biweekly => "biweekly",
            PayPeriod::Semimonthly => "semimonthly",
            PayPeriod::Monthly => "monthly",
        }
    }

    /// Parses a pay period code, falling back to biweekly when it is not recognized.
    pub fn from_code_or_default(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }
}

impl FromStr for PayPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(PayPeriod::Weekly),
            "biweekly" | "bi-weekly" | "bi_weekly" => Ok(PayPeriod::Biweekly),
            "semimonthly" | "semi-monthly" | "semi_monthly" => Ok(PayPeriod::Semimonthly),
            "monthly" => Ok(PayPeriod::Monthly),
            _ => Err(EngineError::InvalidInput {
                field: "pay_period".to_string(),
                message: format!("unrecognized pay period '{}'", s),
            }),
        }
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The time scale an amount is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountBasis {
    /// A yearly amount.
    Annual,
    /// A monthly amount.
    Monthly,
    /// An amount per paycheck.
    PerPay,
}
