//! Employee model and related types.
//!
//! This module defines the [`FilingStatus`] enum and the [`EnrolledEmployee`]
//! record used when re-running deductions for a company's roster.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::PayPeriod;

/// Tax filing status reported by the employee.
///
/// Unknown codes fall back to [`FilingStatus::Single`], which is also the
/// [`Default`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    /// Single filer.
    #[default]
    Single,
    /// Married filing jointly.
    Married,
    /// Head of household.
    Head,
}

impl FilingStatus {
    /// Returns the status used for benefit table lookups.
    ///
    /// Head of household is looked up as single.
    ///
    /// # Examples
    ///
    /// ```
    /// use benefit_engine::models::FilingStatus;
    ///
    /// assert_eq!(FilingStatus::Head.for_benefit_table(), FilingStatus::Single);
    /// assert_eq!(FilingStatus::Married.for_benefit_table(), FilingStatus::Married);
    /// ```
    pub fn for_benefit_table(self) -> Self {
        match self {
            FilingStatus::Head => FilingStatus::Single,
            other => other,
        }
    }

    /// Returns the canonical code for this filing status.
    pub fn code(self) -> &'static str {
        match self {
            FilingStatus::Single => "single",
            FilingStatus::Married => "married",
            FilingStatus::Head => "head",
        }
    }

    /// Parses a filing status code, falling back to single when it is not recognized.
    pub fn from_code_or_default(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }
}

impl FromStr for FilingStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(FilingStatus::Single),
            "married" | "married_filing_jointly" | "mfj" => Ok(FilingStatus::Married),
            "head" | "head_of_household" | "hoh" => Ok(FilingStatus::Head),
            _ => Err(EngineError::InvalidInput {
                field: "filing_status".to_string(),
                message: format!("unrecognized filing status '{}'", s),
            }),
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An employee enrolled in a company's pre-tax benefit plan.
///
/// Billing runs re-compute the capped deduction for every enrolled employee each
/// period from these attributes.
///
/// # Example
///
/// ```
/// use benefit_engine::models::{EnrolledEmployee, FilingStatus, PayPeriod};
/// use rust_decimal::Decimal;
///
/// let employee = EnrolledEmployee {
///     id: "emp_001".to_string(),
///     gross_per_pay: Decimal::from(2000),
///     pay_period: PayPeriod::Biweekly,
///     filing_status: FilingStatus::Single,
///     dependents: 0,
///     state: "TX".to_string(),
/// };
/// assert_eq!(employee.filing_status.for_benefit_table(), FilingStatus::Single);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledEmployee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Gross pay per paycheck.
    pub gross_per_pay: Decimal,
    /// How often the employee is paid.
    #[serde(default)]
    pub pay_period: PayPeriod,
    /// The employee's filing status.
    #[serde(default)]
    pub filing_status: FilingStatus,
    /// Number of dependents claimed. Negative counts are treated as zero.
    #[serde(default)]
    pub dependents: i32,
    /// Two-letter code of the state the employee is taxed in.
    pub state: String,
}
