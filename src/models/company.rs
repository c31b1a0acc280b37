//! Company-level pricing attributes.
//!
//! A company is set up with a [`PricingTier`] and a [`FeeModel`]. Together they
//! select the benefit table and the fee split applied to each enrolled employee.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The pricing tier a company was signed up under.
///
/// Unknown tier codes fall back to [`PricingTier::Year2025`], which is also the
/// [`Default`] value.
///
/// # Example
///
/// ```
/// use benefit_engine::models::PricingTier;
///
/// assert_eq!("pre_2025".parse::<PricingTier>().unwrap(), PricingTier::Pre2025);
/// assert_eq!(PricingTier::from_code_or_default("legacy"), PricingTier::Year2025);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PricingTier {
    /// Public school districts; flat benefit and employee-only fee.
    #[serde(rename = "state_school")]
    StateSchool,
    /// Current pricing for companies signed in 2025 onwards.
    #[default]
    #[serde(rename = "year_2025")]
    Year2025,
    /// Pricing for companies signed before 2025.
    #[serde(rename = "pre_2025")]
    Pre2025,
    /// The original 6% pricing program.
    #[serde(rename = "original_6pct")]
    Original6Pct,
}

impl PricingTier {
    /// All pricing tiers.
    pub const ALL: [PricingTier; 4] = [
        PricingTier::StateSchool,
        PricingTier::Year2025,
        PricingTier::Pre2025,
        PricingTier::Original6Pct,
    ];

    /// Returns the canonical code for this tier.
    pub fn code(self) -> &'static str {
        match self {
            PricingTier::StateSchool => "state_school",
            PricingTier::Year2025 => "year_2025",
            PricingTier::Pre2025 => "pre_2025",
            PricingTier::Original6Pct => "original_6pct",
        }
    }

    /// Parses a tier code, falling back to the 2025 tier when it is not recognized.
    pub fn from_code_or_default(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }
}

impl FromStr for PricingTier {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "state_school" => Ok(PricingTier::StateSchool),
            "year_2025" | "2025" => Ok(PricingTier::Year2025),
            "pre_2025" => Ok(PricingTier::Pre2025),
            "original_6pct" => Ok(PricingTier::Original6Pct),
            _ => Err(EngineError::InvalidInput {
                field: "pricing_tier".to_string(),
                message: format!("unrecognized pricing tier '{}'", s),
            }),
        }
    }
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The service fee descriptor agreed with a company.
///
/// A fee model is written either as `"<employee%>/<employer%>"` (for example
/// `"5/3"`) or as a single aggregate number (`"6"`, `"7"`, `"8"`) that maps to a
/// historical fixed split. Parsing never fails: a split segment that is not a
/// number reads as zero, and anything that is neither form is kept verbatim as
/// [`FeeModel::Unrecognized`].
///
/// Serializes back to its descriptor string.
///
/// # Example
///
/// ```
/// use benefit_engine::models::FeeModel;
/// use rust_decimal::Decimal;
///
/// let model = FeeModel::parse("5/3");
/// assert_eq!(
///     model,
///     FeeModel::Split {
///         employee_pct: Decimal::from(5),
///         employer_pct: Decimal::from(3),
///     }
/// );
/// assert_eq!(model.to_string(), "5/3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeeModel {
    /// Explicit employee and employer percentages.
    Split {
        /// Percentage of the benefit charged to the employee.
        employee_pct: Decimal,
        /// Percentage of the benefit charged to the employer.
        employer_pct: Decimal,
    },
    /// A single aggregate percentage resolved through the fixed split table.
    Aggregate(Decimal),
    /// A descriptor that is neither a split nor a number.
    Unrecognized(String),
}

impl FeeModel {
    /// Parses a fee model descriptor.
    pub fn parse(descriptor: &str) -> Self {
        let descriptor = descriptor.trim();

        if let Some((employee, rest)) = descriptor.split_once('/') {
            let employer = rest.split('/').next().unwrap_or_default();
            return FeeModel::Split {
                employee_pct: parse_pct_or_zero(employee),
                employer_pct: parse_pct_or_zero(employer),
            };
        }

        match Decimal::from_str(descriptor) {
            Ok(aggregate) => FeeModel::Aggregate(aggregate),
            Err(_) => FeeModel::Unrecognized(descriptor.to_string()),
        }
    }
}

fn parse_pct_or_zero(segment: &str) -> Decimal {
    Decimal::from_str(segment.trim())
        .map(|pct| pct.max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO)
}

impl From<String> for FeeModel {
    fn from(descriptor: String) -> Self {
        FeeModel::parse(&descriptor)
    }
}

impl From<&str> for FeeModel {
    fn from(descriptor: &str) -> Self {
        FeeModel::parse(descriptor)
    }
}

impl From<FeeModel> for String {
    fn from(model: FeeModel) -> Self {
        model.to_string()
    }
}

impl fmt::Display for FeeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeModel::Split {
                employee_pct,
                employer_pct,
            } => write!(
                f,
                "{}/{}",
                employee_pct.normalize(),
                employer_pct.normalize()
            ),
            FeeModel::Aggregate(aggregate) => write!(f, "{}", aggregate.normalize()),
            FeeModel::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// The resolved fee percentages applied to the per-pay benefit amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRates {
    /// Percentage of the benefit charged to the employee.
    pub employee_pct: Decimal,
    /// Percentage of the benefit charged to the employer.
    pub employer_pct: Decimal,
}

impl FeeRates {
    /// Zero fees on both sides.
    pub const ZERO: FeeRates = FeeRates {
        employee_pct: Decimal::ZERO,
        employer_pct: Decimal::ZERO,
    };

    /// Creates fee rates from whole percentages.
    pub fn from_whole(employee_pct: u32, employer_pct: u32) -> Self {
        Self {
            employee_pct: Decimal::from(employee_pct),
            employer_pct: Decimal::from(employer_pct),
        }
    }
}

/// The pricing attributes a billing run needs about a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// The company's pricing tier.
    pub tier: PricingTier,
    /// The company's fee model.
    pub fee_model: FeeModel,
    /// Maximum share of gross pay, in percent, that may go to the benefit.
    pub safety_cap_pct: Decimal,
    /// Flat state tax rate as a fraction, applied to every employee instead of the state table.
    #[serde(default)]
    pub state_tax_rate_override: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_tier_codes_round_trip() {
        for tier in PricingTier::ALL {
            assert_eq!(tier.code().parse::<PricingTier>().unwrap(), tier);
        }
    }

    #[test]
    fn test_tier_accepts_bare_year_alias() {
        assert_eq!("2025".parse::<PricingTier>().unwrap(), PricingTier::Year2025);
        assert_eq!("STATE_SCHOOL".parse::<PricingTier>().unwrap(), PricingTier::StateSchool);
    }

    #[test]
    fn test_unknown_tier_falls_back_to_year_2025() {
        assert!("enterprise".parse::<PricingTier>().is_err());
        assert_eq!(PricingTier::from_code_or_default("enterprise"), PricingTier::Year2025);
    }

    #[test]
    fn test_tier_serializes_with_underscored_codes() {
        assert_eq!(
            serde_json::to_string(&PricingTier::Original6Pct).unwrap(),
            "\"original_6pct\""
        );
        let tier: PricingTier = serde_json::from_str("\"pre_2025\"").unwrap();
        assert_eq!(tier, PricingTier::Pre2025);
    }

    #[test]
    fn test_parse_split_fee_model() {
        assert_eq!(
            FeeModel::parse("5/3"),
            FeeModel::Split {
                employee_pct: dec("5"),
                employer_pct: dec("3"),
            }
        );
    }

    #[test]
    fn test_parse_split_with_bad_segment_reads_zero() {
        assert_eq!(
            FeeModel::parse("abc/4"),
            FeeModel::Split {
                employee_pct: Decimal::ZERO,
                employer_pct: dec("4"),
            }
        );
        assert_eq!(
            FeeModel::parse("2.5/"),
            FeeModel::Split {
                employee_pct: dec("2.5"),
                employer_pct: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn test_parse_split_ignores_extra_segments() {
        assert_eq!(
            FeeModel::parse("4/2/1"),
            FeeModel::Split {
                employee_pct: dec("4"),
                employer_pct: dec("2"),
            }
        );
    }

    #[test]
    fn test_parse_split_clamps_negative_segments() {
        assert_eq!(
            FeeModel::parse("-3/2"),
            FeeModel::Split {
                employee_pct: Decimal::ZERO,
                employer_pct: dec("2"),
            }
        );
    }

    #[test]
    fn test_parse_aggregate_fee_model() {
        assert_eq!(FeeModel::parse(" 8 "), FeeModel::Aggregate(dec("8")));
    }

    #[test]
    fn test_parse_unrecognized_fee_model() {
        assert_eq!(
            FeeModel::parse("premium"),
            FeeModel::Unrecognized("premium".to_string())
        );
    }

    #[test]
    fn test_fee_model_serde_uses_descriptor_string() {
        let model: FeeModel = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(model, FeeModel::Aggregate(dec("7")));
        assert_eq!(
            serde_json::to_string(&FeeModel::parse("5.0/3")).unwrap(),
            "\"5/3\""
        );
    }

    #[test]
    fn test_fee_rates_from_whole() {
        let rates = FeeRates::from_whole(5, 3);
        assert_eq!(rates.employee_pct, dec("5"));
        assert_eq!(rates.employer_pct, dec("3"));
    }
}
