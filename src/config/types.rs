//! Configuration types for the benefit engine.
//!
//! This module contains the strongly-typed configuration structures that are
//! deserialized from YAML files, and the validated state tax table built from
//! them.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{max_amount, max_tax_rate};
use crate::error::{EngineError, EngineResult};

/// Host defaults from `engine.yaml`.
///
/// The calculation functions take every cap as an explicit parameter; these
/// values are only what the HTTP layer passes when a request leaves the cap out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Safety cap, in percent of gross pay, used for proposals.
    pub default_safety_cap_pct: Decimal,
    /// Safety cap, in percent of gross pay, used for billing runs.
    pub billing_safety_cap_pct: Decimal,
}

/// How a state taxes wage income, as written in `state_taxes.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMethod {
    /// No wage income tax.
    None,
    /// A single rate.
    Flat,
    /// Marginal brackets.
    Brackets,
}

/// One marginal bracket: income from `from` up to the next bracket is taxed at `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The lower threshold of the bracket.
    pub from: Decimal,
    /// The marginal rate as a fraction.
    pub rate: Decimal,
}

/// A state entry as it appears in `state_taxes.yaml`, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct StateTaxEntry {
    /// Human-readable state name.
    #[serde(default)]
    pub name: Option<String>,
    /// The taxation method.
    pub method: TaxMethod,
    /// The flat rate, required for `flat`.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Deducted from income before the rate or brackets apply.
    #[serde(default)]
    pub standard_deduction: Option<Decimal>,
    /// Marginal brackets, required for `brackets`.
    #[serde(default)]
    pub brackets: Vec<TaxBracket>,
    /// Reference only; never applied.
    #[serde(default)]
    pub personal_exemption: Option<Decimal>,
    /// Reference only; never applied.
    #[serde(default)]
    pub dependent_exemption: Option<Decimal>,
}

/// The structure of `state_taxes.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct StateTaxFile {
    /// The tax year the schedules apply to.
    pub tax_year: u16,
    /// Entries keyed by two-letter state code.
    pub states: BTreeMap<String, StateTaxEntry>,
}

/// A validated taxation method with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum StateTaxMethod {
    /// No wage income tax.
    None,
    /// `max(0, income - standard_deduction) x rate`.
    Flat {
        /// The rate as a fraction.
        rate: Decimal,
        /// Deducted from income before the rate applies.
        standard_deduction: Decimal,
    },
    /// Marginal brackets over `max(0, income - standard_deduction)`.
    Brackets {
        /// Brackets with strictly increasing thresholds starting at zero.
        brackets: Vec<TaxBracket>,
        /// Deducted from income before the brackets apply.
        standard_deduction: Decimal,
    },
}

/// The validated tax configuration for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateTaxConfig {
    /// Human-readable state name.
    pub name: Option<String>,
    /// The taxation method.
    #[serde(flatten)]
    pub method: StateTaxMethod,
    /// Reference only; never applied.
    pub personal_exemption: Option<Decimal>,
    /// Reference only; never applied.
    pub dependent_exemption: Option<Decimal>,
}

impl StateTaxConfig {
    /// Validates a raw entry.
    ///
    /// Rates and deductions must be non-negative, flat entries need a rate, and
    /// bracket entries need at least one bracket with thresholds that start at
    /// zero and strictly increase.
    pub fn from_entry(state: &str, entry: StateTaxEntry) -> EngineResult<Self> {
        let invalid = |message: &str| EngineError::InvalidStateTax {
            state: state.to_string(),
            message: message.to_string(),
        };

        let standard_deduction = entry.standard_deduction.unwrap_or(Decimal::ZERO);
        if standard_deduction.is_sign_negative() {
            return Err(invalid("standard deduction must not be negative"));
        }
        if standard_deduction > max_amount() {
            return Err(invalid("standard deduction exceeds the supported amount"));
        }

        let method = match entry.method {
            TaxMethod::None => StateTaxMethod::None,
            TaxMethod::Flat => {
                let rate = entry
                    .rate
                    .ok_or_else(|| invalid("flat method requires a rate"))?;
                if rate.is_sign_negative() {
                    return Err(invalid("rate must not be negative"));
                }
                if rate > max_tax_rate() {
                    return Err(invalid("rate must not exceed 1"));
                }
                StateTaxMethod::Flat {
                    rate,
                    standard_deduction,
                }
            }
            TaxMethod::Brackets => {
                let brackets = entry.brackets;
                match brackets.first() {
                    None => return Err(invalid("brackets method requires at least one bracket")),
                    Some(first) if !first.from.is_zero() => {
                        return Err(invalid("first bracket must start at 0"));
                    }
                    Some(_) => {}
                }
                if brackets.windows(2).any(|pair| pair[1].from <= pair[0].from) {
                    return Err(invalid("bracket thresholds must be strictly increasing"));
                }
                if brackets.iter().any(|b| b.rate.is_sign_negative()) {
                    return Err(invalid("rate must not be negative"));
                }
                if brackets.iter().any(|b| b.rate > max_tax_rate()) {
                    return Err(invalid("rate must not exceed 1"));
                }
                if brackets.iter().any(|b| b.from > max_amount()) {
                    return Err(invalid("bracket threshold exceeds the supported amount"));
                }
                StateTaxMethod::Brackets {
                    brackets,
                    standard_deduction,
                }
            }
        };

        Ok(Self {
            name: entry.name,
            method,
            personal_exemption: entry.personal_exemption,
            dependent_exemption: entry.dependent_exemption,
        })
    }
}

/// Normalizes a state code for lookup.
pub fn normalize_state_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// The validated per-state tax table.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateTaxTable {
    tax_year: u16,
    states: BTreeMap<String, StateTaxConfig>,
}

impl StateTaxTable {
    /// Validates every entry of a parsed `state_taxes.yaml`.
    pub fn from_file(file: StateTaxFile) -> EngineResult<Self> {
        let states = file
            .states
            .into_iter()
            .map(|(code, entry)| {
                let code = normalize_state_code(&code);
                StateTaxConfig::from_entry(&code, entry).map(|config| (code, config))
            })
            .collect::<EngineResult<BTreeMap<_, _>>>()?;

        Ok(Self {
            tax_year: file.tax_year,
            states,
        })
    }

    /// Returns the tax year the schedules apply to.
    pub fn tax_year(&self) -> u16 {
        self.tax_year
    }

    /// Looks up a state by code, ignoring case and surrounding whitespace.
    pub fn get(&self, code: &str) -> Option<&StateTaxConfig> {
        self.states.get(&normalize_state_code(code))
    }

    /// Returns all states in code order.
    pub fn states(&self) -> &BTreeMap<String, StateTaxConfig> {
        &self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn entry(method: TaxMethod) -> StateTaxEntry {
        StateTaxEntry {
            name: None,
            method,
            rate: None,
            standard_deduction: None,
            brackets: vec![],
            personal_exemption: None,
            dependent_exemption: None,
        }
    }

    #[test]
    fn test_flat_entry_requires_rate() {
        let err = StateTaxConfig::from_entry("IL", entry(TaxMethod::Flat)).unwrap_err();
        assert!(err.to_string().contains("requires a rate"));
    }

    #[test]
    fn test_flat_entry_defaults_deduction_to_zero() {
        let mut raw = entry(TaxMethod::Flat);
        raw.rate = Some(dec("0.0495"));
        let config = StateTaxConfig::from_entry("IL", raw).unwrap();
        assert_eq!(
            config.method,
            StateTaxMethod::Flat {
                rate: dec("0.0495"),
                standard_deduction: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn test_brackets_must_start_at_zero() {
        let mut raw = entry(TaxMethod::Brackets);
        raw.brackets = vec![bracket("100", "0.02")];
        let err = StateTaxConfig::from_entry("XX", raw).unwrap_err();
        assert!(err.to_string().contains("start at 0"));
    }

    #[test]
    fn test_brackets_must_strictly_increase() {
        let mut raw = entry(TaxMethod::Brackets);
        raw.brackets = vec![
            bracket("0", "0.02"),
            bracket("1000", "0.03"),
            bracket("1000", "0.04"),
        ];
        let err = StateTaxConfig::from_entry("XX", raw).unwrap_err();
        assert!(err.to_string().contains("strictly increasing"));
    }

    #[test]
    fn test_empty_brackets_rejected() {
        let err = StateTaxConfig::from_entry("XX", entry(TaxMethod::Brackets)).unwrap_err();
        assert!(err.to_string().contains("at least one bracket"));
    }

    #[test]
    fn test_negative_values_rejected() {
        let mut raw = entry(TaxMethod::Flat);
        raw.rate = Some(dec("-0.01"));
        assert!(StateTaxConfig::from_entry("XX", raw).is_err());

        let mut raw = entry(TaxMethod::None);
        raw.standard_deduction = Some(dec("-5"));
        assert!(StateTaxConfig::from_entry("XX", raw).is_err());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let mut raw = entry(TaxMethod::Flat);
        raw.rate = Some(dec("4.95"));
        let err = StateTaxConfig::from_entry("IL", raw).unwrap_err();
        assert!(err.to_string().contains("must not exceed 1"));

        let mut raw = entry(TaxMethod::Brackets);
        raw.brackets = vec![bracket("0", "0.02"), bracket("5000", "12")];
        assert!(StateTaxConfig::from_entry("XX", raw).is_err());

        let mut raw = entry(TaxMethod::Brackets);
        raw.brackets = vec![
            bracket("0", "0.02"),
            bracket("79228162514264337593543950335", "0.05"),
        ];
        let err = StateTaxConfig::from_entry("XX", raw).unwrap_err();
        assert!(err.to_string().contains("supported amount"));

        let mut raw = entry(TaxMethod::None);
        raw.standard_deduction = Some(Decimal::MAX);
        assert!(StateTaxConfig::from_entry("XX", raw).is_err());
    }

    #[test]
    fn test_exemptions_are_preserved() {
        let mut raw = entry(TaxMethod::Flat);
        raw.rate = Some(dec("0.03"));
        raw.personal_exemption = Some(dec("1000"));
        raw.dependent_exemption = Some(dec("1500"));
        let config = StateTaxConfig::from_entry("IN", raw).unwrap();
        assert_eq!(config.personal_exemption, Some(dec("1000")));
        assert_eq!(config.dependent_exemption, Some(dec("1500")));
    }

    #[test]
    fn test_table_lookup_normalizes_codes() {
        let yaml = r#"
tax_year: 2025
states:
  tx: { method: none }
  PA: { method: flat, rate: 0.0307 }
"#;
        let file: StateTaxFile = serde_yaml::from_str(yaml).unwrap();
        let table = StateTaxTable::from_file(file).unwrap();

        assert_eq!(table.tax_year(), 2025);
        assert!(table.get("TX").is_some());
        assert!(table.get(" pa ").is_some());
        assert!(table.get("ZZ").is_none());
        assert_eq!(table.states().len(), 2);
    }

    #[test]
    fn test_table_reports_offending_state() {
        let yaml = r#"
tax_year: 2025
states:
  OK: { method: brackets, brackets: [ { from: 0, rate: 0.01 }, { from: 0, rate: 0.02 } ] }
"#;
        let file: StateTaxFile = serde_yaml::from_str(yaml).unwrap();
        match StateTaxTable::from_file(file).unwrap_err() {
            EngineError::InvalidStateTax { state, .. } => assert_eq!(state, "OK"),
            other => panic!("Expected InvalidStateTax, got {:?}", other),
        }
    }

    #[test]
    fn test_state_tax_config_serializes_method_tag() {
        let config = StateTaxConfig {
            name: Some("Texas".to_string()),
            method: StateTaxMethod::None,
            personal_exemption: None,
            dependent_exemption: None,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"method\":\"none\""));
        assert!(json.contains("\"name\":\"Texas\""));
    }
}
