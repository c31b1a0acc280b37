//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine settings
//! and the state tax table from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineSettings, StateTaxFile, StateTaxTable};

const EMBEDDED_ENGINE_YAML: &str = include_str!("../../config/engine.yaml");
const EMBEDDED_STATE_TAXES_YAML: &str = include_str!("../../config/state_taxes.yaml");

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── engine.yaml       # Host defaults (safety caps)
/// └── state_taxes.yaml  # Per-state tax schedules
/// ```
///
/// The same files are compiled into the crate and available through
/// [`ConfigLoader::embedded`].
///
/// # Example
///
/// ```no_run
/// use benefit_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Tax year: {}", loader.state_taxes().tax_year());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: EngineSettings,
    state_taxes: StateTaxTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, is not valid YAML, or if the
    /// state tax table violates its invariants.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let settings = parse_yaml::<EngineSettings>(
            &read_file(&engine_path)?,
            &engine_path.display().to_string(),
        )?;

        let taxes_path = path.join("state_taxes.yaml");
        let file = parse_yaml::<StateTaxFile>(
            &read_file(&taxes_path)?,
            &taxes_path.display().to_string(),
        )?;
        let state_taxes = StateTaxTable::from_file(file)?;

        info!(
            path = %path.display(),
            tax_year = state_taxes.tax_year(),
            states = state_taxes.states().len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            settings,
            state_taxes,
        })
    }

    /// Builds configuration from the YAML files compiled into the crate.
    ///
    /// # Example
    ///
    /// ```
    /// use benefit_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::embedded().unwrap();
    /// assert!(loader.state_taxes().get("CA").is_some());
    /// ```
    pub fn embedded() -> EngineResult<Self> {
        let settings = parse_yaml::<EngineSettings>(EMBEDDED_ENGINE_YAML, "<embedded>/engine.yaml")?;
        let file = parse_yaml::<StateTaxFile>(
            EMBEDDED_STATE_TAXES_YAML,
            "<embedded>/state_taxes.yaml",
        )?;
        let state_taxes = StateTaxTable::from_file(file)?;

        Ok(Self {
            settings,
            state_taxes,
        })
    }

    /// Returns the host defaults.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the state tax table.
    pub fn state_taxes(&self) -> &StateTaxTable {
        &self.state_taxes
    }
}

fn read_file(path: &Path) -> EngineResult<String> {
    fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path.display().to_string(),
    })
}

fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, path: &str) -> EngineResult<T> {
    serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
        path: path.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StateTaxMethod;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config_dir() -> &'static Path {
        Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/config"))
    }

    #[test]
    fn test_load_config_directory() {
        let loader = ConfigLoader::load(config_dir()).unwrap();
        assert_eq!(loader.settings().default_safety_cap_pct, dec("50"));
        assert_eq!(loader.settings().billing_safety_cap_pct, dec("30"));
        assert_eq!(loader.state_taxes().tax_year(), 2025);
    }

    #[test]
    fn test_embedded_matches_directory() {
        let embedded = ConfigLoader::embedded().unwrap();
        let loaded = ConfigLoader::load(config_dir()).unwrap();
        assert_eq!(embedded.settings(), loaded.settings());
        assert_eq!(embedded.state_taxes(), loaded.state_taxes());
    }

    #[test]
    fn test_embedded_table_covers_all_states_and_dc() {
        let loader = ConfigLoader::embedded().unwrap();
        assert_eq!(loader.state_taxes().states().len(), 51);
        assert!(loader.state_taxes().get("DC").is_some());
    }

    #[test]
    fn test_no_tax_states() {
        let loader = ConfigLoader::embedded().unwrap();
        for code in ["AK", "FL", "NV", "NH", "SD", "TN", "TX", "WA", "WY"] {
            let config = loader.state_taxes().get(code).unwrap();
            assert_eq!(config.method, StateTaxMethod::None, "{code}");
        }
    }

    #[test]
    fn test_illinois_flat_rate_and_inert_exemption() {
        let loader = ConfigLoader::embedded().unwrap();
        let illinois = loader.state_taxes().get("IL").unwrap();
        assert_eq!(
            illinois.method,
            StateTaxMethod::Flat {
                rate: dec("0.0495"),
                standard_deduction: Decimal::ZERO,
            }
        );
        assert_eq!(illinois.personal_exemption, Some(dec("2850")));
    }

    #[test]
    fn test_missing_directory_returns_not_found() {
        let result = ConfigLoader::load("/nonexistent/benefit-engine-config");
        match result.unwrap_err() {
            EngineError::ConfigNotFound { path } => assert!(path.ends_with("engine.yaml")),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_reports_path() {
        let result = parse_yaml::<EngineSettings>("default_safety_cap_pct: [", "bad.yaml");
        match result.unwrap_err() {
            EngineError::ConfigParseError { path, .. } => assert_eq!(path, "bad.yaml"),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
