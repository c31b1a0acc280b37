//! Error types for the benefit engine.
//!
//! The calculation functions themselves never fail: every configuration gap or
//! malformed input is replaced by a documented fallback. Errors only arise at the
//! host boundary, when configuration files are loaded or requests are validated.

use thiserror::Error;

/// The main error type for the benefit engine.
///
/// # Example
///
/// ```
/// use benefit_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/state_taxes.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/state_taxes.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A state tax entry violates the table invariants.
    #[error("Invalid tax configuration for state '{state}': {message}")]
    InvalidStateTax {
        /// The two-letter state code.
        state: String,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// A request field failed validation at the host boundary.
    #[error("Invalid field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
