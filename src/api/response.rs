//! Response types for the benefit engine API.
//!
//! This module defines the success envelopes that are not plain engine types,
//! and the error body returned for every failed request.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{BillingLine, BillingSummary, StateTaxSource};
use crate::error::EngineError;
use crate::models::{Affordability, ProjectionWarning};

/// Response body for the `/affordability` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityResponse {
    /// The rounded affordability summary.
    #[serde(flatten)]
    pub affordability: Affordability,
    /// Fallbacks taken while resolving the request.
    pub warnings: Vec<ProjectionWarning>,
}

/// Response body for the `/billing` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingResponse {
    /// Identifier of this billing run.
    pub run_id: Uuid,
    /// When the run was computed.
    pub generated_at: DateTime<Utc>,
    /// One line per enrolled employee, in roster order.
    pub lines: Vec<BillingLine>,
    /// Company totals over the lines.
    pub summary: BillingSummary,
    /// Company-level fallbacks taken while resolving the request.
    pub warnings: Vec<ProjectionWarning>,
}

/// Response body for the `/states/{code}/tax` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxResponse {
    /// Normalized two-letter state code.
    pub state: String,
    /// Human-readable state name, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tax year of the loaded table.
    pub tax_year: u16,
    /// Annual wage income the tax was computed on.
    pub income: Decimal,
    /// Annual state income tax, rounded to cents.
    pub annual_tax: Decimal,
    /// Where the amount came from.
    pub source: StateTaxSource,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a state not found error response.
    pub fn state_not_found(code: &str) -> Self {
        Self::with_details(
            "STATE_NOT_FOUND",
            format!("State not found: {}", code),
            format!("The state code '{}' is not in the loaded tax table", code),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidStateTax { state, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid state tax configuration",
                    format!("State '{}': {}", state, message),
                ),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid field '{}': {}", field, message),
                    "The request contains an out-of-range value",
                ),
            },
        }
    }
}
