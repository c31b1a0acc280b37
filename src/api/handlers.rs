//! HTTP request handlers for the benefit engine API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{affordability, project, resolve_state_tax, round_money, run_billing};
use crate::config::normalize_state_code;
use crate::error::EngineError;

use super::request::{AffordabilityRequest, BillingRequest, ProjectionRequest, check_amount};
use super::response::{
    AffordabilityResponse, ApiError, ApiErrorResponse, BillingResponse, StateTaxResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/projections", post(projection_handler))
        .route("/affordability", post(affordability_handler))
        .route("/billing", post(billing_handler))
        .route("/states/:code/tax", get(state_tax_handler))
        .with_state(state)
}

/// Handler for POST /projections.
async fn projection_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProjectionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing projection request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let (input, mut warnings) = match request.into_input(state.settings()) {
        Ok(resolved) => resolved,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let mut projection = project(&input, state.state_taxes());
    warnings.append(&mut projection.warnings);
    projection.warnings = warnings;

    info!(
        correlation_id = %correlation_id,
        state = %input.state,
        tier = %input.tier,
        is_capped = projection.is_capped,
        benefit_per_pay = %projection.benefit.per_pay,
        warnings = projection.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Projection completed"
    );

    json_response(StatusCode::OK, &projection)
}

/// Handler for POST /affordability.
async fn affordability_handler(
    State(state): State<AppState>,
    payload: Result<Json<AffordabilityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing affordability request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let (pay_period, safety_cap_pct, warnings) = match request.resolve(state.settings()) {
        Ok(resolved) => resolved,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let summary = affordability(
        request.target_monthly,
        request.gross_per_pay,
        pay_period,
        safety_cap_pct,
    )
    .rounded();

    info!(
        correlation_id = %correlation_id,
        is_sufficient = summary.is_sufficient,
        shortfall_per_pay = %summary.shortfall_per_pay,
        "Affordability check completed"
    );

    json_response(
        StatusCode::OK,
        &AffordabilityResponse {
            affordability: summary,
            warnings,
        },
    )
}

/// Handler for POST /billing.
async fn billing_handler(
    State(state): State<AppState>,
    payload: Result<Json<BillingRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing billing request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let (company, employees, warnings) = match request.into_parts(state.settings()) {
        Ok(parts) => parts,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let run = run_billing(&company, &employees, state.state_taxes());

    info!(
        correlation_id = %correlation_id,
        employees = run.summary.employee_count,
        capped = run.summary.capped_count,
        invoice_monthly = %run.summary.total_invoice_monthly,
        duration_us = start_time.elapsed().as_micros(),
        "Billing run completed"
    );

    json_response(
        StatusCode::OK,
        &BillingResponse {
            run_id: correlation_id,
            generated_at: Utc::now(),
            lines: run.lines,
            summary: run.summary,
            warnings,
        },
    )
}

/// Query parameters for the state tax lookup.
#[derive(Debug, Deserialize)]
struct TaxQuery {
    income: Decimal,
}

/// Handler for GET /states/{code}/tax.
async fn state_tax_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    query: Result<Query<TaxQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let code = normalize_state_code(&code);

    let income = match query {
        Ok(Query(query)) => match check_amount("income", query.income) {
            Ok(income) => income,
            Err(err) => return engine_error_response(correlation_id, err),
        },
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid state tax query"
            );
            return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            )));
        }
    };

    let table = state.state_taxes();
    let Some(config) = table.get(&code) else {
        warn!(correlation_id = %correlation_id, state = %code, "State not found");
        return error_response(ApiErrorResponse {
            status: StatusCode::NOT_FOUND,
            error: ApiError::state_not_found(&code),
        });
    };

    let result = resolve_state_tax(income, &code, table, None);

    info!(
        correlation_id = %correlation_id,
        state = %code,
        annual_tax = %result.annual_tax,
        "State tax lookup completed"
    );

    json_response(
        StatusCode::OK,
        &StateTaxResponse {
            name: config.name.clone(),
            state: code,
            tax_year: table.tax_year(),
            income,
            annual_tax: round_money(result.annual_tax),
            source: result.source,
        },
    )
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, &error.error)
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request rejected");
    error_response(err.into())
}

/// Maps a JSON body rejection to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    error_response(ApiErrorResponse::bad_request(error))
}
