//! HTTP API for the benefit engine.
//!
//! Exposes projections, affordability checks, billing runs and state tax
//! lookups over JSON.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AffordabilityRequest, BillingRequest, CompanyRequest, EmployeeRequest, ProjectionRequest,
};
pub use response::{AffordabilityResponse, ApiError, BillingResponse, StateTaxResponse};
pub use state::AppState;
