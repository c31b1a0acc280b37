//! Core data models for the benefit engine.
//!
//! This module contains the domain models used throughout the engine.

mod company;
mod employee;
mod pay_period;
mod projection;

pub use company::{CompanyProfile, FeeModel, FeeRates, PricingTier};
pub use employee::{EnrolledEmployee, FilingStatus};
pub use pay_period::{AmountBasis, PayPeriod};
pub use projection::{
    Affordability, BenefitProjection, PaycheckBreakdown, PeriodAmounts, ProjectionWarning,
    ProposalInput, WarningCode,
};
