//! Calculation logic for the benefit engine.
//!
//! This module contains the pure calculation functions: pay frequency
//! conversion, target benefit lookup by pricing tier, fee rate resolution, the
//! safety cap on deductions, state income tax, the proposal projection that
//! combines them, and recurring billing runs over a company's roster.

mod billing;
mod fee_model;
mod limits;
mod pay_frequency;
mod proposal;
mod rounding;
mod safety_cap;
mod state_tax;
mod tier_benefit;

pub use billing::{
    BillingLine, BillingRun, BillingSummary, billing_line, run_billing, summarize_billing,
};
pub use fee_model::{aggregate_split, fee_amount, is_fee_fallback, resolve_fee_rates};
pub use limits::{
    clamp_amount, clamp_fee_pct, clamp_tax_rate, max_amount, max_fee_pct, max_tax_rate,
};
pub use pay_frequency::{from_per_pay, scale_per_pay, to_per_pay};
pub use proposal::{
    federal_withholding_rate, fica_rate, medicare_rate, project, social_security_rate,
};
pub use rounding::round_money;
pub use safety_cap::{affordability, safe_deduction};
pub use state_tax::{
    StateTaxResult, StateTaxSource, annual_state_tax, annual_tax_for_method, bracket_tax,
    flat_tax, resolve_state_tax,
};
pub use tier_benefit::{BenefitSchedule, benefit_schedule, target_monthly_benefit};
