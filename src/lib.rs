//! Pre-tax benefit engine for Section 125 plans.
//!
//! This crate projects what happens to an employee's paycheck when part of their
//! gross pay is redirected into a pre-tax benefit allotment. It covers:
//!
//! - the tier benefit tables and fee model resolution a company is priced with,
//! - the safety cap that limits the deduction to a share of gross pay,
//! - federal, FICA and state income tax before and after the deduction,
//! - recurring billing runs over a company's enrolled employees.
//!
//! The calculations are pure and never fail: unknown codes and out-of-range
//! inputs degrade to documented defaults and are reported as warnings. The
//! [`api`] module exposes the engine over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
