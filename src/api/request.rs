//! Request types for the benefit engine API.
//!
//! Codes arrive as free-form strings from upstream data entry. They are parsed
//! leniently here: anything unrecognized falls back to its documented default
//! and is reported as a warning instead of rejecting the request.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{max_amount, max_tax_rate};
use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CompanyProfile, EnrolledEmployee, FeeModel, FilingStatus, PayPeriod, PricingTier,
    ProjectionWarning, ProposalInput, WarningCode,
};

/// Request body for the `/projections` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// Gross pay per paycheck.
    pub paycheck_gross: Decimal,
    /// Pay period code; defaults to biweekly when missing or unrecognized.
    #[serde(default)]
    pub pay_period: Option<String>,
    /// Filing status code; defaults to single when missing or unrecognized.
    #[serde(default)]
    pub filing_status: Option<String>,
    /// Number of dependents claimed.
    #[serde(default)]
    pub dependents: i32,
    /// Two-letter state code.
    pub state: String,
    /// Fee model descriptor (for example `"5/3"` or `"8"`).
    #[serde(default)]
    pub fee_model: String,
    /// Pricing tier code; defaults to the 2025 tier when missing or unrecognized.
    #[serde(default)]
    pub pricing_tier: Option<String>,
    /// Safety cap in percent of gross; the configured default is used when absent.
    #[serde(default)]
    pub safety_cap_pct: Option<Decimal>,
    /// Flat state tax rate as a fraction, used instead of the state table.
    #[serde(default)]
    pub state_tax_rate_override: Option<Decimal>,
}

impl ProjectionRequest {
    /// Resolves the request into engine input, collecting a warning for each
    /// code that had to fall back to its default.
    ///
    /// Fails when an explicit safety cap lies outside 0 to 100 percent, or an
    /// amount or override rate lies outside the range the engine computes with.
    pub fn into_input(
        self,
        settings: &EngineSettings,
    ) -> EngineResult<(ProposalInput, Vec<ProjectionWarning>)> {
        let safety_cap_pct = cap_or_default(self.safety_cap_pct, settings.default_safety_cap_pct)?;
        let paycheck_gross = check_amount("paycheck_gross", self.paycheck_gross)?;
        let state_tax_rate_override = check_override_rate(self.state_tax_rate_override)?;
        let mut warnings = Vec::new();

        let input = ProposalInput {
            paycheck_gross,
            pay_period: resolve_code(
                self.pay_period.as_deref(),
                WarningCode::UnknownPayPeriod,
                &mut warnings,
            ),
            filing_status: resolve_code(
                self.filing_status.as_deref(),
                WarningCode::UnknownFilingStatus,
                &mut warnings,
            ),
            dependents: self.dependents,
            state: self.state,
            fee_model: FeeModel::parse(&self.fee_model),
            tier: resolve_code(
                self.pricing_tier.as_deref(),
                WarningCode::UnknownPricingTier,
                &mut warnings,
            ),
            safety_cap_pct,
            state_tax_rate_override,
        };

        Ok((input, warnings))
    }
}

/// Returns the requested safety cap, or the configured default when absent.
pub fn cap_or_default(requested: Option<Decimal>, default: Decimal) -> EngineResult<Decimal> {
    let Some(pct) = requested else {
        return Ok(default);
    };

    if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
        return Err(EngineError::InvalidInput {
            field: "safety_cap_pct".to_string(),
            message: format!("must be between 0 and 100, got {}", pct),
        });
    }

    Ok(pct)
}

/// Rejects amounts larger in magnitude than the engine's amount ceiling.
pub fn check_amount(field: &str, amount: Decimal) -> EngineResult<Decimal> {
    if amount.abs() > max_amount() {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not exceed {} in magnitude, got {}", max_amount(), amount),
        });
    }
    Ok(amount)
}

/// Rejects an override rate outside `0..=1`.
pub fn check_override_rate(rate: Option<Decimal>) -> EngineResult<Option<Decimal>> {
    match rate {
        Some(rate) if rate < Decimal::ZERO || rate > max_tax_rate() => {
            Err(EngineError::InvalidInput {
                field: "state_tax_rate_override".to_string(),
                message: format!("must be a fraction between 0 and 1, got {}", rate),
            })
        }
        _ => Ok(rate),
    }
}

/// Parses an optional code, falling back to the type's default.
///
/// A missing code falls back silently; a present but unrecognized code also
/// records a warning.
pub fn resolve_code<T>(
    code: Option<&str>,
    warning: WarningCode,
    warnings: &mut Vec<ProjectionWarning>,
) -> T
where
    T: FromStr + Default + std::fmt::Display,
{
    let Some(code) = code else {
        return T::default();
    };

    code.parse().unwrap_or_else(|_| {
        let fallback = T::default();
        warnings.push(ProjectionWarning::new(
            warning,
            format!("Unrecognized code '{}'; using '{}'", code, fallback),
        ));
        fallback
    })
}

/// Request body for the `/affordability` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityRequest {
    /// Target benefit per month.
    pub target_monthly: Decimal,
    /// Gross pay per paycheck.
    pub gross_per_pay: Decimal,
    /// Pay period code; defaults to biweekly when missing or unrecognized.
    #[serde(default)]
    pub pay_period: Option<String>,
    /// Safety cap in percent of gross; the configured default is used when absent.
    #[serde(default)]
    pub safety_cap_pct: Option<Decimal>,
}

impl AffordabilityRequest {
    /// Resolves the pay period and safety cap, and checks both amounts.
    pub fn resolve(
        &self,
        settings: &EngineSettings,
    ) -> EngineResult<(PayPeriod, Decimal, Vec<ProjectionWarning>)> {
        let safety_cap_pct = cap_or_default(self.safety_cap_pct, settings.default_safety_cap_pct)?;
        check_amount("target_monthly", self.target_monthly)?;
        check_amount("gross_per_pay", self.gross_per_pay)?;
        let mut warnings = Vec::new();
        let pay_period = resolve_code(
            self.pay_period.as_deref(),
            WarningCode::UnknownPayPeriod,
            &mut warnings,
        );
        Ok((pay_period, safety_cap_pct, warnings))
    }
}

/// Company attributes in a billing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRequest {
    /// Pricing tier code; defaults to the 2025 tier when missing or unrecognized.
    #[serde(default)]
    pub pricing_tier: Option<String>,
    /// Fee model descriptor.
    #[serde(default)]
    pub fee_model: String,
    /// Safety cap in percent of gross; the configured billing default is used when absent.
    #[serde(default)]
    pub safety_cap_pct: Option<Decimal>,
    /// Flat state tax rate as a fraction, applied to every employee.
    #[serde(default)]
    pub state_tax_rate_override: Option<Decimal>,
}

/// An enrolled employee in a billing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Gross pay per paycheck.
    pub gross_per_pay: Decimal,
    /// Pay period code; defaults to biweekly when missing or unrecognized.
    #[serde(default)]
    pub pay_period: Option<String>,
    /// Filing status code; defaults to single when missing or unrecognized.
    #[serde(default)]
    pub filing_status: Option<String>,
    /// Number of dependents claimed.
    #[serde(default)]
    pub dependents: i32,
    /// Two-letter state code.
    pub state: String,
}

/// Request body for the `/billing` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingRequest {
    /// The company being billed.
    pub company: CompanyRequest,
    /// The enrolled employees.
    #[serde(default)]
    pub employees: Vec<EmployeeRequest>,
}

impl BillingRequest {
    /// Resolves the request into engine types, collecting a warning for each
    /// company-level code that had to fall back.
    ///
    /// Unrecognized employee pay periods and filing statuses fall back
    /// silently to their defaults.
    pub fn into_parts(
        self,
        settings: &EngineSettings,
    ) -> EngineResult<(CompanyProfile, Vec<EnrolledEmployee>, Vec<ProjectionWarning>)> {
        let safety_cap_pct =
            cap_or_default(self.company.safety_cap_pct, settings.billing_safety_cap_pct)?;
        let state_tax_rate_override = check_override_rate(self.company.state_tax_rate_override)?;
        for employee in &self.employees {
            check_amount("gross_per_pay", employee.gross_per_pay)?;
        }
        let mut warnings = Vec::new();

        let company = CompanyProfile {
            tier: resolve_code::<PricingTier>(
                self.company.pricing_tier.as_deref(),
                WarningCode::UnknownPricingTier,
                &mut warnings,
            ),
            fee_model: FeeModel::parse(&self.company.fee_model),
            safety_cap_pct,
            state_tax_rate_override,
        };

        let employees = self
            .employees
            .into_iter()
            .map(|employee| EnrolledEmployee {
                pay_period: employee
                    .pay_period
                    .as_deref()
                    .map(PayPeriod::from_code_or_default)
                    .unwrap_or_default(),
                filing_status: employee
                    .filing_status
                    .as_deref()
                    .map(FilingStatus::from_code_or_default)
                    .unwrap_or_default(),
                id: employee.id,
                gross_per_pay: employee.gross_per_pay,
                dependents: employee.dependents,
                state: employee.state,
            })
            .collect();

        Ok((company, employees, warnings))
    }
}
