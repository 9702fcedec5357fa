//! EMI (Equated Monthly Installment) calculator
//!
//! Standard reducing-balance amortization. Values are kept unrounded; the
//! formatting helpers below are for display only.

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Calculator Defaults
// ============================================================================

/// Default loan amount shown by the calculator (25 lakh)
pub const DEFAULT_PRINCIPAL: f64 = 2_500_000.0;

/// Default annual interest rate in percent
pub const DEFAULT_ANNUAL_RATE: f64 = 12.0;

/// Default tenure in years
pub const DEFAULT_TENURE_YEARS: u32 = 20;

/// Longest tenure accepted
pub const MAX_TENURE_YEARS: u32 = 50;

const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

#[derive(Error, Debug, PartialEq)]
pub enum EmiError {
    #[error("Principal must be a positive amount")]
    InvalidPrincipal,

    #[error("Interest rate must be zero or a positive percentage")]
    InvalidRate,

    #[error("Tenure must be between 1 and 50 years")]
    InvalidTenure,

    #[error("Installment is too large to compute for these inputs")]
    OutOfRange,
}

/// Result of an EMI calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiBreakdown {
    pub monthly_emi: f64,
    pub total_interest: f64,
    pub total_amount: f64,
    pub months: u32,
}

/// Compute the monthly installment for `principal` borrowed at
/// `annual_rate_percent` over `tenure_years`.
pub fn calculate_emi(
    principal: f64,
    annual_rate_percent: f64,
    tenure_years: u32,
) -> Result<EmiBreakdown, EmiError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(EmiError::InvalidPrincipal);
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(EmiError::InvalidRate);
    }
    if tenure_years == 0 || tenure_years > MAX_TENURE_YEARS {
        return Err(EmiError::InvalidTenure);
    }

    let monthly_rate = annual_rate_percent / 1200.0;
    let months = tenure_years * 12;
    let n = f64::from(months);

    if monthly_rate == 0.0 {
        return Ok(EmiBreakdown {
            monthly_emi: principal / n,
            total_interest: 0.0,
            total_amount: principal,
            months,
        });
    }

    let growth = (1.0 + monthly_rate).powi(months as i32);
    let monthly_emi = principal * monthly_rate * growth / (growth - 1.0);
    let total_amount = monthly_emi * n;
    if !growth.is_finite() || !total_amount.is_finite() {
        return Err(EmiError::OutOfRange);
    }

    Ok(EmiBreakdown {
        monthly_emi,
        total_interest: total_amount - principal,
        total_amount,
        months,
    })
}

/// Format a rupee amount rounded to whole rupees with Indian digit grouping,
/// e.g. `₹25,00,000`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    if digits.len() <= 3 {
        return format!("{}₹{}", sign, digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{}₹{},{}", sign, groups.join(","), tail)
}

/// Compact loan amount label: crore, lakh or thousand.
pub fn format_compact_inr(amount: f64) -> String {
    if amount >= CRORE {
        format!("₹{:.1}Cr", amount / CRORE)
    } else if amount >= LAKH {
        format!("₹{:.0}L", amount / LAKH)
    } else {
        format!("₹{:.0}K", amount / 1_000.0)
    }
}
