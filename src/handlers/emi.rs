//! EMI calculator handler

use axum::extract::{rejection::QueryRejection, Query};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::services::emi::{
    calculate_emi, format_compact_inr, format_inr, EmiBreakdown, DEFAULT_ANNUAL_RATE,
    DEFAULT_PRINCIPAL, DEFAULT_TENURE_YEARS,
};

/// Query parameters; absent values fall back to the calculator defaults
#[derive(Debug, Default, Deserialize)]
pub struct EmiQuery {
    pub principal: Option<f64>,
    pub rate: Option<f64>,
    pub tenure: Option<u32>,
}

/// Rounded strings for display
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiDisplay {
    pub principal: String,
    pub monthly_emi: String,
    pub total_interest: String,
    pub total_amount: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiResponse {
    pub principal: f64,
    pub annual_rate: f64,
    pub tenure_years: u32,
    #[serde(flatten)]
    pub breakdown: EmiBreakdown,
    pub display: EmiDisplay,
}

/// GET /api/emi
pub async fn calculate(
    query: Result<Query<EmiQuery>, QueryRejection>,
) -> ApiResult<Json<EmiResponse>> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let principal = query.principal.unwrap_or(DEFAULT_PRINCIPAL);
    let annual_rate = query.rate.unwrap_or(DEFAULT_ANNUAL_RATE);
    let tenure_years = query.tenure.unwrap_or(DEFAULT_TENURE_YEARS);

    let breakdown = calculate_emi(principal, annual_rate, tenure_years)?;

    Ok(Json(EmiResponse {
        principal,
        annual_rate,
        tenure_years,
        display: EmiDisplay {
            principal: format_compact_inr(principal),
            monthly_emi: format_inr(breakdown.monthly_emi),
            total_interest: format_inr(breakdown.total_interest),
            total_amount: format_inr(breakdown.total_amount),
        },
        breakdown,
    }))
}
