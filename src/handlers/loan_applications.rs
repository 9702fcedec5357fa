//! Loan application handlers

use axum::{
    extract::{Path, State},
    Json,
};

use super::parse_id;
use crate::error::{ApiError, ApiResult};
use crate::extract::{JsonBody, ValidatedJson};
use crate::middleware::AdminPrincipal;
use crate::models::{LoanApplication, NewLoanApplication, UpdateStatusRequest};
use crate::state::AppState;

/// POST /api/loan-applications - Public submission
pub async fn create_loan_application(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<NewLoanApplication>,
) -> ApiResult<Json<LoanApplication>> {
    let application = state
        .storage
        .create_loan_application(request.normalized())
        .await?;

    tracing::info!(
        application_id = %application.id,
        loan_type = %application.loan_type,
        "Loan application received"
    );
    Ok(Json(application))
}

/// GET /api/loan-applications - Newest first
pub async fn list_loan_applications(
    State(state): State<AppState>,
    _admin: AdminPrincipal,
) -> ApiResult<Json<Vec<LoanApplication>>> {
    Ok(Json(state.storage.list_loan_applications().await?))
}

/// GET /api/loan-applications/:type
pub async fn list_loan_applications_by_type(
    State(state): State<AppState>,
    _admin: AdminPrincipal,
    Path(loan_type): Path<String>,
) -> ApiResult<Json<Vec<LoanApplication>>> {
    Ok(Json(
        state
            .storage
            .list_loan_applications_by_type(loan_type.trim())
            .await?,
    ))
}

/// PATCH /api/loan-applications/:id/status
pub async fn update_loan_application_status(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateStatusRequest>,
) -> ApiResult<Json<LoanApplication>> {
    let id = parse_id(&id, "Loan application")?;
    let updated = state
        .storage
        .update_loan_application_status(id, request.status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Loan application not found".to_string()))?;

    tracing::info!(
        application_id = %updated.id,
        status = updated.status.as_str(),
        admin = %admin.identifier,
        "Loan application status updated"
    );
    Ok(Json(updated))
}
