//! DSA partner handlers

use axum::{
    extract::{Path, State},
    Json,
};

use super::parse_id;
use crate::error::{ApiError, ApiResult};
use crate::extract::{JsonBody, ValidatedJson};
use crate::middleware::AdminPrincipal;
use crate::models::{
    DsaPartner, NewDsaPartner, SetPasswordRequest, UpdateActiveRequest, UpdateStatusRequest,
};
use crate::state::AppState;

fn partner_not_found() -> ApiError {
    ApiError::NotFound("Partner not found".to_string())
}

/// POST /api/dsa-partners - Public registration
pub async fn register_partner(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<NewDsaPartner>,
) -> ApiResult<Json<DsaPartner>> {
    let partner = state.storage.create_partner(request.normalized()).await?;

    tracing::info!(partner_id = %partner.id, "DSA partner registered");
    Ok(Json(partner))
}

/// GET /api/dsa-partners - Newest first
pub async fn list_partners(
    State(state): State<AppState>,
    _admin: AdminPrincipal,
) -> ApiResult<Json<Vec<DsaPartner>>> {
    Ok(Json(state.storage.list_partners().await?))
}

/// PATCH /api/dsa-partners/:id/kyc
pub async fn update_partner_kyc(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateStatusRequest>,
) -> ApiResult<Json<DsaPartner>> {
    let id = parse_id(&id, "Partner")?;
    let updated = state
        .storage
        .update_partner_kyc(id, request.status)
        .await?
        .ok_or_else(partner_not_found)?;

    tracing::info!(
        partner_id = %updated.id,
        kyc_status = updated.kyc_status.as_str(),
        admin = %admin.identifier,
        "Partner KYC updated"
    );
    Ok(Json(updated))
}

/// PATCH /api/dsa-partners/:id/status
pub async fn update_partner_status(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateActiveRequest>,
) -> ApiResult<Json<DsaPartner>> {
    let id = parse_id(&id, "Partner")?;
    let updated = state
        .storage
        .update_partner_active(id, request.is_active)
        .await?
        .ok_or_else(partner_not_found)?;

    tracing::info!(
        partner_id = %updated.id,
        is_active = updated.is_active,
        admin = %admin.identifier,
        "Partner activation changed"
    );
    Ok(Json(updated))
}

/// PUT /api/dsa-partners/:id/password - Assign the partner's login password
pub async fn set_partner_password(
    State(state): State<AppState>,
    _admin: AdminPrincipal,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<SetPasswordRequest>,
) -> ApiResult<Json<DsaPartner>> {
    let id = parse_id(&id, "Partner")?;
    let partner = state
        .auth_service
        .set_partner_password(id, &request.password)
        .await?;
    Ok(Json(partner))
}
