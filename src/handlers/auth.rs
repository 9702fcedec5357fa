//! Login, admin bootstrap and identity handlers

use axum::{extract::State, Json};

use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::middleware::AuthenticatedPrincipal;
use crate::models::{
    CurrentAccount, LoginRequest, LoginResponse, Role, SetupAdminRequest, SetupAdminResponse,
};
use crate::state::AppState;

/// POST /api/admin/login
pub async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = state
        .auth_service
        .login(Role::Admin, &request.identifier, &request.password)
        .await?;
    Ok(Json(response))
}

/// POST /api/dsa/login
pub async fn dsa_login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = state
        .auth_service
        .login(Role::Dsa, &request.identifier, &request.password)
        .await?;
    Ok(Json(response))
}

/// POST /api/admin/setup - Bootstrap an admin account
pub async fn setup_admin(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SetupAdminRequest>,
) -> ApiResult<Json<SetupAdminResponse>> {
    let user = state
        .auth_service
        .setup_admin(&request.username, &request.password)
        .await?;

    Ok(Json(SetupAdminResponse {
        message: "Admin user created successfully".to_string(),
        user_id: user.id,
    }))
}

/// GET /api/auth/me - Caller's principal plus the account as stored now
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> ApiResult<Json<CurrentAccount>> {
    let account = state.auth_service.current_account(&principal).await?;
    Ok(Json(account))
}
