//! Principal extraction
//!
//! Handlers receive identity as an explicit extractor argument; nothing is
//! kept between requests.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::{AuthError, AuthService, JwtError};
use crate::models::{Principal, Role};

/// Rejection body for token problems
#[derive(Debug, Serialize)]
struct TokenRejection {
    #[serde(skip)]
    status: StatusCode,
    error: TokenRejectionDetails,
}

#[derive(Debug, Serialize)]
struct TokenRejectionDetails {
    code: &'static str,
    message: &'static str,
}

impl TokenRejection {
    fn new(status: StatusCode, code: &'static str, message: &'static str) -> Self {
        Self {
            status,
            error: TokenRejectionDetails { code, message },
        }
    }

    fn unauthorized(code: &'static str, message: &'static str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, code, message)
    }
}

impl IntoResponse for TokenRejection {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Any principal holding a valid token
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedPrincipal
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    TokenRejection::unauthorized(
                        "MISSING_TOKEN",
                        "Authorization header with Bearer token required",
                    )
                    .into_response()
                })?;

        let auth_service = Arc::<AuthService>::from_ref(state);

        let principal = auth_service.authenticate(bearer.token()).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            let rejection = match e {
                AuthError::Token(JwtError::TokenExpired) => {
                    TokenRejection::unauthorized("TOKEN_EXPIRED", "Token has expired")
                }
                _ => TokenRejection::unauthorized("INVALID_TOKEN", "Invalid token"),
            };
            rejection.into_response()
        })?;

        Ok(AuthenticatedPrincipal(principal))
    }
}

/// Principal with the admin role
#[derive(Debug, Clone)]
pub struct AdminPrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for AdminPrincipal
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedPrincipal(principal) =
            AuthenticatedPrincipal::from_request_parts(parts, state).await?;

        if principal.role != Role::Admin {
            return Err(TokenRejection::new(
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Admin access required",
            )
            .into_response());
        }

        Ok(AdminPrincipal(principal))
    }
}
