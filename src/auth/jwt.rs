//! Token issuance and verification
//!
//! Both functions take the current time as an argument so token lifetime
//! is decided by the caller's clock, not read from ambient state.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Principal, Role};

/// JWT-related errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Token decoding failed: {0}")]
    DecodingFailed(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Token claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    pub role: Role,
    /// Username or email the principal logged in with
    pub identifier: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Sign a token for `principal`, valid for `ttl_seconds` from `now`
pub fn issue_token(
    principal: &Principal,
    secret: &str,
    ttl_seconds: i64,
    now: DateTime<Utc>,
) -> Result<String, JwtError> {
    let exp = now + Duration::seconds(ttl_seconds);

    let claims = Claims {
        sub: principal.id.to_string(),
        role: principal.role,
        identifier: principal.identifier.clone(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::EncodingFailed(e.to_string()))
}

/// Check signature and expiry of `token` as of `now`
pub fn verify_token(token: &str, secret: &str, now: DateTime<Utc>) -> Result<Principal, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below against the supplied clock
    validation.validate_exp = false;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| JwtError::DecodingFailed(e.to_string()))?;

    let claims = token_data.claims;
    if claims.exp <= now.timestamp() {
        return Err(JwtError::TokenExpired);
    }

    let id = Uuid::parse_str(&claims.sub).map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(Principal {
        id,
        role: claims.role,
        identifier: claims.identifier,
    })
}
