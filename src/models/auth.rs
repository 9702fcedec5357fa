//! Authentication models

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{not_blank, AdminProfile, PartnerProfile};

/// Kind of account behind a token
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Dsa,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Dsa => "dsa",
        }
    }
}

/// Authenticated identity carried by a token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
    /// Username for admins, email for partners
    pub identifier: String,
}

/// Login body shared by both flows
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, alias = "username", alias = "email")]
    #[validate(custom = "not_blank")]
    pub identifier: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

/// Account details returned alongside the token
#[derive(Debug, Serialize, Clone)]
#[serde(untagged)]
pub enum Profile {
    Admin(AdminProfile),
    Partner(PartnerProfile),
}

/// Body of `GET /api/auth/me`
#[derive(Debug, Serialize)]
pub struct CurrentAccount {
    #[serde(flatten)]
    pub principal: Principal,
    pub profile: Profile,
}

/// Successful login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub profile: Profile,
}
