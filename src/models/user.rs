//! Admin user models

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use super::{not_blank, within_bcrypt_limit};

/// Role stored for users created through the setup endpoint
pub const ADMIN_ROLE: &str = "admin";

/// Admin user model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Admin view returned on login
#[derive(Debug, Serialize, Clone)]
pub struct AdminProfile {
    pub id: Uuid,
    pub username: String,
    pub role: String,
}

impl From<&User> for AdminProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
        }
    }
}

/// Insert payload for the store (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

/// Body of `POST /api/admin/setup`
#[derive(Debug, Deserialize, Validate)]
pub struct SetupAdminRequest {
    #[serde(default)]
    #[validate(custom = "not_blank")]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1), custom = "within_bcrypt_limit")]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupAdminResponse {
    pub message: String,
    pub user_id: Uuid,
}
