//! DSA (Direct Selling Agent) partner models

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use super::{de, not_blank, within_bcrypt_limit, ReviewStatus};

/// Registered DSA partner
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DsaPartner {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    /// Experience band, e.g. "1-3"
    pub experience: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
    pub documents: Option<serde_json::Value>,
    pub kyc_status: ReviewStatus,
    pub is_active: bool,
    /// bcrypt hash; unset until an admin assigns a login password
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partner view returned on login
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PartnerProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub kyc_status: ReviewStatus,
}

impl From<&DsaPartner> for PartnerProfile {
    fn from(partner: &DsaPartner) -> Self {
        Self {
            id: partner.id,
            name: partner.name.clone(),
            email: partner.email.clone(),
            kyc_status: partner.kyc_status,
        }
    }
}

/// Public registration payload. Passwords are never accepted here.
#[derive(Debug, Deserialize, Validate, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewDsaPartner {
    #[validate(custom = "not_blank")]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom = "not_blank")]
    pub mobile: String,

    #[serde(default, deserialize_with = "de::optional_string")]
    pub experience: Option<String>,

    #[serde(default, deserialize_with = "de::optional_string")]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "de::optional_string")]
    pub profile_picture: Option<String>,

    #[serde(default)]
    pub documents: Option<serde_json::Value>,
}

impl NewDsaPartner {
    /// Trim fields and lowercase the email so uniqueness is case-insensitive
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = normalize_email(&self.email);
        self.mobile = self.mobile.trim().to_string();
        self
    }
}

/// Canonical form used for storing and looking up partner emails
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Admin-assigned partner login password
#[derive(Debug, Deserialize, Validate)]
pub struct SetPasswordRequest {
    #[validate(length(min = 8), custom = "within_bcrypt_limit")]
    pub password: String,
}
