//! Data models for the brokerage backend

use serde::{Deserialize, Serialize};
use validator::ValidationError;

use crate::auth::MAX_PASSWORD_LENGTH;

pub mod auth;
pub mod dsa_partner;
pub mod loan_application;
pub mod user;

pub use auth::*;
pub use dsa_partner::*;
pub use loan_application::*;
pub use user::*;

/// Review state shared by loan applications and partner KYC
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Default)]
#[sqlx(type_name = "review_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// Body of the status/KYC update endpoints
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ReviewStatus,
}

/// Body of the partner activation endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActiveRequest {
    pub is_active: bool,
}

/// Rejects strings that are empty once trimmed
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Rejects passwords longer than bcrypt reads; the limit is in bytes
pub(crate) fn within_bcrypt_limit(value: &str) -> Result<(), ValidationError> {
    if value.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::new("password_too_long"));
    }
    Ok(())
}

/// Lenient deserializers for form-style payloads
pub(crate) mod de {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Int(i64),
        Float(f64),
        Text(String),
    }

    /// Trimmed string; empty becomes `None`
    pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(value
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    /// Whole number given as a JSON number or a numeric string
    pub fn optional_integer<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrString::Int(n)) => i32::try_from(n)
                .map(Some)
                .map_err(|_| D::Error::custom(format!("integer out of range: {}", n))),
            Some(NumberOrString::Float(f)) if f.fract() == 0.0 && f.abs() <= i32::MAX as f64 => {
                Ok(Some(f as i32))
            }
            Some(NumberOrString::Float(f)) => {
                Err(D::Error::custom(format!("expected a whole number, got {}", f)))
            }
            Some(NumberOrString::Text(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<i32>()
                    .map(Some)
                    .map_err(|_| D::Error::custom(format!("expected a whole number, got {:?}", s)))
            }
        }
    }

    /// Decimal given as a JSON number or a numeric string
    pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrString::Int(n)) => Ok(Some(Decimal::from(n))),
            Some(NumberOrString::Float(f)) => Decimal::try_from(f)
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid amount: {}", f))),
            Some(NumberOrString::Text(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                Decimal::from_str(trimmed)
                    .map(Some)
                    .map_err(|_| D::Error::custom(format!("invalid amount: {:?}", s)))
            }
        }
    }
}
