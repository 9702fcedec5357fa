//! API handlers

pub mod auth;
pub mod dsa_partners;
pub mod emi;
pub mod health;
pub mod loan_applications;

use uuid::Uuid;

use crate::error::ApiError;

/// Ids that do not parse cannot exist, so they are reported as not found
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("{} not found", entity)))
}
