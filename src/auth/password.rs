//! Password hashing
//!
//! bcrypt runs on the blocking thread pool so it never stalls the runtime.

use bcrypt::{hash, verify};

use super::AuthError;

/// bcrypt only reads the first 72 bytes
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Minimum length for admin-assigned partner passwords
pub const MIN_PARTNER_PASSWORD_LENGTH: usize = 8;

/// Hash a password with the given bcrypt cost
pub async fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_LENGTH
        )));
    }
    let password = password.to_string();

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
}

/// Check a plaintext password against a stored bcrypt hash
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &password_hash).map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("Task join error: {}", e)))?
}
