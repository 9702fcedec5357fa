//! Authentication module
//!
//! Credential login for admins and DSA partners:
//! - bcrypt password hashing and verification
//! - signed, time-bounded tokens carrying a role-tagged principal

mod jwt;
mod password;
mod service;

pub use jwt::{issue_token, verify_token, Claims, JwtError};
pub use password::{hash_password, verify_password, MAX_PASSWORD_LENGTH, MIN_PARTNER_PASSWORD_LENGTH};
pub use service::{AuthError, AuthService};
