//! Middleware for the API
//!
//! Request tracing, security headers and principal extraction.

pub mod auth;
mod security;
mod tracing;

pub use auth::{AdminPrincipal, AuthenticatedPrincipal};
pub use security::security_headers;
pub use self::tracing::request_tracing;
