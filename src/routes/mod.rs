//! Route definitions for the loan brokerage API

mod auth;
mod dsa_partners;
mod emi;
mod loan_applications;

use axum::{middleware, routing::get, Router};

use crate::handlers::health;
use crate::state::AppState;

pub use auth::auth_routes;
pub use dsa_partners::dsa_partner_routes;
pub use emi::emi_routes;
pub use loan_applications::loan_application_routes;

/// Full application router with tracing and security headers.
///
/// CORS is left to the caller since it depends on deployment config.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .merge(loan_application_routes())
        .merge(dsa_partner_routes())
        .merge(auth_routes())
        .merge(emi_routes())
        .with_state(state)
        .layer(middleware::from_fn(crate::middleware::security_headers))
        .layer(middleware::from_fn(crate::middleware::request_tracing))
}
