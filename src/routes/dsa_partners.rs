//! DSA partner routes

use axum::{
    routing::{patch, post, put},
    Router,
};

use crate::handlers::dsa_partners;
use crate::state::AppState;

pub fn dsa_partner_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/dsa-partners",
            post(dsa_partners::register_partner).get(dsa_partners::list_partners),
        )
        .route(
            "/api/dsa-partners/:id/kyc",
            patch(dsa_partners::update_partner_kyc),
        )
        .route(
            "/api/dsa-partners/:id/status",
            patch(dsa_partners::update_partner_status),
        )
        .route(
            "/api/dsa-partners/:id/password",
            put(dsa_partners::set_partner_password),
        )
}
