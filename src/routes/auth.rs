//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::auth;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/login", post(auth::admin_login))
        .route("/api/admin/setup", post(auth::setup_admin))
        .route("/api/dsa/login", post(auth::dsa_login))
        .route("/api/auth/me", get(auth::me))
}
