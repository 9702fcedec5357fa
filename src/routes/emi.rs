//! EMI calculator route

use axum::{routing::get, Router};

use crate::handlers::emi;
use crate::state::AppState;

pub fn emi_routes() -> Router<AppState> {
    Router::new().route("/api/emi", get(emi::calculate))
}
