//! Loan application routes

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::loan_applications;
use crate::state::AppState;

pub fn loan_application_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/loan-applications",
            post(loan_applications::create_loan_application)
                .get(loan_applications::list_loan_applications),
        )
        // The router needs one parameter name per segment; here it is the loan type
        .route(
            "/api/loan-applications/:id",
            get(loan_applications::list_loan_applications_by_type),
        )
        .route(
            "/api/loan-applications/:id/status",
            patch(loan_applications::update_loan_application_status),
        )
}
