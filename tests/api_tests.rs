//! End-to-end tests over the full router backed by in-memory storage

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use loanbroker_server::auth::{issue_token, AuthService};
use loanbroker_server::models::{Principal, Role};
use loanbroker_server::routes::build_router;
use loanbroker_server::state::AppState;
use loanbroker_server::storage::MemoryStorage;

const SECRET: &str = "integration-test-secret";

fn test_app() -> Router {
    let storage = Arc::new(MemoryStorage::new());
    let auth_service = Arc::new(AuthService::new(storage.clone(), SECRET.to_string(), 24, 4));
    build_router(AppState::new(storage, auth_service))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn admin_token(app: &Router) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/api/admin/setup",
        None,
        Some(json!({"username": "admin", "password": "admin-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        "POST",
        "/api/admin/login",
        None,
        Some(json!({"username": "admin", "password": "admin-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn submit_application(app: &Router, name: &str, loan_type: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/loan-applications",
        None,
        Some(json!({
            "name": name,
            "mobile": "9876543210",
            "email": "Applicant@Example.com",
            "city": "Pune",
            "pinCode": "411001",
            "loanType": loan_type,
            "loanAmount": "2500000",
            "monthlySalary": 85000,
            "employmentType": "salaried",
            "preferredTenure": "20",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body
}

async fn register_partner(app: &Router, email: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/dsa-partners",
        None,
        Some(json!({
            "name": "Asha Agencies",
            "email": email,
            "mobile": "9123456780",
            "experience": "3-5",
        })),
    )
    .await
}

#[tokio::test]
async fn test_submit_loan_application() {
    let app = test_app();
    let body = submit_application(&app, "Ravi Kumar", "home").await;

    assert_eq!(body["name"], "Ravi Kumar");
    assert_eq!(body["loanType"], "home");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["preferredTenure"], 20);
    assert_eq!(body["email"], "applicant@example.com");
    assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_invalid_loan_application_rejected() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/loan-applications",
        None,
        Some(json!({"name": "  ", "mobile": "9876543210", "city": "Pune", "loanType": "home"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        "POST",
        "/api/loan-applications",
        None,
        Some(json!({"mobile": "9876543210", "city": "Pune", "loanType": "home"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/loan-applications",
        None,
        Some(json!({
            "name": "A",
            "mobile": "1",
            "city": "Pune",
            "loanType": "home",
            "preferredTenure": 45,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_loan_application_without_type_rejected() {
    let app = test_app();
    let token = admin_token(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/loan-applications",
        None,
        Some(json!({"name": "Ravi", "mobile": "98200", "city": "Mumbai"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("loanType"));

    let (_, body) = send(&app, "GET", "/api/loan-applications", Some(&token), None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_listing_requires_token() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/api/loan-applications", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "MISSING_TOKEN");

    let (status, body) = send(&app, "GET", "/api/dsa-partners", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = test_app();
    let principal = Principal {
        id: Uuid::new_v4(),
        role: Role::Admin,
        identifier: "admin".to_string(),
    };
    let token = issue_token(&principal, SECRET, 3600, Utc::now() - Duration::hours(2)).unwrap();

    let (status, body) = send(&app, "GET", "/api/loan-applications", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_partner_token_cannot_use_admin_routes() {
    let app = test_app();
    let principal = Principal {
        id: Uuid::new_v4(),
        role: Role::Dsa,
        identifier: "agent@agency.in".to_string(),
    };
    let token = issue_token(&principal, SECRET, 3600, Utc::now()).unwrap();

    let (status, body) = send(&app, "GET", "/api/loan-applications", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    // Signed correctly, but no such partner is stored
    let (status, _) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_newest_first_and_filter_by_type() {
    let app = test_app();
    let token = admin_token(&app).await;

    submit_application(&app, "first", "home").await;
    submit_application(&app, "second", "car").await;
    submit_application(&app, "third", "home").await;

    let (status, body) = send(&app, "GET", "/api/loan-applications", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["third", "second", "first"]);

    let (status, body) = send(&app, "GET", "/api/loan-applications/home", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["third", "first"]);

    let (_, body) = send(&app, "GET", "/api/loan-applications/gold", Some(&token), None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_update_application_status() {
    let app = test_app();
    let token = admin_token(&app).await;
    let created = submit_application(&app, "Ravi", "home").await;
    let uri = format!("/api/loan-applications/{}/status", created["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(&token),
        Some(json!({"status": "approved"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");

    let (status, _) = send(
        &app,
        "PATCH",
        &uri,
        Some(&token),
        Some(json!({"status": "archived"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_application_is_not_found() {
    let app = test_app();
    let token = admin_token(&app).await;

    let uri = format!("/api/loan-applications/{}/status", Uuid::new_v4());
    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(&token),
        Some(json!({"status": "rejected"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/dsa-partners/not-a-uuid/kyc",
        Some(&token),
        Some(json!({"status": "approved"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_partner_email_rejected() {
    let app = test_app();

    let (status, body) = register_partner(&app, "agent@agency.in").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kycStatus"], "pending");
    assert_eq!(body["isActive"], true);
    assert!(body.get("passwordHash").is_none());

    let (status, body) = register_partner(&app, "Agent@Agency.in").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_inactive_partner_cannot_login_until_reactivated() {
    let app = test_app();
    let token = admin_token(&app).await;

    let (_, partner) = register_partner(&app, "agent@agency.in").await;
    let id = partner["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/dsa-partners/{}/password", id),
        Some(&token),
        Some(json!({"password": "partner-pass"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let login = json!({"email": "agent@agency.in", "password": "partner-pass"});
    let (status, body) = send(&app, "POST", "/api/dsa/login", None, Some(login.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["email"], "agent@agency.in");
    let partner_token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&partner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "dsa");
    assert_eq!(body["identifier"], "agent@agency.in");
    assert_eq!(body["profile"]["kycStatus"], "pending");

    let status_uri = format!("/api/dsa-partners/{}/status", id);
    let (status, body) = send(
        &app,
        "PATCH",
        &status_uri,
        Some(&token),
        Some(json!({"isActive": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], false);

    let (status, body) = send(&app, "POST", "/api/dsa/login", None, Some(login.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    // The token issued before deactivation no longer resolves to an account
    let (status, _) = send(&app, "GET", "/api/auth/me", Some(&partner_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    send(
        &app,
        "PATCH",
        &status_uri,
        Some(&token),
        Some(json!({"isActive": true})),
    )
    .await;

    let (status, body) = send(&app, "POST", "/api/dsa/login", None, Some(login)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn test_partner_kyc_update() {
    let app = test_app();
    let token = admin_token(&app).await;
    let (_, partner) = register_partner(&app, "kyc@agency.in").await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/dsa-partners/{}/kyc", partner["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({"status": "approved"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kycStatus"], "approved");

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/dsa-partners/{}/status", partner["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({"isActive": "no"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_setup_and_login_errors() {
    let app = test_app();
    admin_token(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/setup",
        None,
        Some(json!({"username": "admin", "password": "other"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/login",
        None,
        Some(json!({"username": "admin", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/login",
        None,
        Some(json!({"username": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_emi_endpoint() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/api/emi", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["months"], 240);
    assert!((body["monthlyEmi"].as_f64().unwrap() - 27_527.15).abs() < 0.01);
    assert_eq!(body["display"]["monthlyEmi"], "₹27,527");
    assert_eq!(body["display"]["principal"], "₹25L");

    let (status, body) = send(&app, "GET", "/api/emi?principal=120000&rate=0&tenure=1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["monthlyEmi"], 10_000.0);
    assert_eq!(body["totalInterest"], 0.0);

    let (status, _) = send(&app, "GET", "/api/emi?tenure=0", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/emi?rate=5000&tenure=50", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
