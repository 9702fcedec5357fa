//! Loan brokerage backend library
//!
//! Loan applications, DSA partner registrations, admin/partner
//! authentication and the EMI calculator, served over a JSON API.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
