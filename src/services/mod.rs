//! Business logic services

pub mod emi;

pub use emi::{calculate_emi, EmiBreakdown, EmiError};
