//! Persistence gateway
//!
//! `Storage` is the seam between handlers and the system of record.
//! `PgStorage` talks to Postgres; `MemoryStorage` keeps everything in
//! process for tests and database-less development runs.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    DsaPartner, LoanApplication, NewDsaPartner, NewLoanApplication, NewUser, ReviewStatus, User,
};

mod memory;
mod postgres;

pub use memory::MemoryStorage;
pub use postgres::PgStorage;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{entity} already exists: {detail}")]
    Duplicate {
        entity: &'static str,
        detail: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// CRUD operations for users, loan applications and DSA partners.
///
/// Update methods return `Ok(None)` when the id is unknown. Every update
/// refreshes `updated_at`; list methods return newest first.
#[async_trait]
pub trait Storage: Send + Sync {
    // Admin users
    async fn get_user(&self, id: Uuid) -> StorageResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>>;
    async fn create_user(&self, user: NewUser) -> StorageResult<User>;

    // Loan applications
    async fn create_loan_application(
        &self,
        application: NewLoanApplication,
    ) -> StorageResult<LoanApplication>;
    async fn list_loan_applications(&self) -> StorageResult<Vec<LoanApplication>>;
    async fn list_loan_applications_by_type(
        &self,
        loan_type: &str,
    ) -> StorageResult<Vec<LoanApplication>>;
    async fn update_loan_application_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> StorageResult<Option<LoanApplication>>;

    // DSA partners
    async fn create_partner(&self, partner: NewDsaPartner) -> StorageResult<DsaPartner>;
    async fn list_partners(&self) -> StorageResult<Vec<DsaPartner>>;
    async fn get_partner(&self, id: Uuid) -> StorageResult<Option<DsaPartner>>;
    async fn get_partner_by_email(&self, email: &str) -> StorageResult<Option<DsaPartner>>;
    async fn update_partner_kyc(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> StorageResult<Option<DsaPartner>>;
    async fn update_partner_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> StorageResult<Option<DsaPartner>>;
    async fn update_partner_password(
        &self,
        id: Uuid,
        password_hash: String,
    ) -> StorageResult<Option<DsaPartner>>;

    /// Connectivity check for `/health`
    async fn ping(&self) -> StorageResult<()>;
}
