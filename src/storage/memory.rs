//! In-process storage used by tests and database-less development runs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Storage, StorageError, StorageResult};
use crate::models::{
    DsaPartner, LoanApplication, NewDsaPartner, NewLoanApplication, NewUser, ReviewStatus, User,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    loan_applications: Vec<LoanApplication>,
    partners: Vec<DsaPartner>,
}

/// Storage backed by vectors behind a single lock
#[derive(Clone, Default)]
pub struct MemoryStorage {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; later inserts win ties on `created_at`
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    let mut sorted: Vec<T> = rows.iter().rev().cloned().collect();
    sorted.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    sorted
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_user(&self, id: Uuid) -> StorageResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(StorageError::Duplicate {
                entity: "User",
                detail: format!("username {}", user.username),
            });
        }

        let created = User {
            id: Uuid::new_v4(),
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn create_loan_application(
        &self,
        application: NewLoanApplication,
    ) -> StorageResult<LoanApplication> {
        let now = Utc::now();
        let created = LoanApplication {
            id: Uuid::new_v4(),
            name: application.name,
            mobile: application.mobile,
            email: application.email,
            city: application.city,
            pin_code: application.pin_code,
            loan_type: application.loan_type,
            loan_amount: application.loan_amount,
            monthly_salary: application.monthly_salary,
            employment_type: application.employment_type,
            preferred_tenure: application.preferred_tenure,
            status: ReviewStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        self.tables
            .write()
            .await
            .loan_applications
            .push(created.clone());
        Ok(created)
    }

    async fn list_loan_applications(&self) -> StorageResult<Vec<LoanApplication>> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.loan_applications, |a| a.created_at))
    }

    async fn list_loan_applications_by_type(
        &self,
        loan_type: &str,
    ) -> StorageResult<Vec<LoanApplication>> {
        let tables = self.tables.read().await;
        let matching: Vec<LoanApplication> = tables
            .loan_applications
            .iter()
            .filter(|a| a.loan_type == loan_type)
            .cloned()
            .collect();
        Ok(newest_first(&matching, |a| a.created_at))
    }

    async fn update_loan_application_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> StorageResult<Option<LoanApplication>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .loan_applications
            .iter_mut()
            .find(|a| a.id == id)
            .map(|a| {
                a.status = status;
                a.updated_at = Utc::now();
                a.clone()
            }))
    }

    async fn create_partner(&self, partner: NewDsaPartner) -> StorageResult<DsaPartner> {
        let mut tables = self.tables.write().await;
        if tables.partners.iter().any(|p| p.email == partner.email) {
            return Err(StorageError::Duplicate {
                entity: "DSA partner",
                detail: format!("email {}", partner.email),
            });
        }

        let now = Utc::now();
        let created = DsaPartner {
            id: Uuid::new_v4(),
            name: partner.name,
            email: partner.email,
            mobile: partner.mobile,
            experience: partner.experience,
            address: partner.address,
            profile_picture: partner.profile_picture,
            documents: partner.documents,
            kyc_status: ReviewStatus::Pending,
            is_active: true,
            password_hash: None,
            created_at: now,
            updated_at: now,
        };
        tables.partners.push(created.clone());
        Ok(created)
    }

    async fn list_partners(&self) -> StorageResult<Vec<DsaPartner>> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.partners, |p| p.created_at))
    }

    async fn get_partner(&self, id: Uuid) -> StorageResult<Option<DsaPartner>> {
        let tables = self.tables.read().await;
        Ok(tables.partners.iter().find(|p| p.id == id).cloned())
    }

    async fn get_partner_by_email(&self, email: &str) -> StorageResult<Option<DsaPartner>> {
        let tables = self.tables.read().await;
        Ok(tables.partners.iter().find(|p| p.email == email).cloned())
    }

    async fn update_partner_kyc(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> StorageResult<Option<DsaPartner>> {
        self.update_partner(id, |p| p.kyc_status = status).await
    }

    async fn update_partner_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> StorageResult<Option<DsaPartner>> {
        self.update_partner(id, |p| p.is_active = is_active).await
    }

    async fn update_partner_password(
        &self,
        id: Uuid,
        password_hash: String,
    ) -> StorageResult<Option<DsaPartner>> {
        self.update_partner(id, move |p| p.password_hash = Some(password_hash))
            .await
    }

    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }
}

impl MemoryStorage {
    async fn update_partner(
        &self,
        id: Uuid,
        apply: impl FnOnce(&mut DsaPartner) + Send,
    ) -> StorageResult<Option<DsaPartner>> {
        let mut tables = self.tables.write().await;
        Ok(tables.partners.iter_mut().find(|p| p.id == id).map(|p| {
            apply(p);
            p.updated_at = Utc::now();
            p.clone()
        }))
    }
}
