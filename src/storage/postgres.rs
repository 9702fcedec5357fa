//! Postgres-backed storage

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Storage, StorageError, StorageResult};
use crate::models::{
    DsaPartner, LoanApplication, NewDsaPartner, NewLoanApplication, NewUser, ReviewStatus, User,
};

const USER_COLUMNS: &str = "id, username, password_hash, role, created_at";

const LOAN_APPLICATION_COLUMNS: &str = "id, name, mobile, email, city, pin_code, loan_type, \
     loan_amount, monthly_salary, employment_type, preferred_tenure, status, created_at, updated_at";

const PARTNER_COLUMNS: &str = "id, name, email, mobile, experience, address, profile_picture, \
     documents, kyc_status, is_active, password_hash, created_at, updated_at";

/// Storage implementation over a Postgres pool
#[derive(Clone)]
pub struct PgStorage {
    db_pool: PgPool,
}

impl PgStorage {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

/// Map a unique-constraint violation to `StorageError::Duplicate`
fn duplicate_or(err: sqlx::Error, entity: &'static str, detail: String) -> StorageError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StorageError::Duplicate { entity, detail }
        }
        _ => StorageError::Database(err),
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn get_user(&self, id: Uuid) -> StorageResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;
        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.db_pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let username = user.username.clone();
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.role)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| duplicate_or(e, "User", format!("username {}", username)))
    }

    async fn create_loan_application(
        &self,
        application: NewLoanApplication,
    ) -> StorageResult<LoanApplication> {
        let created = sqlx::query_as::<_, LoanApplication>(&format!(
            r#"
            INSERT INTO loan_applications (
                name, mobile, email, city, pin_code, loan_type,
                loan_amount, monthly_salary, employment_type, preferred_tenure
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            LOAN_APPLICATION_COLUMNS
        ))
        .bind(application.name)
        .bind(application.mobile)
        .bind(application.email)
        .bind(application.city)
        .bind(application.pin_code)
        .bind(application.loan_type)
        .bind(application.loan_amount)
        .bind(application.monthly_salary)
        .bind(application.employment_type)
        .bind(application.preferred_tenure)
        .fetch_one(&self.db_pool)
        .await?;
        Ok(created)
    }

    async fn list_loan_applications(&self) -> StorageResult<Vec<LoanApplication>> {
        let applications = sqlx::query_as::<_, LoanApplication>(&format!(
            "SELECT {} FROM loan_applications ORDER BY created_at DESC",
            LOAN_APPLICATION_COLUMNS
        ))
        .fetch_all(&self.db_pool)
        .await?;
        Ok(applications)
    }

    async fn list_loan_applications_by_type(
        &self,
        loan_type: &str,
    ) -> StorageResult<Vec<LoanApplication>> {
        let applications = sqlx::query_as::<_, LoanApplication>(&format!(
            "SELECT {} FROM loan_applications WHERE loan_type = $1 ORDER BY created_at DESC",
            LOAN_APPLICATION_COLUMNS
        ))
        .bind(loan_type)
        .fetch_all(&self.db_pool)
        .await?;
        Ok(applications)
    }

    async fn update_loan_application_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> StorageResult<Option<LoanApplication>> {
        let updated = sqlx::query_as::<_, LoanApplication>(&format!(
            r#"
            UPDATE loan_applications
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {}
            "#,
            LOAN_APPLICATION_COLUMNS
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;
        Ok(updated)
    }

    async fn create_partner(&self, partner: NewDsaPartner) -> StorageResult<DsaPartner> {
        let email = partner.email.clone();
        sqlx::query_as::<_, DsaPartner>(&format!(
            r#"
            INSERT INTO dsa_partners (
                name, email, mobile, experience, address, profile_picture, documents
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            PARTNER_COLUMNS
        ))
        .bind(partner.name)
        .bind(partner.email)
        .bind(partner.mobile)
        .bind(partner.experience)
        .bind(partner.address)
        .bind(partner.profile_picture)
        .bind(partner.documents)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| duplicate_or(e, "DSA partner", format!("email {}", email)))
    }

    async fn list_partners(&self) -> StorageResult<Vec<DsaPartner>> {
        let partners = sqlx::query_as::<_, DsaPartner>(&format!(
            "SELECT {} FROM dsa_partners ORDER BY created_at DESC",
            PARTNER_COLUMNS
        ))
        .fetch_all(&self.db_pool)
        .await?;
        Ok(partners)
    }

    async fn get_partner(&self, id: Uuid) -> StorageResult<Option<DsaPartner>> {
        let partner = sqlx::query_as::<_, DsaPartner>(&format!(
            "SELECT {} FROM dsa_partners WHERE id = $1",
            PARTNER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;
        Ok(partner)
    }

    async fn get_partner_by_email(&self, email: &str) -> StorageResult<Option<DsaPartner>> {
        let partner = sqlx::query_as::<_, DsaPartner>(&format!(
            "SELECT {} FROM dsa_partners WHERE email = $1",
            PARTNER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?;
        Ok(partner)
    }

    async fn update_partner_kyc(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> StorageResult<Option<DsaPartner>> {
        let updated = sqlx::query_as::<_, DsaPartner>(&format!(
            r#"
            UPDATE dsa_partners
            SET kyc_status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {}
            "#,
            PARTNER_COLUMNS
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;
        Ok(updated)
    }

    async fn update_partner_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> StorageResult<Option<DsaPartner>> {
        let updated = sqlx::query_as::<_, DsaPartner>(&format!(
            r#"
            UPDATE dsa_partners
            SET is_active = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {}
            "#,
            PARTNER_COLUMNS
        ))
        .bind(is_active)
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;
        Ok(updated)
    }

    async fn update_partner_password(
        &self,
        id: Uuid,
        password_hash: String,
    ) -> StorageResult<Option<DsaPartner>> {
        let updated = sqlx::query_as::<_, DsaPartner>(&format!(
            r#"
            UPDATE dsa_partners
            SET password_hash = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {}
            "#,
            PARTNER_COLUMNS
        ))
        .bind(password_hash)
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;
        Ok(updated)
    }

    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.db_pool).await?;
        Ok(())
    }
}
