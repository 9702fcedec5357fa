//! Authentication service
//!
//! One login path serves both roles: look up the account for the role,
//! verify the password, check the account is active, then sign a token for
//! the resulting principal.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::config::MAX_JWT_TTL_HOURS;
use crate::models::{
    normalize_email, AdminProfile, CurrentAccount, DsaPartner, LoginResponse, NewUser,
    PartnerProfile, Principal, Profile, Role, User, ADMIN_ROLE,
};
use crate::storage::{Storage, StorageError};

use super::jwt::{issue_token, verify_token, JwtError};
use super::password::{hash_password, verify_password, MIN_PARTNER_PASSWORD_LENGTH};

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown account, wrong password or inactive account
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token is valid but its account is gone or deactivated
    #[error("Account is no longer active")]
    AccountUnavailable,

    #[error("User already exists")]
    UserExists,

    #[error("Partner not found")]
    PartnerNotFound,

    #[error("Weak password: {0}")]
    WeakPassword(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Account material needed to complete a login
struct Account {
    principal: Principal,
    password_hash: Option<String>,
    is_active: bool,
    profile: Profile,
}

impl From<User> for Account {
    fn from(user: User) -> Self {
        Self {
            principal: Principal {
                id: user.id,
                role: Role::Admin,
                identifier: user.username.clone(),
            },
            profile: Profile::Admin(AdminProfile::from(&user)),
            password_hash: Some(user.password_hash),
            is_active: true,
        }
    }
}

impl From<DsaPartner> for Account {
    fn from(partner: DsaPartner) -> Self {
        Self {
            principal: Principal {
                id: partner.id,
                role: Role::Dsa,
                identifier: partner.email.clone(),
            },
            profile: Profile::Partner(PartnerProfile::from(&partner)),
            password_hash: partner.password_hash,
            is_active: partner.is_active,
        }
    }
}

/// Hashed on first use; checked when no usable account matches
const DUMMY_PASSWORD: &str = "no-such-account-placeholder";

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    storage: Arc<dyn Storage>,
    jwt_secret: String,
    token_ttl_seconds: i64,
    bcrypt_cost: u32,
    dummy_hash: OnceCell<String>,
}

impl AuthService {
    pub fn new(
        storage: Arc<dyn Storage>,
        jwt_secret: String,
        token_ttl_hours: i64,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            storage,
            jwt_secret,
            token_ttl_seconds: token_ttl_hours.clamp(1, MAX_JWT_TTL_HOURS) * 60 * 60,
            bcrypt_cost,
            dummy_hash: OnceCell::new(),
        }
    }

    async fn dummy_hash(&self) -> Result<&str, AuthError> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| hash_password(DUMMY_PASSWORD, self.bcrypt_cost))
            .await?;
        Ok(hash.as_str())
    }

    /// One bcrypt verification against the dummy hash
    async fn verify_dummy(&self, password: &str) -> Result<(), AuthError> {
        let dummy = self.dummy_hash().await?;
        verify_password(password, dummy).await?;
        Ok(())
    }

    /// Verify credentials for `role` and issue a token
    pub async fn login(
        &self,
        role: Role,
        identifier: &str,
        password: &str,
    ) -> Result<LoginResponse, AuthError> {
        let Some(account) = self.find_account(role, identifier).await? else {
            tracing::debug!(role = role.as_str(), "Login for unknown account");
            self.verify_dummy(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        let Some(password_hash) = account.password_hash.as_deref() else {
            tracing::debug!(role = role.as_str(), "Login for account without password");
            self.verify_dummy(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, password_hash).await? {
            tracing::debug!(role = role.as_str(), "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if !account.is_active {
            tracing::info!(account_id = %account.principal.id, "Login refused for inactive account");
            return Err(AuthError::InvalidCredentials);
        }

        let token = issue_token(
            &account.principal,
            &self.jwt_secret,
            self.token_ttl_seconds,
            Utc::now(),
        )?;

        tracing::info!(
            account_id = %account.principal.id,
            role = role.as_str(),
            "Login succeeded"
        );

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_ttl_seconds,
            profile: account.profile,
        })
    }

    async fn find_account(
        &self,
        role: Role,
        identifier: &str,
    ) -> Result<Option<Account>, AuthError> {
        let account = match role {
            Role::Admin => self
                .storage
                .get_user_by_username(identifier.trim())
                .await?
                .map(Account::from),
            Role::Dsa => self
                .storage
                .get_partner_by_email(&normalize_email(identifier))
                .await?
                .map(Account::from),
        };
        Ok(account)
    }

    /// Resolve the principal behind a bearer token
    pub fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        Ok(verify_token(token, &self.jwt_secret, Utc::now())?)
    }

    /// Load the live account behind `principal`.
    ///
    /// Deleted accounts and deactivated partners are reported even while
    /// their tokens are still unexpired.
    pub async fn current_account(&self, principal: &Principal) -> Result<CurrentAccount, AuthError> {
        let account = match principal.role {
            Role::Admin => self.storage.get_user(principal.id).await?.map(Account::from),
            Role::Dsa => self.storage.get_partner(principal.id).await?.map(Account::from),
        };

        match account {
            Some(account) if account.is_active => Ok(CurrentAccount {
                principal: account.principal,
                profile: account.profile,
            }),
            _ => Err(AuthError::AccountUnavailable),
        }
    }

    /// Create an admin user
    pub async fn setup_admin(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if self.storage.get_user_by_username(username).await?.is_some() {
            return Err(AuthError::UserExists);
        }

        let password_hash = hash_password(password, self.bcrypt_cost).await?;
        let user = self
            .storage
            .create_user(NewUser {
                username: username.to_string(),
                password_hash,
                role: ADMIN_ROLE.to_string(),
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent setup for the same name
                StorageError::Duplicate { .. } => AuthError::UserExists,
                other => AuthError::Storage(other),
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "Admin user created");
        Ok(user)
    }

    /// Assign a login password to a partner
    pub async fn set_partner_password(
        &self,
        partner_id: Uuid,
        password: &str,
    ) -> Result<DsaPartner, AuthError> {
        if password.chars().count() < MIN_PARTNER_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword(format!(
                "Password must be at least {} characters",
                MIN_PARTNER_PASSWORD_LENGTH
            )));
        }

        let password_hash = hash_password(password, self.bcrypt_cost).await?;
        let partner = self
            .storage
            .update_partner_password(partner_id, password_hash)
            .await?
            .ok_or(AuthError::PartnerNotFound)?;

        tracing::info!(partner_id = %partner.id, "Partner password set");
        Ok(partner)
    }
}
