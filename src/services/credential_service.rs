//! Credential service - registration, login and password reset.
//!
//! Each operation checks one precondition against the store and either
//! returns or fails with a typed [`AppError`]. The service keeps no state
//! between calls; uniqueness is left to the store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::{NewUser, NewUserRecord, Registration, ResetState, User, UserProfile};
use crate::errors::{AppError, AppResult};
use crate::infra::{Crypto, UserRepository};

/// Credential service trait for dependency injection.
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Register a new, active user with a generated username and password
    async fn register(&self, user: NewUser) -> AppResult<Registration>;

    /// Verify a username/password pair
    async fn login(&self, username: &str, password: &str) -> AppResult<User>;

    /// Resolve a user from an opaque token (matched against the username)
    async fn get_by_token(&self, token: &str) -> AppResult<User>;

    /// List all users without credential fields
    async fn list(&self) -> AppResult<Vec<UserProfile>>;

    /// Find a user by document without credential fields
    async fn find_by_document(&self, document: i64) -> AppResult<Option<UserProfile>>;

    /// Confirm that a document and email belong to the same user
    async fn forgot_password(&self, document: i64, email: &str) -> AppResult<User>;

    /// Attach a reset token to the user with this document.
    ///
    /// Returns the number of updated records; an unknown document updates
    /// nothing and is not an error.
    async fn assign_reset_token(
        &self,
        token: &str,
        expires: DateTime<Utc>,
        document: i64,
    ) -> AppResult<u64>;

    /// Set a new password using a reset token, consuming the token
    async fn reset_password(&self, token: &str, new_password: &str) -> AppResult<u64>;
}

/// Concrete implementation of CredentialService.
pub struct CredentialManager {
    repo: Arc<dyn UserRepository>,
    crypto: Arc<dyn Crypto>,
}

impl CredentialManager {
    /// Create new credential service instance
    pub fn new(repo: Arc<dyn UserRepository>, crypto: Arc<dyn Crypto>) -> Self {
        Self { repo, crypto }
    }
}

#[async_trait]
impl CredentialService for CredentialManager {
    async fn register(&self, user: NewUser) -> AppResult<Registration> {
        if self.repo.find_by_document(user.document).await?.is_some() {
            return Err(AppError::DuplicateDocument);
        }

        let seed = user.document.to_string();
        let username = self.crypto.generate_username(&seed);
        let initial_password = self.crypto.generate_password(&seed);
        let password_hash = self.crypto.hash(&initial_password)?;

        let created = self
            .repo
            .create(NewUserRecord {
                document: user.document,
                username,
                password_hash,
                email: user.email,
                name: user.name,
                state: true,
            })
            .await?;

        tracing::info!(user_id = %created.id, username = %created.username, "user registered");

        Ok(Registration {
            user: created,
            initial_password,
        })
    }

    async fn login(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !self.crypto.compare(password, &user.password_hash) {
            tracing::warn!(username = %username, "login rejected: incorrect password");
            return Err(AppError::PasswordIncorrect);
        }

        if !user.is_active() {
            tracing::warn!(username = %username, "login rejected: user inactive");
            return Err(AppError::UserInactive);
        }

        Ok(user)
    }

    async fn get_by_token(&self, token: &str) -> AppResult<User> {
        self.repo
            .find_by_username(token)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    async fn list(&self) -> AppResult<Vec<UserProfile>> {
        self.repo.list_profiles().await
    }

    async fn find_by_document(&self, document: i64) -> AppResult<Option<UserProfile>> {
        self.repo.find_profile_by_document(document).await
    }

    async fn forgot_password(&self, document: i64, email: &str) -> AppResult<User> {
        self.repo
            .find_by_document_and_email(document, email)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    async fn assign_reset_token(
        &self,
        token: &str,
        expires: DateTime<Utc>,
        document: i64,
    ) -> AppResult<u64> {
        let affected = self.repo.set_reset_token(document, token, expires).await?;
        tracing::debug!(document, affected, "reset token assigned");
        Ok(affected)
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> AppResult<u64> {
        let user = self
            .repo
            .find_by_reset_token(token)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if user.reset_state(Utc::now()) == ResetState::Expired {
            return Err(AppError::TokenExpired);
        }

        let password_hash = self.crypto.hash(new_password)?;
        let affected = self
            .repo
            .update_password_by_token(token, password_hash)
            .await?;

        tracing::info!(user_id = %user.id, "password reset");
        Ok(affected)
    }
}
