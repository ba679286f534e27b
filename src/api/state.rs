//! Application state - Dependency injection container.

use std::sync::Arc;

use chrono::Duration;

use crate::config::Config;
use crate::infra::{Argon2Crypto, Crypto, Database, LogNotifier, ResetNotifier, UserStore};
use crate::services::{CredentialManager, CredentialService};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential service
    pub credentials: Arc<dyn CredentialService>,
    /// Reset token generation
    pub crypto: Arc<dyn Crypto>,
    /// Reset token delivery
    pub notifier: Arc<dyn ResetNotifier>,
    /// Database connection (health checks)
    pub database: Arc<Database>,
    /// Lifetime of newly issued reset tokens
    pub reset_token_ttl: Duration,
}

impl AppState {
    /// Wire the production services over a connected database.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let crypto: Arc<dyn Crypto> = Arc::new(Argon2Crypto);
        let repo = Arc::new(UserStore::new(database.get_connection()));
        let credentials = Arc::new(CredentialManager::new(repo, crypto.clone()));

        Self {
            credentials,
            crypto,
            notifier: Arc::new(LogNotifier),
            database,
            reset_token_ttl: config.reset_token_ttl(),
        }
    }

    /// Create application state with manually injected services.
    pub fn new(
        credentials: Arc<dyn CredentialService>,
        crypto: Arc<dyn Crypto>,
        notifier: Arc<dyn ResetNotifier>,
        database: Arc<Database>,
        reset_token_ttl: Duration,
    ) -> Self {
        Self {
            credentials,
            crypto,
            notifier,
            database,
            reset_token_ttl,
        }
    }
}
