//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - User record store
//! - Password hashing and credential generation
//! - Reset notification delivery

pub mod crypto;
pub mod db;
pub mod notifier;
pub mod repositories;

pub use crypto::{Argon2Crypto, Crypto};
pub use db::{Database, Migrator};
pub use notifier::{LogNotifier, ResetMessage, ResetNotifier};
pub use repositories::{UserRepository, UserStore};

#[cfg(test)]
pub use crypto::MockCrypto;
#[cfg(test)]
pub use notifier::MockResetNotifier;
#[cfg(test)]
pub use repositories::MockUserRepository;
