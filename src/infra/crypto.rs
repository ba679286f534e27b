//! Crypto utility - password hashing and credential generation.

use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

use crate::config::{INITIAL_PASSWORD_LENGTH, RESET_TOKEN_LENGTH, USERNAME_PREFIX};
use crate::domain::Password;
use crate::errors::AppResult;

#[cfg(test)]
use mockall::automock;

/// Hashing and generation primitives used by the credential service.
#[cfg_attr(test, automock)]
pub trait Crypto: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash(&self, plain_text: &str) -> AppResult<String>;

    /// Compare a plaintext password against a stored hash
    fn compare(&self, plain_text: &str, hash: &str) -> bool;

    /// Derive a username from a seed (the document number)
    fn generate_username(&self, seed: &str) -> String;

    /// Produce an initial plaintext password for a new account
    fn generate_password(&self, seed: &str) -> String;

    /// Produce an opaque password reset token
    fn generate_reset_token(&self) -> String;
}

/// Argon2 hashing with OS-random generated secrets.
///
/// The username is a deterministic function of the seed; the initial
/// password ignores the seed and is random.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Crypto;

impl Argon2Crypto {
    fn random_string(len: usize) -> String {
        OsRng
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

impl Crypto for Argon2Crypto {
    fn hash(&self, plain_text: &str) -> AppResult<String> {
        Ok(Password::new(plain_text)?.into_string())
    }

    fn compare(&self, plain_text: &str, hash: &str) -> bool {
        Password::from_hash(hash.to_string()).verify(plain_text)
    }

    fn generate_username(&self, seed: &str) -> String {
        format!("{}{}", USERNAME_PREFIX, seed.trim())
    }

    fn generate_password(&self, _seed: &str) -> String {
        Self::random_string(INITIAL_PASSWORD_LENGTH)
    }

    fn generate_reset_token(&self) -> String {
        Self::random_string(RESET_TOKEN_LENGTH)
    }
}
