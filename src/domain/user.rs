//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::reset::ResetState;

/// User record as stored, including credential fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Identity document number (unique natural key)
    pub document: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub name: String,
    /// Active flag; inactive users cannot log in
    pub state: bool,
    #[serde(skip_serializing)]
    pub reset_password_token: Option<String>,
    #[serde(skip_serializing)]
    pub reset_password_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the account may log in
    pub fn is_active(&self) -> bool {
        self.state
    }

    /// True once the stored reset expiry lies before `now`.
    /// A token without expiry never expires.
    pub fn is_reset_token_expired(&self, now: DateTime<Utc>) -> bool {
        self.reset_password_expires
            .map(|expires| now > expires)
            .unwrap_or(false)
    }

    /// Position of this record in the password reset flow
    pub fn reset_state(&self, now: DateTime<Utc>) -> ResetState {
        match self.reset_password_token {
            None => ResetState::Active,
            Some(_) if self.is_reset_token_expired(now) => ResetState::Expired,
            Some(_) => ResetState::Pending,
        }
    }
}

/// Registration input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub document: i64,
    pub email: String,
    pub name: String,
}

/// Fully derived record handed to the store at registration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    pub document: i64,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub name: String,
    pub state: bool,
}

impl NewUserRecord {
    /// Value of a unique column, as it would appear in a conflict message
    pub fn unique_value(&self, column: &str) -> Option<String> {
        match column {
            "document" => Some(self.document.to_string()),
            "username" => Some(self.username.clone()),
            "email" => Some(self.email.clone()),
            _ => None,
        }
    }
}

/// Outcome of a successful registration.
///
/// `initial_password` is the generated plaintext; it is not stored anywhere
/// and is only available here.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub initial_password: String,
}

/// User profile without credential fields (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Identity document number
    #[schema(example = 1020304050)]
    pub document: i64,
    /// Generated username
    #[schema(example = "u1020304050")]
    pub username: String,
    /// Email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Display name
    #[schema(example = "Ana Perez")]
    pub name: String,
    /// Whether the account is active
    pub state: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            document: user.document,
            username: user.username,
            email: user.email,
            name: user.name,
            state: user.state,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        UserProfile::from(user.clone())
    }
}
