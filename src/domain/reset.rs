//! Password reset token value object.

use chrono::{DateTime, Duration, Utc};

use crate::errors::{AppError, AppResult};

/// Where a user record sits in the password reset flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetState {
    /// No reset outstanding
    Active,
    /// Token issued and still usable
    Pending,
    /// Token issued but past its expiry; a new one must be requested
    Expired,
}

/// A reset token and the moment it stops being accepted.
#[derive(Clone, PartialEq, Eq)]
pub struct ResetToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// Token grants a password change; keep it out of logs.
impl std::fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetToken")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl ResetToken {
    /// Issue a token valid for `ttl` from now.
    ///
    /// # Errors
    /// Returns an internal error if the expiry is not a representable time.
    pub fn issue(token: String, ttl: Duration) -> AppResult<Self> {
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::internal("Reset token expiry out of range"))?;
        Ok(Self { token, expires_at })
    }
}
