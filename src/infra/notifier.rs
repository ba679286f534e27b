//! Reset notification delivery.
//!
//! The reset token reaches the user out of band, never in an HTTP response.
//! [`LogNotifier`] writes the message to the log in place of sending mail.

use async_trait::async_trait;

use crate::domain::{ResetToken, User};
use crate::errors::AppResult;

#[cfg(test)]
use mockall::automock;

/// Outgoing reset message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl ResetMessage {
    /// Compose the message carrying `ticket` for `user`
    pub fn compose(user: &User, ticket: &ResetToken) -> Self {
        Self {
            to: user.email.clone(),
            subject: "Password reset".to_string(),
            body: format!(
                "Hello {},\n\n\
                 Use this token to set a new password for {}: {}\n\
                 It expires at {}.\n",
                user.name,
                user.username,
                ticket.token,
                ticket.expires_at.to_rfc3339()
            ),
        }
    }
}

/// Delivers reset tokens to users.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResetNotifier: Send + Sync {
    async fn send_reset(&self, user: &User, ticket: &ResetToken) -> AppResult<()>;
}

/// Development notifier: logs the message instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl ResetNotifier for LogNotifier {
    async fn send_reset(&self, user: &User, ticket: &ResetToken) -> AppResult<()> {
        let message = ResetMessage::compose(user, ticket);

        tracing::warn!("no mail transport configured - logging reset message instead of sending");
        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ========================",
            message.to,
            message.subject,
            message.body
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            document: 55,
            username: "u55".into(),
            password_hash: "h".into(),
            email: "ana@example.com".into(),
            name: "Ana".into(),
            state: true,
            reset_password_token: None,
            reset_password_expires: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_compose_addresses_user_and_carries_token() {
        let ticket = ResetToken::issue("tok123".into(), Duration::minutes(30)).unwrap();
        let message = ResetMessage::compose(&user(), &ticket);

        assert_eq!(message.to, "ana@example.com");
        assert!(message.body.contains("tok123"));
        assert!(message.body.contains("u55"));
    }

    #[tokio::test]
    async fn test_log_notifier_succeeds() {
        let ticket = ResetToken::issue("tok".into(), Duration::minutes(1)).unwrap();
        assert!(LogNotifier.send_reset(&user(), &ticket).await.is_ok());
    }
}
