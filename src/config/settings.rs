//! Application settings loaded from environment variables.

use std::env;

use chrono::Duration;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_RESET_TOKEN_TTL_MINUTES, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MAX_RESET_TOKEN_TTL_MINUTES,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub reset_token_ttl_minutes: i64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("reset_token_ttl_minutes", &self.reset_token_ttl_minutes)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            reset_token_ttl_minutes: DEFAULT_RESET_TOKEN_TTL_MINUTES,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults in
    /// [`super::constants`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            reset_token_ttl_minutes: parse_ttl(env::var("RESET_TOKEN_TTL_MINUTES").ok()),
        }
    }

    /// Lifetime of a freshly issued password reset token.
    ///
    /// Kept within `1..=MAX_RESET_TOKEN_TTL_MINUTES` even when the field was
    /// set directly.
    pub fn reset_token_ttl(&self) -> Duration {
        Duration::minutes(
            self.reset_token_ttl_minutes
                .clamp(1, MAX_RESET_TOKEN_TTL_MINUTES),
        )
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// A TTL must be a positive number of minutes; longer ones are capped.
fn parse_ttl(raw: Option<String>) -> i64 {
    match raw.and_then(|v| v.parse::<i64>().ok()) {
        Some(minutes) if minutes > MAX_RESET_TOKEN_TTL_MINUTES => {
            tracing::warn!(
                minutes,
                max = MAX_RESET_TOKEN_TTL_MINUTES,
                "RESET_TOKEN_TTL_MINUTES too large, capping"
            );
            MAX_RESET_TOKEN_TTL_MINUTES
        }
        Some(minutes) if minutes > 0 => minutes,
        Some(minutes) => {
            tracing::warn!(minutes, "RESET_TOKEN_TTL_MINUTES must be positive, using default");
            DEFAULT_RESET_TOKEN_TTL_MINUTES
        }
        None => DEFAULT_RESET_TOKEN_TTL_MINUTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ttl() {
        assert_eq!(parse_ttl(Some("15".into())), 15);
        assert_eq!(parse_ttl(Some("0".into())), DEFAULT_RESET_TOKEN_TTL_MINUTES);
        assert_eq!(parse_ttl(Some("-5".into())), DEFAULT_RESET_TOKEN_TTL_MINUTES);
        assert_eq!(parse_ttl(Some("soon".into())), DEFAULT_RESET_TOKEN_TTL_MINUTES);
        assert_eq!(parse_ttl(None), DEFAULT_RESET_TOKEN_TTL_MINUTES);
    }

    #[test]
    fn test_parse_ttl_caps_huge_values() {
        assert_eq!(
            parse_ttl(Some(MAX_RESET_TOKEN_TTL_MINUTES.to_string())),
            MAX_RESET_TOKEN_TTL_MINUTES
        );
        assert_eq!(
            parse_ttl(Some("1000000000000".into())),
            MAX_RESET_TOKEN_TTL_MINUTES
        );
        assert_eq!(
            parse_ttl(Some(i64::MAX.to_string())),
            MAX_RESET_TOKEN_TTL_MINUTES
        );
    }

    #[test]
    fn test_reset_token_ttl_never_overflows() {
        let config = Config {
            reset_token_ttl_minutes: i64::MAX,
            ..Config::default()
        };
        assert_eq!(
            config.reset_token_ttl(),
            Duration::minutes(MAX_RESET_TOKEN_TTL_MINUTES)
        );

        let config = Config {
            reset_token_ttl_minutes: -3,
            ..Config::default()
        };
        assert_eq!(config.reset_token_ttl(), Duration::minutes(1));
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = Config {
            database_url: "postgres://admin:hunter2@db/credentials".into(),
            ..Config::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_reset_token_ttl_and_addr() {
        let config = Config {
            server_host: "127.0.0.1".into(),
            server_port: 8081,
            reset_token_ttl_minutes: 30,
            ..Config::default()
        };
        assert_eq!(config.reset_token_ttl(), Duration::minutes(30));
        assert_eq!(config.server_addr(), "127.0.0.1:8081");
    }
}
