//! Centralized error handling.
//!
//! Every credential failure is a variant of [`AppError`]; nothing is retried
//! or recovered locally. The HTTP layer turns errors into JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Registration
    #[error("A user is already registered with this document")]
    DuplicateDocument,

    #[error("The field [{field}] is already registered with value {value}")]
    DuplicateField { field: String, value: String },

    // Login
    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect password")]
    PasswordIncorrect,

    #[error("User is inactive")]
    UserInactive,

    // Password reset
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired, a new one must be requested")]
    TokenExpired,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateDocument => "DUPLICATE_DOCUMENT",
            AppError::DuplicateField { .. } => "DUPLICATE_FIELD",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::PasswordIncorrect => "PASSWORD_INCORRECT",
            AppError::UserInactive => "USER_INACTIVE",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::TokenExpired => "TOKEN_EXPIRED",
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DuplicateDocument | AppError::DuplicateField { .. } => StatusCode::CONFLICT,
            AppError::UserNotFound | AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::PasswordIncorrect => StatusCode::UNAUTHORIZED,
            AppError::UserInactive => StatusCode::FORBIDDEN,
            AppError::InvalidToken | AppError::TokenExpired | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),

            // Hide details for internal errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn duplicate_field(field: impl Into<String>, value: impl Into<String>) -> Self {
        AppError::DuplicateField {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
