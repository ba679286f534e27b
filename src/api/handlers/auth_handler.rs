//! Authentication handlers: registration, login and password reset.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewUser, ResetToken, UserProfile};
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Identity document number
    #[validate(range(min = 1, message = "Document must be a positive number"))]
    #[schema(example = 1020304050)]
    pub document: i64,
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ana Perez")]
    pub name: String,
}

/// Registration result; the initial password is shown only here
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub user: UserProfile,
    /// Generated password, to be changed through the reset flow
    #[schema(example = "k3J9aQz0LmX2")]
    pub initial_password: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "u1020304050")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "k3J9aQz0LmX2")]
    pub password: String,
}

/// Password reset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[validate(range(min = 1, message = "Document must be a positive number"))]
    #[schema(example = 1020304050)]
    pub document: i64,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
}

/// New password submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "NewSecurePass123!", min_length = 8)]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Document or another unique field already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let registration = state
        .credentials
        .register(NewUser {
            document: payload.document,
            email: payload.email,
            name: payload.name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: UserProfile::from(registration.user),
            initial_password: registration.initial_password,
        }),
    ))
}

/// Verify username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserProfile),
        (status = 401, description = "Incorrect password"),
        (status = 403, description = "User inactive"),
        (status = 404, description = "User not found")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<UserProfile>> {
    let user = state
        .credentials
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(UserProfile::from(user)))
}

/// Issue a reset token and deliver it to the user's email
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "Authentication",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 202, description = "Reset token issued and sent"),
        (status = 404, description = "Document and email do not match a user")
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse>)> {
    let user = state
        .credentials
        .forgot_password(payload.document, &payload.email)
        .await?;

    let ticket = ResetToken::issue(state.crypto.generate_reset_token(), state.reset_token_ttl)?;
    state
        .credentials
        .assign_reset_token(&ticket.token, ticket.expires_at, user.document)
        .await?;
    state.notifier.send_reset(&user, &ticket).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::message(
            "A password reset token has been sent to the registered email",
        )),
    ))
}

/// Set a new password with a reset token
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "Authentication",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Invalid or expired token")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<Json<ApiResponse>> {
    state
        .credentials
        .reset_password(&payload.token, &payload.password)
        .await?;

    Ok(Json(ApiResponse::message("Password updated")))
}
