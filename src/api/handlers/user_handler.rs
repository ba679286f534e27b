//! User lookup handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use crate::api::AppState;
use crate::domain::UserProfile;
use crate::errors::{AppResult, OptionExt};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/token/:token", get(get_user_by_token))
        .route("/:document", get(get_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Public profiles of all users", body = Vec<UserProfile>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserProfile>>> {
    Ok(Json(state.credentials.list().await?))
}

/// Get user by document
#[utoipa::path(
    get,
    path = "/users/{document}",
    tag = "Users",
    params(
        ("document" = i64, Path, description = "Identity document number")
    ),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 404, description = "No user with that document")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(document): Path<i64>,
) -> AppResult<Json<UserProfile>> {
    let profile = state
        .credentials
        .find_by_document(document)
        .await?
        .ok_or_not_found()?;
    Ok(Json(profile))
}

/// Resolve a user from an opaque lookup token (matched against the username)
#[utoipa::path(
    get,
    path = "/users/token/{token}",
    tag = "Users",
    params(
        ("token" = String, Path, description = "Opaque lookup key")
    ),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<UserProfile>> {
    let user = state.credentials.get_by_token(&token).await?;
    Ok(Json(UserProfile::from(user)))
}
