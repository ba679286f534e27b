//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{auth_handler, user_handler};
use crate::domain::UserProfile;

/// OpenAPI documentation for the credential service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Credential Service",
        version = "0.1.0",
        description = "User registration, login and password reset over Axum and SeaORM",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::forgot_password,
        auth_handler::reset_password,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::get_user_by_token,
    ),
    components(
        schemas(
            UserProfile,
            auth_handler::RegisterRequest,
            auth_handler::RegisterResponse,
            auth_handler::LoginRequest,
            auth_handler::ForgotPasswordRequest,
            auth_handler::ResetPasswordRequest,
        )
    ),
    tags(
        (name = "Authentication", description = "Registration, login and password reset"),
        (name = "Users", description = "User lookup")
    )
)]
pub struct ApiDoc;
