//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::api::handlers::{auth_handler, user_handler};
use crate::domain::UserResponse;
use crate::errors::ErrorResponse;
use crate::services::LoginResponse;
use crate::validation::{ChangePasswordRequest, LoginRequest, RegisterRequest};

/// OpenAPI documentation for the authentication API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Auth API",
        version = "0.1.0",
        description = "User registration, login and password change",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers((url = "http://localhost:3000", description = "Local development server")),
    paths(
        auth_handler::login,
        auth_handler::register,
        auth_handler::change_password,
        user_handler::get_user,
    ),
    components(schemas(
        UserResponse,
        LoginResponse,
        ErrorResponse,
        LoginRequest,
        RegisterRequest,
        ChangePasswordRequest,
    )),
    tags(
        (name = "Authentication", description = "Registration, login and password change"),
        (name = "Users", description = "User profiles")
    )
)]
pub struct ApiDoc;
