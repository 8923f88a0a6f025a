//! Authentication handlers.

use axum::{
    extract::State,
    routing::{post, put},
    Router,
};

use crate::api::extractors::JsonPayload;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::LoginResponse;
use crate::types::{ApiResponse, Created};
use crate::validation::{ChangePasswordRequest, LoginRequest, RegisterRequest};

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/change_password", put(change_password))
}

/// Login and get a token
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error or password mismatch"),
        (status = 404, description = "User not found")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let outcome = state.auth_service.login(payload).await?;
    Ok(ApiResponse::success(LoginResponse::from(outcome)))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error or email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<RegisterRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state.auth_service.register(payload).await?;
    Ok(Created(UserResponse::from(user)))
}

/// Change the password of the user identified by the token
#[utoipa::path(
    put,
    path = "/api/change_password",
    tag = "Authentication",
    request_body = ChangePasswordRequest,
    responses(
        (status = 201, description = "Password changed", body = UserResponse),
        (status = 400, description = "Validation error, invalid token or password mismatch"),
        (status = 404, description = "User not found")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<ChangePasswordRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state.auth_service.change_password(payload).await?;
    Ok(Created(UserResponse::from(user)))
}
