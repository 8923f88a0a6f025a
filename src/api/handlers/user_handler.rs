//! User handlers.

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::types::ApiResponse;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/user/:id", get(get_user))
}

/// Get a user profile by ID
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    // An id that cannot exist is reported the same as a missing one
    let id = Uuid::parse_str(&id).map_err(|_| AppError::UserNotFound)?;
    let user = state.user_service.get_user(id).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}
