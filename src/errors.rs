//! Centralized error handling.
//!
//! Every service operation returns `AppResult<T>`; the HTTP layer turns the
//! error into a status code and a `{ success: false, ... }` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::{
    MSG_EMAIL_REGISTERED, MSG_INVALID_TOKEN, MSG_PASSWORD_MISMATCH, MSG_UNKNOWN_ERROR,
    MSG_USER_NOT_FOUND,
};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input
    #[error("{0}")]
    Validation(String),

    // Credentials
    #[error("{}", MSG_EMAIL_REGISTERED)]
    DuplicateEmail,

    #[error("{}", MSG_USER_NOT_FOUND)]
    UserNotFound,

    #[error("{}", MSG_PASSWORD_MISMATCH)]
    PasswordMismatch,

    #[error("{}", MSG_INVALID_TOKEN)]
    InvalidToken,

    // Store
    #[error("Database error")]
    Database(#[from] DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    #[schema(value_type = String, example = "USER_NOT_FOUND")]
    pub code: &'static str,
    #[schema(example = "User is not found.")]
    pub message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::DuplicateEmail => "DUPLICATE_EMAIL",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::PasswordMismatch => "PASSWORD_MISMATCH",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::Database(_) => "STORE_ERROR",
            AppError::Internal(_) => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::DuplicateEmail
            | AppError::PasswordMismatch
            | AppError::InvalidToken => StatusCode::BAD_REQUEST,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                MSG_UNKNOWN_ERROR.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                MSG_UNKNOWN_ERROR.to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Map a store error, turning a unique-index violation into `DuplicateEmail`.
    ///
    /// `email` is the only unique column besides the primary key.
    pub fn from_insert(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateEmail,
            _ => AppError::Database(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            success: false,
            code: self.code(),
            message: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_user_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_user_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::UserNotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
