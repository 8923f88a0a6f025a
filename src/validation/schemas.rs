//! Request schemas for the authentication endpoints.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::field::{self, not_empty, provided, text, text_or_number, FieldValue};
use super::{check, Schema};
use crate::config::PASSWORD_PATTERN;
use crate::errors::{AppError, AppResult};

static PASSWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PASSWORD_PATTERN).expect("password pattern is a valid regex"));

fn password_pattern(value: &FieldValue) -> Result<(), ValidationError> {
    field::matches(value, &PASSWORD_RE)
}

/// Login payload
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "provided")]
    #[validate(
        required(message = "Email is required."),
        custom(function = "text", message = "Email should be a string."),
        custom(function = "not_empty", message = "Email should not be empty."),
        email(message = "Email is not valid.")
    )]
    #[schema(value_type = String, example = "al@x.com")]
    pub email: Option<FieldValue>,

    #[serde(default, deserialize_with = "provided")]
    #[validate(
        required(message = "Password is required."),
        custom(function = "text", message = "Password should be a string."),
        custom(function = "not_empty", message = "Password should not be empty."),
        custom(
            function = "password_pattern",
            message = "Password fails to match the required pattern."
        )
    )]
    #[schema(value_type = String, example = "ab12")]
    pub password: Option<FieldValue>,
}

impl Schema for LoginRequest {
    const FIELDS: &'static [&'static str] = &["email", "password"];
    const KEYS: &'static [&'static str] = &["email", "password"];
}

/// Login payload after validation
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validated(self) -> AppResult<Credentials> {
        check(&self)?;
        Ok(Credentials {
            email: into_text(self.email, "email")?,
            password: into_text(self.password, "password")?,
        })
    }
}

/// Registration payload
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "provided")]
    #[validate(
        required(message = "Username is required"),
        custom(function = "text", message = "Username should be a string."),
        custom(function = "not_empty", message = "Username should not be empty")
    )]
    #[schema(value_type = String, example = "al")]
    pub username: Option<FieldValue>,

    #[serde(default, deserialize_with = "provided")]
    #[validate(
        required(message = "Email is required."),
        custom(function = "text", message = "Email should be a string."),
        custom(function = "not_empty", message = "Email should not be empty."),
        email(message = "Email is not valid.")
    )]
    #[schema(value_type = String, example = "Al@X.com")]
    pub email: Option<FieldValue>,

    #[serde(default, deserialize_with = "provided")]
    #[validate(
        required(message = "Password is required."),
        custom(function = "text", message = "Password should be a string."),
        custom(function = "not_empty", message = "Password should not be empty."),
        length(min = 4, message = "Password must be at least 4 characters"),
        custom(
            function = "password_pattern",
            message = "Password fails to match the required pattern."
        )
    )]
    #[schema(value_type = String, example = "ab12", min_length = 4, max_length = 30)]
    pub password: Option<FieldValue>,
}

impl Schema for RegisterRequest {
    const FIELDS: &'static [&'static str] = &["username", "email", "password"];
    const KEYS: &'static [&'static str] = &["username", "email", "password"];
}

/// Registration payload after validation
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validated(self) -> AppResult<NewAccount> {
        check(&self)?;
        Ok(NewAccount {
            username: into_text(self.username, "username")?,
            email: into_text(self.email, "email")?,
            password: into_text(self.password, "password")?,
        })
    }
}

/// Change-password payload.
///
/// `token` may be a string or a number. Numbers can never be valid signed
/// tokens; they pass the schema and are rejected by token verification.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChangePasswordRequest {
    #[serde(default, deserialize_with = "provided")]
    #[validate(
        required(message = "Old Password is required"),
        custom(function = "text", message = "Old Password must be a string."),
        custom(function = "not_empty", message = "Old Password should not be empty.")
    )]
    #[schema(value_type = String, example = "ab12")]
    pub old_password: Option<FieldValue>,

    #[serde(default, deserialize_with = "provided")]
    #[validate(
        required(message = "New Password is required"),
        custom(function = "text", message = "New Password must be a string."),
        custom(function = "not_empty", message = "New Password should not be empty.")
    )]
    #[schema(value_type = String, example = "cd34")]
    pub new_password: Option<FieldValue>,

    #[serde(default, deserialize_with = "provided")]
    #[validate(
        required(message = "Token is required"),
        custom(function = "text_or_number", message = "Token must be a string or a number."),
        custom(function = "not_empty", message = "Token should not be empty.")
    )]
    #[schema(value_type = String, example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: Option<FieldValue>,
}

impl Schema for ChangePasswordRequest {
    // validator keys errors by the Rust field name
    const FIELDS: &'static [&'static str] = &["old_password", "new_password", "token"];
    const KEYS: &'static [&'static str] = &["oldPassword", "newPassword", "token"];
}

/// Change-password payload after validation
#[derive(Debug, Clone)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub token: String,
}

impl ChangePasswordRequest {
    pub fn validated(self) -> AppResult<PasswordChange> {
        check(&self)?;
        let token = match self.token {
            Some(FieldValue::Number(number)) => number.to_string(),
            other => into_text(other, "token")?,
        };
        Ok(PasswordChange {
            old_password: into_text(self.old_password, "oldPassword")?,
            new_password: into_text(self.new_password, "newPassword")?,
            token,
        })
    }
}

/// Take the text of a field that `check` has already accepted.
fn into_text(value: Option<FieldValue>, field: &str) -> AppResult<String> {
    match value {
        Some(FieldValue::Text(text)) => Ok(text),
        _ => Err(AppError::validation(format!("{} is invalid", field))),
    }
}
