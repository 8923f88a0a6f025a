//! Request validation.
//!
//! Payload schemas are declared with `validator` derives. Only the first
//! violated rule is reported: fields are checked in declaration order and,
//! within a field, presence before type before emptiness before length
//! before format.

mod field;
mod schemas;

pub use field::FieldValue;
pub use schemas::{
    ChangePasswordRequest, Credentials, LoginRequest, NewAccount, PasswordChange,
    RegisterRequest,
};

use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::{AppError, AppResult};

/// A request payload with a declared field order.
pub trait Schema: Validate {
    /// Field names in the order they are checked.
    const FIELDS: &'static [&'static str];

    /// Keys accepted in the JSON body.
    const KEYS: &'static [&'static str];
}

/// Build a payload from a JSON body; the body must be an object with no
/// undeclared keys.
pub fn from_json<T: Schema + DeserializeOwned>(body: Value) -> AppResult<T> {
    let Value::Object(object) = &body else {
        return Err(AppError::validation("\"value\" must be of type object"));
    };
    if let Some(key) = object.keys().find(|key| !T::KEYS.contains(&key.as_str())) {
        return Err(AppError::validation(format!("\"{}\" is not allowed", key)));
    }

    serde_json::from_value(body).map_err(|e| AppError::validation(e.to_string()))
}

/// Validate `payload`, reporting the first violated rule.
pub fn check<T: Schema>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|errors| AppError::validation(first_violation(&errors, T::FIELDS)))
}

/// Pick the message of the first violated rule.
fn first_violation(errors: &ValidationErrors, order: &[&str]) -> String {
    let field_errors = errors.field_errors();

    let mut fields: Vec<(usize, &str, &Vec<ValidationError>)> = field_errors
        .iter()
        .map(|(field, errs)| {
            let name: &str = field;
            let position = order
                .iter()
                .position(|known| *known == name)
                .unwrap_or(order.len());
            (position, name, *errs)
        })
        .collect();
    fields.sort_by_key(|(position, _, _)| *position);

    fields
        .into_iter()
        .find_map(|(_, field, errs)| {
            errs.iter()
                .min_by_key(|e| rule_rank(e))
                .map(|e| message_for(field, e))
        })
        .unwrap_or_else(|| "Request is not valid.".to_string())
}

fn rule_rank(error: &ValidationError) -> u8 {
    match &*error.code {
        "required" => 0,
        field::CODE_TYPE => 1,
        field::CODE_EMPTY => 2,
        "length" => 3,
        _ => 4,
    }
}

fn message_for(field: &str, error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("{} is invalid", field))
}
