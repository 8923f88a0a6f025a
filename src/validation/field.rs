//! Request field values of any JSON type.
//!
//! Payload fields are captured as whatever JSON the client sent, so a
//! wrong-typed value is reported by the schema rules in field order rather
//! than failing deserialization of the whole body.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use validator::{ValidateEmail, ValidateLength, ValidationError};

/// Error codes for the type and emptiness rules
pub const CODE_TYPE: &str = "type";
pub const CODE_EMPTY: &str = "empty";
pub const CODE_PATTERN: &str = "regex";

/// A single payload field as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

/// Deserialize a present key, keeping an explicit `null` as a value.
///
/// Paired with `#[serde(default)]` so only a missing key becomes `None`.
pub fn provided<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    FieldValue::deserialize(deserializer).map(Some)
}

// Format rules only judge text; other types are left to the type rule.

impl ValidateLength<u64> for FieldValue {
    fn length(&self) -> Option<u64> {
        self.as_text().map(|text| text.chars().count() as u64)
    }
}

impl ValidateEmail for FieldValue {
    fn validate_email(&self) -> bool {
        match self.as_text() {
            Some(text) => text.validate_email() && has_domain_segments(text),
            None => true,
        }
    }

    fn as_email_string(&self) -> Option<Cow<str>> {
        self.as_text().map(Cow::from)
    }
}

/// The domain must have at least two labels (`x.com`, not `localhost`).
fn has_domain_segments(email: &str) -> bool {
    email
        .rsplit_once('@')
        .map(|(_, domain)| {
            let labels: Vec<&str> = domain.split('.').collect();
            labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
        })
        .unwrap_or(false)
}

pub(crate) fn text(value: &FieldValue) -> Result<(), ValidationError> {
    match value {
        FieldValue::Text(_) => Ok(()),
        _ => Err(ValidationError::new(CODE_TYPE)),
    }
}

pub(crate) fn text_or_number(value: &FieldValue) -> Result<(), ValidationError> {
    match value {
        FieldValue::Text(_) | FieldValue::Number(_) => Ok(()),
        FieldValue::Other(_) => Err(ValidationError::new(CODE_TYPE)),
    }
}

/// Text must match `pattern` in full; other types pass.
pub(crate) fn matches(value: &FieldValue, pattern: &Regex) -> Result<(), ValidationError> {
    match value.as_text() {
        Some(text) if !pattern.is_match(text) => Err(ValidationError::new(CODE_PATTERN)),
        _ => Ok(()),
    }
}

pub(crate) fn not_empty(value: &FieldValue) -> Result<(), ValidationError> {
    match value {
        FieldValue::Text(text) if text.is_empty() => Err(ValidationError::new(CODE_EMPTY)),
        _ => Ok(()),
    }
}
