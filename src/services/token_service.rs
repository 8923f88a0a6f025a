//! Token issuing and verification.
//!
//! Tokens are HS256 JWTs carrying the user id and username. They carry no
//! expiry and there is no revocation list: a token stays valid for as long
//! as the signing secret does.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Token claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub username: String,
    /// Issued at (unix seconds)
    pub iat: i64,
}

impl Claims {
    /// Claims for `id`/`username`, stamped with the current time.
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            iat: Utc::now().timestamp(),
        }
    }
}

/// Signs and verifies identity tokens with a server-held secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.token_secret_bytes())
    }

    /// Sign `claims` into a URL-safe token.
    pub fn issue(&self, claims: &Claims) -> AppResult<String> {
        let token = encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;
        tracing::debug!(user_id = %claims.id, "token issued");
        Ok(token)
    }

    /// Check the signature of `token` and return its claims.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::warn!(error = %e, "token rejected");
            AppError::InvalidToken
        })?;
        Ok(data.claims)
    }
}
