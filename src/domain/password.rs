//! Password value object - credential hashing and verification.
//!
//! Hashes are Argon2id PHC strings. The iteration count is the tunable work
//! factor; memory and parallelism stay at the Argon2 defaults. Verification
//! reads the parameters back out of the stored hash, so hashes produced with
//! an older work factor keep verifying after the setting changes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::errors::{AppError, AppResult};

/// Hashed password as stored at rest.
///
/// There is no way to build one from plain text other than hashing it.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Wrap an existing hash (from the database).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Check `plain_text` against this hash.
    ///
    /// A value that does not parse as a PHC hash never matches.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "stored password is not a valid hash");
                false
            }
        }
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

/// Salted one-way hasher with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    work_factor: u32,
}

impl PasswordHasher {
    /// Create a hasher; `work_factor` is the Argon2 iteration count (>= 1).
    pub fn new(work_factor: u32) -> Self {
        Self { work_factor }
    }

    /// Hash `plain_text` with a fresh random salt.
    pub fn hash(&self, plain_text: &str) -> AppResult<Password> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()?
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(Password::from_hash(hash.to_string()))
    }

    fn argon2(&self) -> AppResult<Argon2<'static>> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            self.work_factor,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| AppError::internal(format!("Invalid hashing parameters: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}
