//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_HASH_WORK_FACTOR, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_STATIC_DIR, DEFAULT_TOKEN_SECRET,
};

/// Application configuration.
///
/// Built once at process start and handed to the services that need it;
/// nothing below `main` reads the environment.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    token_secret: String,
    pub hash_work_factor: u32,
    pub server_host: String,
    pub server_port: u16,
    pub static_dir: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("token_secret", &"[REDACTED]")
            .field("hash_work_factor", &self.hash_work_factor)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            token_secret: DEFAULT_TOKEN_SECRET.to_string(),
            hash_work_factor: DEFAULT_HASH_WORK_FACTOR,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Falls back to an embedded token secret when `TOKEN_SECRET` is unset.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let token_secret = env::var("TOKEN_SECRET").unwrap_or_else(|_| {
            tracing::warn!("TOKEN_SECRET not set, using insecure embedded default");
            DEFAULT_TOKEN_SECRET.to_string()
        });

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            token_secret,
            hash_work_factor: env::var("HASH_WORK_FACTOR")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|factor: &u32| *factor > 0)
                .unwrap_or(DEFAULT_HASH_WORK_FACTOR),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .or_else(|_| env::var("PORT"))
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string()),
        }
    }

    /// Replace the database URL.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    /// Replace the token secret.
    pub fn with_token_secret(mut self, secret: impl Into<String>) -> Self {
        self.token_secret = secret.into();
        self
    }

    /// Replace the hashing work factor.
    pub fn with_hash_work_factor(mut self, work_factor: u32) -> Self {
        self.hash_work_factor = work_factor;
        self
    }

    /// Get token secret bytes for signing/verification.
    pub fn token_secret_bytes(&self) -> &[u8] {
        self.token_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
