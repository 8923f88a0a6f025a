//! Auth API - user accounts over HTTP
//!
//! Registration, login with signed identity tokens, password change and
//! profile lookup, backed by a Postgres user store.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity and password value object
//! - **validation**: Request payload schemas and rule checking
//! - **services**: Authentication, token and user use cases
//! - **infra**: Database connection, migrations and user store
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//! - **telemetry**: Tracing helpers
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod telemetry;
pub mod types;
pub mod validation;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, PasswordHasher, User, UserResponse};
pub use errors::{AppError, AppResult};
