//! Domain layer - Core business entities and logic
//!
//! The user entity and the password value object. Nothing here touches
//! HTTP or the database.

pub mod password;
pub mod user;

pub use password::{Password, PasswordHasher};
pub use user::{User, UserResponse};
