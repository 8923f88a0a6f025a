//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and the user store. They depend on
//! the `UserRepository` trait, so tests can swap in any store.

mod auth_service;
pub mod token_service;
mod user_service;

pub use auth_service::{AuthService, Authenticator, LoginOutcome, LoginResponse};
pub use token_service::{Claims, TokenIssuer};
pub use user_service::{UserManager, UserService};
