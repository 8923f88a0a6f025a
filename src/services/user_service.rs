//! User service - read access to user profiles.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::User;
use crate::errors::{AppResult, OptionExt};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Check that the user store is reachable
    async fn health_check(&self) -> AppResult<()>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserService for UserManager {
    #[instrument(skip(self))]
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_user_not_found()
    }

    async fn health_check(&self) -> AppResult<()> {
        self.users.ping().await
    }
}
