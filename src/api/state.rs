//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::UserRepository;
use crate::services::{AuthService, Authenticator, UserManager, UserService};

/// Application state containing all services.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    /// Wire services over a user store using the given configuration.
    pub fn from_config(users: Arc<dyn UserRepository>, config: &Config) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::from_config(users.clone(), config)),
            user_service: Arc::new(UserManager::new(users)),
        }
    }
}
