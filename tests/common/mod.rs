//! Shared fixtures for integration tests.
//!
//! `MemoryStore` stands in for the Postgres user store: same contract,
//! including the atomic unique-email check on insert.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use auth_api::api::{create_router, AppState};
use auth_api::config::Config;
use auth_api::errors::{AppError, AppResult};
use auth_api::infra::UserRepository;
use auth_api::services::Authenticator;
use auth_api::{Password, User};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// In-memory user store keyed by id
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, username: String, email: String, password: Password) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == email) {
            return Err(AppError::DuplicateEmail);
        }
        let user = User::new(Uuid::new_v4(), username, email, password);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: Uuid, password: Password) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(&id).ok_or(AppError::UserNotFound)?;
        user.password = password;
        Ok(user.clone())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Configuration with a cheap hash so tests stay fast.
pub fn test_config() -> Config {
    Config::default()
        .with_token_secret(TEST_SECRET)
        .with_hash_work_factor(1)
}

pub fn authenticator(store: Arc<MemoryStore>) -> Authenticator {
    Authenticator::from_config(store, &test_config())
}

/// Full application router over an in-memory store.
pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::from_config(store.clone(), &test_config());
    (create_router(state, "tests/no-static-dir"), store)
}
