//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, Statement,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User record store.
///
/// Emails are stored and looked up exactly as given; callers lowercase them.
/// `create` must fail with `AppError::DuplicateEmail` when the email is
/// already taken, and that check must be atomic with the insert.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user; the store assigns the ID
    async fn create(&self, username: String, email: String, password: Password) -> AppResult<User>;

    /// Replace the stored password hash of an existing user
    async fn update_password(&self, id: Uuid, password: Password) -> AppResult<User>;

    /// Check store connectivity
    async fn ping(&self) -> AppResult<()>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, username: String, email: String, password: Password) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username),
            email: Set(email),
            password_hash: Set(password.into_string()),
        };

        // The unique index on email settles concurrent registrations
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from_insert)?;
        Ok(User::from(model))
    }

    async fn update_password(&self, id: Uuid, password: Password) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let mut active: ActiveModel = user.into();
        active.password_hash = Set(password.into_string());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn ping(&self) -> AppResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
