//! Authentication service - registration, login and password change.
//!
//! Every operation validates its payload first and reports the first
//! violated rule. Emails are lowercased before they reach the store.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

use super::token_service::{Claims, TokenIssuer};
use crate::config::Config;
use crate::domain::{Password, PasswordHasher, User, UserResponse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;
use crate::telemetry::spawn_blocking_with_tracing;
use crate::validation::{ChangePasswordRequest, LoginRequest, RegisterRequest};

/// Successful login: a signed token plus the user it identifies.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Login response body
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed identity token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub user: UserResponse,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            token: outcome.token,
            user: outcome.user.into(),
        }
    }
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account from a registration payload
    async fn register(&self, request: RegisterRequest) -> AppResult<User>;

    /// Check credentials and issue a token
    async fn login(&self, request: LoginRequest) -> AppResult<LoginOutcome>;

    /// Replace the password of the token's user after checking the old one
    async fn change_password(&self, request: ChangePasswordRequest) -> AppResult<User>;

    /// Verify a token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Build from configuration: hash work factor and token secret.
    pub fn from_config(users: Arc<dyn UserRepository>, config: &Config) -> Self {
        Self::new(
            users,
            PasswordHasher::new(config.hash_work_factor),
            TokenIssuer::from_config(config),
        )
    }

    /// Hash on the blocking pool; Argon2 would otherwise stall the worker.
    async fn hash_password(&self, plain: String) -> AppResult<Password> {
        let hasher = self.hasher;
        spawn_blocking_with_tracing(move || hasher.hash(&plain))
            .await
            .map_err(|e| AppError::internal(format!("password hashing task failed: {}", e)))?
    }

    async fn verify_password(password: Password, plain: String) -> AppResult<bool> {
        spawn_blocking_with_tracing(move || password.verify(&plain))
            .await
            .map_err(|e| AppError::internal(format!("password verification task failed: {}", e)))
    }
}

#[async_trait]
impl AuthService for Authenticator {
    #[instrument(skip_all)]
    async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        let account = request.validated()?;
        let email = account.email.to_lowercase();

        let password = self.hash_password(account.password).await?;
        let user = self.users.create(account.username, email, password).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    #[instrument(skip_all)]
    async fn login(&self, request: LoginRequest) -> AppResult<LoginOutcome> {
        let credentials = request.validated()?;
        let email = credentials.email.to_lowercase();

        let user = self.users.find_by_email(&email).await?.ok_or_user_not_found()?;

        if !Self::verify_password(user.password.clone(), credentials.password).await? {
            tracing::info!(user_id = %user.id, "login rejected: password mismatch");
            return Err(AppError::PasswordMismatch);
        }

        let token = self.tokens.issue(&Claims::new(user.id, user.username.clone()))?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(LoginOutcome { token, user })
    }

    #[instrument(skip_all)]
    async fn change_password(&self, request: ChangePasswordRequest) -> AppResult<User> {
        let change = request.validated()?;

        // Hashed before any identity check; the outcome does not depend on order
        let new_password = self.hash_password(change.new_password).await?;

        let claims = self.tokens.verify(&change.token)?;
        let user = self.users.find_by_id(claims.id).await?.ok_or_user_not_found()?;

        if !Self::verify_password(user.password.clone(), change.old_password).await? {
            tracing::info!(user_id = %user.id, "password change rejected: old password mismatch");
            return Err(AppError::PasswordMismatch);
        }

        let updated = self.users.update_password(user.id, new_password).await?;
        tracing::info!(user_id = %updated.id, "password changed");
        Ok(updated)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.tokens.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;
    use mockall::predicate::*;
    use uuid::Uuid;

    const SECRET: &[u8] = b"test-secret-key-for-testing-only";

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(1)
    }

    fn service(mock: MockUserRepository) -> Authenticator {
        Authenticator::new(Arc::new(mock), hasher(), TokenIssuer::new(SECRET))
    }

    fn stored_user(id: Uuid, password: &str) -> User {
        User::new(
            id,
            "al".to_string(),
            "al@x.com".to_string(),
            hasher().hash(password).unwrap(),
        )
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            username: Some("al".into()),
            email: Some(email.into()),
            password: Some("ab12".into()),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    fn change_request(old: &str, new: &str, token: &str) -> ChangePasswordRequest {
        ChangePasswordRequest {
            old_password: Some(old.into()),
            new_password: Some(new.into()),
            token: Some(token.into()),
        }
    }

    #[tokio::test]
    async fn test_register_lowercases_email_and_hashes_password() {
        let mut mock = MockUserRepository::new();
        mock.expect_create()
            .withf(|username, email, password| {
                username == "al" && email == "al@x.com" && password.verify("ab12")
            })
            .times(1)
            .returning(|username, email, password| {
                Ok(User::new(Uuid::new_v4(), username, email, password))
            });

        let user = service(mock).register(register_request("Al@X.com")).await.unwrap();

        assert_eq!(user.email, "al@x.com");
        assert_ne!(user.password.as_str(), "ab12");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut mock = MockUserRepository::new();
        mock.expect_create()
            .returning(|_, _, _| Err(AppError::DuplicateEmail));

        let result = service(mock).register(register_request("al@x.com")).await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_register_invalid_payload_never_reaches_store() {
        let mut mock = MockUserRepository::new();
        mock.expect_create().times(0);

        let result = service(mock).register(register_request("not-an-email")).await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == "Email is not valid."));
    }

    #[tokio::test]
    async fn test_login_success_issues_verifiable_token() {
        let id = Uuid::new_v4();
        let user = stored_user(id, "ab12");
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_email()
            .withf(|email| email == "al@x.com")
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(mock);
        let outcome = service.login(login_request("AL@x.COM", "ab12")).await.unwrap();

        let claims = service.verify_token(&outcome.token).unwrap();
        assert_eq!(claims.id, id);
        assert_eq!(claims.username, "al");
        assert_eq!(outcome.user.id, id);
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_email().returning(|_| Ok(None));

        let result = service(mock).login(login_request("nobody@x.com", "ab12")).await;

        assert!(matches!(result, Err(AppError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = stored_user(Uuid::new_v4(), "ab12");
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(mock).login(login_request("al@x.com", "zz99")).await;

        assert!(matches!(result, Err(AppError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn test_change_password_success() {
        let id = Uuid::new_v4();
        let user = stored_user(id, "ab12");
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(user.clone())));
        mock.expect_update_password()
            .withf(move |user_id, password| *user_id == id && password.verify("cd34"))
            .times(1)
            .returning(|id, password| {
                Ok(User::new(id, "al".to_string(), "al@x.com".to_string(), password))
            });

        let service = service(mock);
        let token = service.tokens.issue(&Claims::new(id, "al")).unwrap();
        let updated = service
            .change_password(change_request("ab12", "cd34", &token))
            .await
            .unwrap();

        assert!(updated.password.verify("cd34"));
        assert!(!updated.password.verify("ab12"));
    }

    #[tokio::test]
    async fn test_change_password_invalid_token() {
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_id().times(0);
        mock.expect_update_password().times(0);

        let result = service(mock)
            .change_password(change_request("ab12", "cd34", "garbage"))
            .await;

        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_change_password_token_for_missing_user() {
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));

        let service = service(mock);
        let token = service.tokens.issue(&Claims::new(Uuid::new_v4(), "ghost")).unwrap();
        let result = service
            .change_password(change_request("ab12", "cd34", &token))
            .await;

        assert!(matches!(result, Err(AppError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_change_password_wrong_old_password_keeps_hash() {
        let id = Uuid::new_v4();
        let user = stored_user(id, "ab12");
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        mock.expect_update_password().times(0);

        let service = service(mock);
        let token = service.tokens.issue(&Claims::new(id, "al")).unwrap();
        let result = service
            .change_password(change_request("wrong", "cd34", &token))
            .await;

        assert!(matches!(result, Err(AppError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn test_change_password_missing_token_is_validation_error() {
        let mock = MockUserRepository::new();
        let request = ChangePasswordRequest {
            old_password: Some("ab12".into()),
            new_password: Some("cd34".into()),
            token: None,
        };

        let result = service(mock).change_password(request).await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == "Token is required"));
    }

    #[test]
    fn test_login_response_hides_hash() {
        let user = User::new(
            Uuid::new_v4(),
            "al".to_string(),
            "al@x.com".to_string(),
            Password::from_hash("$argon2id$secret"),
        );
        let body = serde_json::to_value(LoginResponse::from(LoginOutcome {
            token: "t".to_string(),
            user,
        }))
        .unwrap();

        assert_eq!(body["token"], "t");
        assert_eq!(body["user"]["username"], "al");
        assert!(!body.to_string().contains("argon2"));
    }
}
