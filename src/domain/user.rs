//! User domain entity and related types.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::Password;

/// User domain entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Always lowercase
    pub email: String,
    pub password: Password,
}

impl User {
    pub fn new(id: Uuid, username: String, email: String, password: Password) -> Self {
        Self {
            id,
            username,
            email,
            password,
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Display name
    #[schema(example = "al")]
    pub username: String,
    /// Lowercased email address
    #[schema(example = "al@x.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_never_carries_the_hash() {
        let user = User::new(
            Uuid::new_v4(),
            "al".to_string(),
            "al@x.com".to_string(),
            Password::from_hash("$argon2id$v=19$m=19456,t=1,p=1$c2FsdA$aGFzaA"),
        );

        let json = serde_json::to_value(UserResponse::from(user.clone())).unwrap();
        assert_eq!(json["username"], "al");
        assert_eq!(json["email"], "al@x.com");
        assert_eq!(json["id"], user.id.to_string());
        assert!(json.get("password").is_none());
        assert!(!json.to_string().contains("argon2"));
    }
}
