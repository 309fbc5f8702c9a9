//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vigil_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`SafeUser`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// User representation safe for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct SafeUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for SafeUser {
    fn from(user: User) -> Self {
        SafeUser {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. Email must already be lowercased.
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub password_hash: String,
}
