//! User entity, the owning side of links and QR codes.

use chrono::{DateTime, Utc};

/// A platform user, authenticated by an API token stored as an HMAC hash.
///
/// Inactive users fail authentication. Deleting a user cascades to their
/// links and QR codes.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub token_hash: String,
}

/// The verified identity attached to an authenticated request.
///
/// Produced by the auth middleware and read by handlers via request
/// extensions. Carries only what handlers need for ownership and role checks.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}
