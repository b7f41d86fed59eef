//! DTOs for the admin endpoints.

use crate::domain::entities::{Link, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user as seen by an admin. Token hashes never leave the database layer.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// A link in the platform-wide moderation listing, including its owner.
#[derive(Debug, Serialize)]
pub struct AdminLinkResponse {
    pub id: i64,
    pub user_id: i64,
    pub short_code: String,
    pub target_url: String,
    pub is_active: bool,
    pub clicks_count: i64,
    pub created_at: DateTime<Utc>,
}

impl AdminLinkResponse {
    pub fn from_link(link: &Link) -> Self {
        Self {
            id: link.id,
            user_id: link.user_id,
            short_code: link.short_code.clone(),
            target_url: link.target_url.clone(),
            is_active: link.is_active,
            clicks_count: link.clicks_count,
            created_at: link.created_at,
        }
    }
}
