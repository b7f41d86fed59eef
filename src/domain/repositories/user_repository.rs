//! Repository trait for user records and token-based identity lookup.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for users.
///
/// The authentication collaborator consumes only
/// [`UserRepository::find_by_token_hash`]; the remaining operations serve
/// the admin API and startup bootstrap.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user whose stored token hash matches. Inactive users are
    /// filtered out here so callers never see them as authenticated.
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<User>, AppError>;

    /// Creates the user if the username is free, otherwise refreshes the
    /// stored token hash. Used once at startup for the admin account.
    async fn upsert_by_username(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Lists users, newest first.
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<User>, AppError>;

    /// Sets a user's active flag. Returns `Ok(false)` if the user is unknown.
    async fn set_active(&self, id: i64, is_active: bool) -> Result<bool, AppError>;

    /// Deletes a user, cascading to their links and QR codes.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
