//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// The store is treated as a transactional key-value-like mapping from short
/// code to link record. Short-code uniqueness is enforced by a storage-level
/// unique constraint; the code generator's pre-check is an optimization only.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - In-memory implementation in `tests/common` for integration tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken
    /// (unique-constraint violation) and [`AppError::Internal`] on other
    /// database errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by owner and exact target URL.
    ///
    /// Used to dedupe identical submissions per user: a second shorten
    /// request for the same target returns the existing link.
    async fn find_by_owner_and_target(
        &self,
        user_id: i64,
        target_url: &str,
    ) -> Result<Option<Link>, AppError>;

    /// Finds a link by id, scoped to its owner.
    ///
    /// An ownership mismatch yields `Ok(None)`, indistinguishable from a
    /// missing record.
    async fn find_by_id_for_owner(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Link>, AppError>;

    /// Lists an owner's links, newest first.
    ///
    /// `search` matches short code, target URL, or title (substring);
    /// `active_only` filters out disabled links.
    async fn list_for_owner(
        &self,
        user_id: i64,
        skip: i64,
        limit: i64,
        search: Option<String>,
        active_only: bool,
    ) -> Result<Vec<Link>, AppError>;

    /// Lists links platform-wide, newest first. Admin use only.
    async fn list_all(&self, skip: i64, limit: i64) -> Result<Vec<Link>, AppError>;

    /// Partially updates a link owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `id` + owner.
    async fn update(&self, id: i64, user_id: i64, patch: LinkPatch) -> Result<Link, AppError>;

    /// Deletes a link owned by `user_id`, cascading to its click events.
    ///
    /// Returns `Ok(true)` if a row was deleted.
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError>;

    /// Deletes a link regardless of owner. Admin use only.
    async fn delete_any(&self, id: i64) -> Result<bool, AppError>;

    /// Counts an owner's links; `active_only` restricts to enabled ones.
    async fn count_for_owner(&self, user_id: i64, active_only: bool) -> Result<i64, AppError>;

    /// Sums the click counters across an owner's links.
    async fn total_clicks_for_owner(&self, user_id: i64) -> Result<i64, AppError>;

    /// Returns the owner's most-clicked link, if any.
    async fn top_link_for_owner(&self, user_id: i64) -> Result<Option<Link>, AppError>;
}
