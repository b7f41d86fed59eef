//! Repository trait for click event persistence and analytics queries.

use crate::domain::entities::{Click, ClickBreakdown, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click tracking.
///
/// The write path is a single operation, [`ClickRepository::record_visit`],
/// which persists the event and increments the parent link's counter in one
/// transaction. There is deliberately no separate increment operation:
/// partial state (event without increment or vice versa) must be impossible.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records a visit: inserts the click event and atomically increments
    /// the link's `clicks_count` by exactly 1, in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if either write fails; in that case
    /// neither is committed.
    async fn record_visit(&self, new_click: NewClick) -> Result<(), AppError>;

    /// Counts click events for a link.
    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError>;

    /// Aggregates device / browser / referrer breakdowns for a link.
    async fn breakdown_for_link(&self, link_id: i64) -> Result<ClickBreakdown, AppError>;

    /// Lists a link's most recent clicks, newest first.
    async fn recent_for_link(
        &self,
        link_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Click>, AppError>;
}
