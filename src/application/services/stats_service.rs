//! Analytics aggregation for links and per-user overviews.

use crate::domain::entities::{Click, ClickBreakdown, CurrentUser, Link};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// Detailed statistics for one link.
pub struct LinkStats {
    pub link: Link,
    pub breakdown: ClickBreakdown,
    pub recent: Vec<Click>,
}

/// Account-wide summary numbers.
pub struct Overview {
    pub total_links: i64,
    pub active_links: i64,
    pub total_clicks: i64,
    pub top_link: Option<Link>,
}

pub struct StatsService {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
}

impl StatsService {
    pub fn new(links: Arc<dyn LinkRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self { links, clicks }
    }

    /// Full statistics for one of the caller's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids and for links owned
    /// by someone else.
    pub async fn link_stats(
        &self,
        user: &CurrentUser,
        link_id: i64,
        recent_limit: i64,
        recent_offset: i64,
    ) -> Result<LinkStats, AppError> {
        let link = self
            .links
            .find_by_id_for_owner(link_id, user.id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": link_id })))?;

        let breakdown = self.clicks.breakdown_for_link(link.id).await?;
        let recent = self
            .clicks
            .recent_for_link(link.id, recent_limit, recent_offset)
            .await?;

        Ok(LinkStats {
            link,
            breakdown,
            recent,
        })
    }

    /// Account-wide totals for the caller.
    pub async fn overview(&self, user: &CurrentUser) -> Result<Overview, AppError> {
        let total_links = self.links.count_for_owner(user.id, false).await?;
        let active_links = self.links.count_for_owner(user.id, true).await?;
        let total_clicks = self.links.total_clicks_for_owner(user.id).await?;
        let top_link = self.links.top_link_for_owner(user.id).await?;

        Ok(Overview {
            total_links,
            active_links,
            total_clicks,
            top_link,
        })
    }
}
