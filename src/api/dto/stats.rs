//! DTOs for analytics endpoints.

use super::links::LinkResponse;
use crate::domain::entities::{BucketCount, Click};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for the recent-clicks portion of link stats.
#[derive(Debug, Deserialize, Validate)]
pub struct RecentClicksQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub recent_offset: i64,

    #[serde(default = "default_recent_limit")]
    #[validate(range(min = 1, max = 100))]
    pub recent_limit: i64,
}

fn default_recent_limit() -> i64 {
    20
}

/// One recorded visit, without the raw user agent.
#[derive(Debug, Serialize)]
pub struct ClickResponse {
    pub clicked_at: DateTime<Utc>,
    pub device_type: String,
    pub browser: String,
    pub os: String,
    pub referrer: Option<String>,
}

impl ClickResponse {
    pub fn from_click(click: &Click) -> Self {
        Self {
            clicked_at: click.clicked_at,
            device_type: click.device_type.clone(),
            browser: click.browser.clone(),
            os: click.os.clone(),
            referrer: click.referrer.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LinkStatsResponse {
    pub link: LinkResponse,
    pub total_clicks: i64,
    pub by_device: Vec<BucketCount>,
    pub by_browser: Vec<BucketCount>,
    pub by_referrer: Vec<BucketCount>,
    pub recent: Vec<ClickResponse>,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub total_links: i64,
    pub active_links: i64,
    pub total_clicks: i64,
    pub top_link: Option<LinkResponse>,
}
