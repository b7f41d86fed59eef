//! Click event entity for redirect analytics.

use chrono::{DateTime, Utc};

/// One immutable record of a single redirect visit.
///
/// Click events are never updated or deleted individually; they are only
/// cascade-deleted with their parent link.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub device_type: String,
    pub browser: String,
    pub os: String,
    pub ip: Option<String>,
}

/// Input data for recording a click, produced by the click recorder from
/// raw request signals.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub device_type: String,
    pub browser: String,
    pub os: String,
    pub ip: Option<String>,
}

/// A single bucket of an analytics breakdown, e.g. ("mobile", 42).
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct BucketCount {
    pub value: String,
    pub count: i64,
}

/// Aggregated analytics for one link.
#[derive(Debug, Clone)]
pub struct ClickBreakdown {
    pub total: i64,
    pub by_device: Vec<BucketCount>,
    pub by_browser: Vec<BucketCount>,
    pub by_referrer: Vec<BucketCount>,
}
