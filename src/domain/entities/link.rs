//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its metadata and aggregate click counter.
///
/// The short code is unique platform-wide and immutable once assigned.
/// `clicks_count` is mutated only by the redirect path, via an atomic SQL
/// increment in the same transaction as the click event insert.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub user_id: i64,
    pub short_code: String,
    pub target_url: String,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() > e)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub user_id: i64,
    pub short_code: String,
    pub target_url: String,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Partial update for an existing link. `None` fields are left unchanged.
///
/// The short code and target URL are immutable after creation.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub is_active: Option<bool>,
    pub tags: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_link(expires_at: Option<DateTime<Utc>>) -> Link {
        let now = Utc::now();
        Link {
            id: 1,
            user_id: 7,
            short_code: "aBc234".to_string(),
            target_url: "https://example.com".to_string(),
            title: None,
            tags: None,
            is_active: true,
            expires_at,
            clicks_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_link_without_expiry_is_not_expired() {
        assert!(!sample_link(None).is_expired());
    }

    #[test]
    fn test_link_past_expiry_is_expired() {
        let link = sample_link(Some(Utc::now() - Duration::seconds(1)));
        assert!(link.is_expired());
    }

    #[test]
    fn test_link_future_expiry_is_not_expired() {
        let link = sample_link(Some(Utc::now() + Duration::hours(1)));
        assert!(!link.is_expired());
    }
}
