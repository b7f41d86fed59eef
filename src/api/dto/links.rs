//! DTOs for link management endpoints.

use crate::application::services::CreateLink;
use crate::domain::entities::{Link, LinkPatch};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for custom code validation.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]{3,20}$").expect("static pattern compiles"));

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The destination URL. A missing scheme gets `https://` prepended.
    #[validate(length(min = 1, max = 2048))]
    pub target_url: String,

    /// Optional vanity code instead of a generated one.
    #[validate(regex(
        path = "*CUSTOM_CODE_REGEX",
        message = "must be 3-20 characters: letters, digits and hyphen only"
    ))]
    pub custom_code: Option<String>,

    #[validate(length(max = 200))]
    pub title: Option<String>,

    /// Free-form comma-separated tags.
    #[validate(length(max = 500))]
    pub tags: Option<String>,

    /// After this time the link answers 410 Gone.
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateLinkRequest {
    pub fn into_input(self) -> CreateLink {
        CreateLink {
            target_url: self.target_url,
            custom_code: self.custom_code,
            title: self.title,
            tags: self.tags,
            expires_at: self.expires_at,
        }
    }
}

/// Partial update for a link. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,

    pub is_active: Option<bool>,

    #[validate(length(max = 500))]
    pub tags: Option<String>,
}

impl UpdateLinkRequest {
    pub fn into_patch(self) -> LinkPatch {
        LinkPatch {
            title: self.title,
            is_active: self.is_active,
            tags: self.tags,
        }
    }
}

/// Query parameters for listing links.
#[derive(Debug, Deserialize, Validate)]
pub struct ListLinksQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,

    #[serde(default = "super::pagination::default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,

    /// Substring match on short code, target URL, or title.
    #[validate(length(max = 200))]
    pub search: Option<String>,

    #[serde(default)]
    pub active_only: bool,
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
    pub target_url: String,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: &Link, short_url: String) -> Self {
        Self {
            id: link.id,
            short_code: link.short_code.clone(),
            short_url,
            target_url: link.target_url.clone(),
            title: link.title.clone(),
            tags: link.tags.clone(),
            is_active: link.is_active,
            expires_at: link.expires_at,
            clicks_count: link.clicks_count,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub items: Vec<LinkResponse>,
    pub skip: i64,
    pub limit: i64,
}
