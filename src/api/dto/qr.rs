//! DTOs for QR code endpoints.

use crate::application::services::CreateQr;
use crate::domain::entities::QrCodeRecord;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static pattern compiles"));

static EC_LEVEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[LMQH]$").expect("static pattern compiles"));

static STYLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(square|rounded|dots|circle)$").expect("static pattern compiles"));

/// Request to create or preview a QR code.
///
/// Exactly one content source is used: `link_id` wins over `content` and
/// encodes the link's short URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQrRequest {
    pub link_id: Option<i64>,

    #[validate(length(min = 1, max = 2000))]
    pub content: Option<String>,

    #[validate(length(max = 200))]
    pub title: Option<String>,

    #[serde(default = "default_foreground")]
    #[validate(regex(path = "*HEX_COLOR_REGEX", message = "must be #RRGGBB"))]
    pub foreground_color: String,

    #[serde(default = "default_background")]
    #[validate(regex(path = "*HEX_COLOR_REGEX", message = "must be #RRGGBB"))]
    pub background_color: String,

    #[serde(default = "default_style")]
    #[validate(regex(
        path = "*STYLE_REGEX",
        message = "must be square, rounded, dots or circle"
    ))]
    pub style: String,

    /// Pixels per module.
    #[serde(default = "default_box_size")]
    #[validate(range(min = 5, max = 20))]
    pub box_size: i32,

    /// Quiet zone width in modules.
    #[serde(default = "default_border_size")]
    #[validate(range(min = 0, max = 10))]
    pub border_size: i32,

    /// Requested level; forced to H when a logo is present.
    #[serde(default = "default_error_correction")]
    #[validate(regex(path = "*EC_LEVEL_REGEX", message = "must be one of L, M, Q, H"))]
    pub error_correction: String,

    /// Base64 image data, optionally with a data-URI prefix.
    pub logo_base64: Option<String>,
}

fn default_foreground() -> String {
    "#000000".to_string()
}

fn default_background() -> String {
    "#FFFFFF".to_string()
}

fn default_style() -> String {
    "square".to_string()
}

fn default_box_size() -> i32 {
    10
}

fn default_border_size() -> i32 {
    4
}

fn default_error_correction() -> String {
    "M".to_string()
}

impl CreateQrRequest {
    pub fn into_input(self) -> CreateQr {
        CreateQr {
            link_id: self.link_id,
            content: self.content,
            title: self.title,
            foreground_color: self.foreground_color,
            background_color: self.background_color,
            style: self.style,
            box_size: self.box_size,
            border_size: self.border_size,
            error_correction: self.error_correction,
            logo_base64: self.logo_base64,
        }
    }
}

/// Title is the only mutable field; style changes mean a new QR code.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQrRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,
}

/// Query parameters for listing QR codes.
#[derive(Debug, Deserialize, Validate)]
pub struct ListQrQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,

    #[serde(default = "super::pagination::default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,

    /// Substring match on title or content.
    #[validate(length(max = 200))]
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QrResponse {
    pub id: i64,
    pub link_id: Option<i64>,
    pub content: String,
    pub title: Option<String>,
    /// Base64 PNG without a data-URI prefix.
    pub image_base64: String,
    pub foreground_color: String,
    pub background_color: String,
    pub style: String,
    pub box_size: i32,
    pub border_size: i32,
    pub error_correction: String,
    pub has_logo: bool,
    pub downloads_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QrResponse {
    pub fn from_record(record: &QrCodeRecord) -> Self {
        Self {
            id: record.id,
            link_id: record.link_id,
            content: record.content.clone(),
            title: record.title.clone(),
            image_base64: record.image_base64.clone(),
            foreground_color: record.foreground_color.clone(),
            background_color: record.background_color.clone(),
            style: record.style.clone(),
            box_size: record.box_size,
            border_size: record.border_size,
            error_correction: record.error_correction.clone(),
            has_logo: record.logo_base64.is_some(),
            downloads_count: record.downloads_count,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QrListResponse {
    pub items: Vec<QrResponse>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct QrPreviewResponse {
    pub image_base64: String,
    pub content: String,
}
