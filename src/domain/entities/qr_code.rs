//! QR code entity: stored render plus the style parameters that produced it.

use chrono::{DateTime, Utc};

/// A stored QR code with its rendered PNG payload and style parameters.
///
/// `content` is derived (base URL + short code) when the record is linked to
/// a [`super::Link`]; only `title` is mutable after creation. A style change
/// means creating a new record. `link_id` is a non-owning reference: deleting
/// the link nulls it without deleting the QR code.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QrCodeRecord {
    pub id: i64,
    pub user_id: i64,
    pub link_id: Option<i64>,
    pub content: String,
    pub title: Option<String>,
    /// Base64-encoded PNG, without a data-URI prefix.
    pub image_base64: String,
    pub foreground_color: String,
    pub background_color: String,
    pub style: String,
    pub box_size: i32,
    pub border_size: i32,
    /// Effective error-correction level (one of L/M/Q/H). Always "H" when a
    /// logo is embedded, regardless of the requested level.
    pub error_correction: String,
    pub logo_base64: Option<String>,
    pub downloads_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for storing a new QR code.
#[derive(Debug, Clone)]
pub struct NewQrCode {
    pub user_id: i64,
    pub link_id: Option<i64>,
    pub content: String,
    pub title: Option<String>,
    pub image_base64: String,
    pub foreground_color: String,
    pub background_color: String,
    pub style: String,
    pub box_size: i32,
    pub border_size: i32,
    pub error_correction: String,
    pub logo_base64: Option<String>,
}
