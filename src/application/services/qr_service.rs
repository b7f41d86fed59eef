//! QR code lifecycle: render-and-store, preview, downloads, CRUD.

use crate::domain::entities::{CurrentUser, NewQrCode, QrCodeRecord};
use crate::domain::repositories::{LinkRepository, QrRepository};
use crate::error::AppError;
use crate::qr::{QrStyle, RenderOptions, color::hex_to_rgb, ec_level, logo, raster, svg};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use qrcode::EcLevel;
use serde_json::json;
use std::sync::Arc;

/// Per-user cap on stored QR codes.
pub const MAX_QR_PER_USER: i64 = 50;

/// Validated input for creating or previewing a QR code.
#[derive(Debug, Clone)]
pub struct CreateQr {
    /// When set, the encoded content is the link's short URL and `content`
    /// is ignored.
    pub link_id: Option<i64>,
    pub content: Option<String>,
    pub title: Option<String>,
    pub foreground_color: String,
    pub background_color: String,
    pub style: String,
    pub box_size: i32,
    pub border_size: i32,
    pub error_correction: String,
    pub logo_base64: Option<String>,
}

/// A rendered download payload ready to serve.
pub struct QrDownload {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

struct RenderedQr {
    content: String,
    image_base64: String,
    style: QrStyle,
    /// Effective level; forced to H whenever a logo is embedded.
    error_correction: &'static str,
}

pub struct QrService {
    qrs: Arc<dyn QrRepository>,
    links: Arc<dyn LinkRepository>,
    base_url: String,
}

impl QrService {
    pub fn new(qrs: Arc<dyn QrRepository>, links: Arc<dyn LinkRepository>, base_url: String) -> Self {
        Self {
            qrs,
            links,
            base_url,
        }
    }

    /// Renders and stores a QR code.
    ///
    /// # Errors
    ///
    /// - [`AppError::Forbidden`] when the per-user cap is reached
    /// - [`AppError::NotFound`] for an unknown or unowned `link_id`
    /// - [`AppError::Validation`] for bad style parameters, bad logos, or
    ///   content that does not fit the symbol
    pub async fn create(
        &self,
        user: &CurrentUser,
        input: CreateQr,
    ) -> Result<QrCodeRecord, AppError> {
        if self.qrs.count_for_owner(user.id).await? >= MAX_QR_PER_USER {
            return Err(AppError::forbidden(
                "QR code limit reached",
                json!({ "limit": MAX_QR_PER_USER }),
            ));
        }

        let rendered = self.render(user, &input).await?;

        let title = input.title.clone().or_else(|| {
            Some(format!(
                "QR: {}",
                rendered.content.chars().take(50).collect::<String>()
            ))
        });

        self.qrs
            .insert(NewQrCode {
                user_id: user.id,
                link_id: input.link_id,
                content: rendered.content,
                title,
                image_base64: rendered.image_base64,
                foreground_color: input.foreground_color,
                background_color: input.background_color,
                style: rendered.style.as_str().to_string(),
                box_size: input.box_size,
                border_size: input.border_size,
                error_correction: rendered.error_correction.to_string(),
                logo_base64: input.logo_base64,
            })
            .await
    }

    /// Renders without persisting. Returns the base64 PNG and the encoded
    /// content.
    pub async fn preview(
        &self,
        user: &CurrentUser,
        input: CreateQr,
    ) -> Result<(String, String), AppError> {
        let rendered = self.render(user, &input).await?;

        Ok((rendered.image_base64, rendered.content))
    }

    async fn render(&self, user: &CurrentUser, input: &CreateQr) -> Result<RenderedQr, AppError> {
        let content = match input.link_id {
            Some(link_id) => {
                let link = self
                    .links
                    .find_by_id_for_owner(link_id, user.id)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found("Link not found", json!({ "id": link_id }))
                    })?;
                format!("{}/{}", self.base_url, link.short_code)
            }
            None => {
                let content = input.content.as_deref().unwrap_or("").trim().to_string();
                if content.is_empty() {
                    return Err(AppError::bad_request(
                        "Either link_id or content is required",
                        json!({}),
                    ));
                }
                if content.chars().count() > 2000 {
                    return Err(AppError::bad_request(
                        "Content must be at most 2000 characters",
                        json!({ "length": content.chars().count() }),
                    ));
                }
                content
            }
        };

        let style = QrStyle::parse(&input.style).ok_or_else(|| {
            AppError::bad_request("Unknown QR style", json!({ "style": input.style }))
        })?;
        let requested_ec = ec_level(&input.error_correction).ok_or_else(|| {
            AppError::bad_request(
                "Error correction must be one of L, M, Q, H",
                json!({ "error_correction": input.error_correction }),
            )
        })?;
        if !(5..=20).contains(&input.box_size) {
            return Err(AppError::bad_request(
                "box_size must be between 5 and 20",
                json!({ "box_size": input.box_size }),
            ));
        }
        if !(0..=10).contains(&input.border_size) {
            return Err(AppError::bad_request(
                "border_size must be between 0 and 10",
                json!({ "border_size": input.border_size }),
            ));
        }

        // Logo validation precedes rendering; the level is forced to H
        // before the symbol version is chosen so the overlay stays within
        // the correctable damage budget.
        let logo_bytes = match &input.logo_base64 {
            Some(data) => Some(logo::validate_logo(data)?),
            None => None,
        };
        let (ec, ec_label) = match &logo_bytes {
            Some(_) => (EcLevel::H, "H"),
            None => (requested_ec, input.error_correction.as_str()),
        };
        let ec_label: &'static str = match ec_label {
            "L" => "L",
            "Q" => "Q",
            "H" => "H",
            _ => "M",
        };

        let image_base64 = raster::render_png_base64(&RenderOptions {
            content: &content,
            foreground: hex_to_rgb(&input.foreground_color)?,
            background: hex_to_rgb(&input.background_color)?,
            style,
            box_size: input.box_size as u32,
            border_size: input.border_size as u32,
            ec,
            logo: logo_bytes.as_deref(),
        })?;

        Ok(RenderedQr {
            content,
            image_base64,
            style,
            error_correction: ec_label,
        })
    }

    pub async fn list(
        &self,
        user: &CurrentUser,
        skip: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<QrCodeRecord>, i64), AppError> {
        self.qrs.list_for_owner(user.id, skip, limit, search).await
    }

    pub async fn get(&self, user: &CurrentUser, id: i64) -> Result<QrCodeRecord, AppError> {
        self.qrs
            .find_by_id_for_owner(id, user.id)
            .await?
            .ok_or_else(|| AppError::not_found("QR code not found", json!({ "id": id })))
    }

    pub async fn update_title(
        &self,
        user: &CurrentUser,
        id: i64,
        title: Option<String>,
    ) -> Result<QrCodeRecord, AppError> {
        self.qrs
            .update_title(id, user.id, title)
            .await?
            .ok_or_else(|| AppError::not_found("QR code not found", json!({ "id": id })))
    }

    pub async fn delete(&self, user: &CurrentUser, id: i64) -> Result<(), AppError> {
        if !self.qrs.delete(id, user.id).await? {
            return Err(AppError::not_found("QR code not found", json!({ "id": id })));
        }

        Ok(())
    }

    /// Produces a download payload in the requested format and increments
    /// the download counter.
    ///
    /// PNG serves the stored render; SVG is re-rendered from the stored
    /// style parameters and never carries the logo.
    pub async fn download(
        &self,
        user: &CurrentUser,
        id: i64,
        format: &str,
    ) -> Result<QrDownload, AppError> {
        let record = self.get(user, id).await?;

        let (bytes, content_type) = match format {
            "png" => {
                let bytes = STANDARD.decode(&record.image_base64).map_err(|_| {
                    AppError::internal("Stored QR image is not valid base64", json!({ "id": id }))
                })?;
                (bytes, "image/png")
            }
            "svg" => {
                let document = svg::render_svg(&RenderOptions {
                    content: &record.content,
                    foreground: hex_to_rgb(&record.foreground_color)
                        .map_err(|_| corrupt_record(id))?,
                    background: hex_to_rgb(&record.background_color)
                        .map_err(|_| corrupt_record(id))?,
                    style: QrStyle::parse(&record.style).ok_or_else(|| corrupt_record(id))?,
                    box_size: record.box_size as u32,
                    border_size: record.border_size as u32,
                    ec: ec_level(&record.error_correction).ok_or_else(|| corrupt_record(id))?,
                    logo: None,
                })?;
                (document.into_bytes(), "image/svg+xml")
            }
            other => {
                return Err(AppError::bad_request(
                    "Download format must be png or svg",
                    json!({ "format": other }),
                ));
            }
        };

        self.qrs.increment_downloads(id).await?;

        Ok(QrDownload {
            bytes,
            content_type,
            filename: format!("qr-{id}.{format}"),
        })
    }
}

fn corrupt_record(id: i64) -> AppError {
    AppError::internal("Stored QR parameters are invalid", json!({ "id": id }))
}
