//! Center logo validation and compositing.

use crate::error::AppError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgba, RgbaImage, imageops};
use serde_json::json;

/// Maximum decoded logo size in bytes.
pub const MAX_LOGO_BYTES: usize = 500 * 1024;

/// White padding around the logo tile, in pixels.
const TILE_PADDING: u32 = 8;

/// Decodes and validates a base64 logo payload.
///
/// Accepts both a bare base64 string and a `data:image/...;base64,` URI;
/// the prefix up to the first comma is stripped. The decoded bytes must be
/// at most 500 KB and carry a recognizable PNG, JPEG, GIF or WebP header.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when any of those checks fail.
pub fn validate_logo(data: &str) -> Result<Vec<u8>, AppError> {
    let payload = match data.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };

    let bytes = STANDARD.decode(payload.trim()).map_err(|_| {
        AppError::bad_request("Logo must be valid base64-encoded image data", json!({}))
    })?;

    if bytes.len() > MAX_LOGO_BYTES {
        return Err(AppError::bad_request(
            "Logo image exceeds the 500 KB size limit",
            json!({ "size_bytes": bytes.len(), "limit_bytes": MAX_LOGO_BYTES }),
        ));
    }

    match image::guess_format(&bytes) {
        Ok(ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif | ImageFormat::WebP) => {
            Ok(bytes)
        }
        _ => Err(AppError::bad_request(
            "Logo must be a PNG, JPEG, GIF or WebP image",
            json!({}),
        )),
    }
}

/// Composites a logo onto the center of a rendered QR image.
///
/// The logo is scaled to one fifth of the symbol width and placed on a
/// white tile so it stays legible over dark modules. Returns `false` when
/// the logo bytes cannot be decoded into pixels; the caller keeps the
/// unmodified image in that case.
pub fn embed_logo(qr: &mut RgbaImage, logo_bytes: &[u8]) -> bool {
    let logo = match image::load_from_memory(logo_bytes) {
        Ok(img) => img,
        Err(err) => {
            tracing::warn!(error = %err, "logo decode failed, rendering without logo");
            return false;
        }
    };

    let target = (qr.width() / 5).max(1);
    let logo = logo.thumbnail(target, target).to_rgba8();

    let tile_w = logo.width() + 2 * TILE_PADDING;
    let tile_h = logo.height() + 2 * TILE_PADDING;
    let mut tile = RgbaImage::from_pixel(tile_w, tile_h, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut tile, &logo, i64::from(TILE_PADDING), i64::from(TILE_PADDING));

    let x = (i64::from(qr.width()) - i64::from(tile_w)) / 2;
    let y = (i64::from(qr.height()) - i64::from(tile_h)) / 2;
    imageops::overlay(qr, &tile, x.max(0), y.max(0));

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_fixture() -> Vec<u8> {
        let img = RgbaImage::from_pixel(16, 16, Rgba([200, 30, 30, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_accepts_valid_png_payload() {
        let encoded = STANDARD.encode(png_fixture());

        let bytes = validate_logo(&encoded).unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_accepts_data_uri_prefix() {
        let encoded = format!("data:image/png;base64,{}", STANDARD.encode(png_fixture()));

        assert!(validate_logo(&encoded).is_ok());
    }

    #[test]
    fn test_rejects_invalid_base64() {
        assert!(matches!(
            validate_logo("not-base64!!!"),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_rejects_non_image_payload() {
        let encoded = STANDARD.encode(b"plain text, not an image");

        assert!(matches!(
            validate_logo(&encoded),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_payload() {
        let mut bytes = png_fixture();
        bytes.resize(MAX_LOGO_BYTES + 1, 0);

        assert!(matches!(
            validate_logo(&STANDARD.encode(&bytes)),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_embed_overlays_logo_pixels() {
        let mut qr = RgbaImage::from_pixel(200, 200, Rgba([0, 0, 0, 255]));

        assert!(embed_logo(&mut qr, &png_fixture()));

        // The white tile must now cover the center.
        assert_eq!(*qr.get_pixel(100, 100), Rgba([200, 30, 30, 255]));
        assert_eq!(*qr.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_embed_falls_back_on_undecodable_bytes() {
        let mut qr = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));
        let before = qr.clone();

        assert!(!embed_logo(&mut qr, b"\x89PNG but truncated"));

        assert_eq!(qr, before);
    }
}
