//! Raster (PNG) rendering of QR symbols.

use crate::error::AppError;
use crate::qr::{QrStyle, RenderOptions, logo};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgba, RgbaImage};
use qrcode::{Color, QrCode};
use serde_json::json;
use std::io::Cursor;

/// Renders a QR symbol to a base64-encoded PNG.
///
/// The symbol version is chosen automatically for the payload and error
/// correction level. Module shapes follow [`RenderOptions::style`]; the
/// quiet zone is `border_size` modules wide on every side. When a logo is
/// present but its pixels cannot be decoded, the image is returned without
/// the logo rather than failing the render.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the payload does not fit any
/// symbol version at the requested level, and [`AppError::Internal`] if
/// PNG encoding fails.
pub fn render_png_base64(opts: &RenderOptions<'_>) -> Result<String, AppError> {
    let code = build_symbol(opts)?;
    let modules = code.width() as u32;
    let colors = code.to_colors();

    let size = (modules + 2 * opts.border_size) * opts.box_size;
    let fg = Rgba([opts.foreground.0, opts.foreground.1, opts.foreground.2, 255]);
    let bg = Rgba([opts.background.0, opts.background.1, opts.background.2, 255]);
    let mut img = RgbaImage::from_pixel(size, size, bg);

    for my in 0..modules {
        for mx in 0..modules {
            if colors[(my * modules + mx) as usize] != Color::Dark {
                continue;
            }
            let x0 = (opts.border_size + mx) * opts.box_size;
            let y0 = (opts.border_size + my) * opts.box_size;
            draw_module(&mut img, x0, y0, opts.box_size, opts.style, fg);
        }
    }

    if let Some(bytes) = opts.logo {
        // Decode failures degrade to a logo-less image instead of erroring.
        logo::embed_logo(&mut img, bytes);
    }

    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| AppError::internal("PNG encoding failed", json!({ "reason": e.to_string() })))?;

    Ok(STANDARD.encode(buf.into_inner()))
}

pub(crate) fn build_symbol(opts: &RenderOptions<'_>) -> Result<QrCode, AppError> {
    QrCode::with_error_correction_level(opts.content.as_bytes(), opts.ec).map_err(|e| {
        AppError::bad_request(
            "Content does not fit in a QR code at this error correction level",
            json!({ "reason": e.to_string() }),
        )
    })
}

fn draw_module(img: &mut RgbaImage, x0: u32, y0: u32, box_size: u32, style: QrStyle, fg: Rgba<u8>) {
    match style {
        QrStyle::Square => fill_rect(img, x0, y0, box_size, box_size, fg),
        QrStyle::Circle => {
            // Gapped square: inset each side by 12% of the cell.
            let inset = (box_size as f32 * 0.12).round() as u32;
            let side = box_size.saturating_sub(2 * inset).max(1);
            fill_rect(img, x0 + inset, y0 + inset, side, side, fg);
        }
        QrStyle::Dots => {
            // Inscribed circle at 80% of the cell width.
            let half = box_size as f32 / 2.0;
            let radius = half * 0.8;
            for py in 0..box_size {
                for px in 0..box_size {
                    let dx = px as f32 + 0.5 - half;
                    let dy = py as f32 + 0.5 - half;
                    if dx * dx + dy * dy <= radius * radius {
                        img.put_pixel(x0 + px, y0 + py, fg);
                    }
                }
            }
        }
        QrStyle::Rounded => {
            let b = box_size as f32;
            let r = b / 3.0;
            for py in 0..box_size {
                for px in 0..box_size {
                    let fx = px as f32 + 0.5;
                    let fy = py as f32 + 0.5;
                    if in_rounded_square(fx, fy, b, r) {
                        img.put_pixel(x0 + px, y0 + py, fg);
                    }
                }
            }
        }
    }
}

/// Point-in-shape test for a square of side `b` with corner radius `r`.
fn in_rounded_square(fx: f32, fy: f32, b: f32, r: f32) -> bool {
    let cx = fx.clamp(r, b - r);
    let cy = fy.clamp(r, b - r);
    let dx = fx - cx;
    let dy = fy - cy;
    dx * dx + dy * dy <= r * r
}

fn fill_rect(img: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgba<u8>) {
    for py in y0..y0 + h {
        for px in x0..x0 + w {
            img.put_pixel(px, py, color);
        }
    }
}
