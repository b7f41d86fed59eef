//! Hex color parsing for QR rendering.

use crate::error::AppError;
use serde_json::json;

/// Parses a `#RRGGBB` hex color into an RGB triple.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for anything that is not exactly a hash
/// followed by six hex digits.
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8), AppError> {
    // ASCII check first: the fixed-offset slices below assume single-byte
    // characters.
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.is_ascii())
        .ok_or_else(|| invalid_color(hex))?;

    let r = u8::from_str_radix(&digits[0..2], 16).map_err(|_| invalid_color(hex))?;
    let g = u8::from_str_radix(&digits[2..4], 16).map_err(|_| invalid_color(hex))?;
    let b = u8::from_str_radix(&digits[4..6], 16).map_err(|_| invalid_color(hex))?;

    Ok((r, g, b))
}

/// Formats an RGB triple back into `#RRGGBB` form.
pub fn rgb_to_hex(rgb: (u8, u8, u8)) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.0, rgb.1, rgb.2)
}

fn invalid_color(hex: &str) -> AppError {
    AppError::bad_request(
        "Color must be a hex string in #RRGGBB form",
        json!({ "color": hex }),
    )
}
