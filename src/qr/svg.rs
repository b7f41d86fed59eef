//! Vector (SVG) rendering of QR symbols.
//!
//! SVG output always uses square modules; the raster styles do not carry
//! over. Documents are built by hand so the quiet zone width matches the
//! configured border exactly.

use crate::error::AppError;
use crate::qr::{RenderOptions, color::rgb_to_hex, raster::build_symbol};
use qrcode::Color;
use std::fmt::Write as _;

/// Renders a QR symbol to an SVG document string.
///
/// The document starts with an XML declaration and uses one `<path>` for
/// all dark modules, in module-unit coordinates scaled by the viewBox.
///
/// # Errors
///
/// Returns [`AppError::Validation`] when the payload does not fit any
/// symbol version at the requested level.
pub fn render_svg(opts: &RenderOptions<'_>) -> Result<String, AppError> {
    let code = build_symbol(opts)?;
    let modules = code.width() as u32;
    let colors = code.to_colors();

    let units = modules + 2 * opts.border_size;
    let px = units * opts.box_size;

    let mut path = String::new();
    for my in 0..modules {
        for mx in 0..modules {
            if colors[(my * modules + mx) as usize] == Color::Dark {
                let x = opts.border_size + mx;
                let y = opts.border_size + my;
                write!(path, "M{x} {y}h1v1h-1z").expect("writing to String cannot fail");
            }
        }
    }

    let mut svg = String::with_capacity(path.len() + 512);
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{px}\" height=\"{px}\" \
         viewBox=\"0 0 {units} {units}\" shape-rendering=\"crispEdges\">\
         <rect width=\"{units}\" height=\"{units}\" fill=\"{bg}\"/>\
         <path d=\"{path}\" fill=\"{fg}\"/>\
         </svg>",
        bg = rgb_to_hex(opts.background),
        fg = rgb_to_hex(opts.foreground),
    )
    .expect("writing to String cannot fail");

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::QrStyle;
    use qrcode::EcLevel;

    fn opts() -> RenderOptions<'static> {
        RenderOptions {
            content: "https://example.com/abc123",
            foreground: (0, 0, 0),
            background: (255, 255, 255),
            style: QrStyle::Square,
            box_size: 10,
            border_size: 4,
            ec: EcLevel::M,
            logo: None,
        }
    }

    #[test]
    fn test_document_starts_with_xml_declaration() {
        let svg = render_svg(&opts()).unwrap();

        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    }

    #[test]
    fn test_viewbox_includes_quiet_zone() {
        let symbol = build_symbol(&opts()).unwrap();
        let units = symbol.width() as u32 + 8;

        let svg = render_svg(&opts()).unwrap();

        assert!(svg.contains(&format!("viewBox=\"0 0 {units} {units}\"")));
        assert!(svg.contains(&format!("width=\"{}\"", units * 10)));
    }

    #[test]
    fn test_colors_appear_as_hex_fills() {
        let mut options = opts();
        options.foreground = (18, 52, 86);
        options.background = (255, 255, 255);

        let svg = render_svg(&options).unwrap();

        assert!(svg.contains("fill=\"#123456\""));
        assert!(svg.contains("fill=\"#FFFFFF\""));
    }

    #[test]
    fn test_dark_modules_emit_path_segments() {
        let svg = render_svg(&opts()).unwrap();

        // Top-left finder pattern starts at the border offset.
        assert!(svg.contains("M4 4h1v1h-1z"));
    }
}
