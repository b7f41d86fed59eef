//! QR code rendering engine.
//!
//! Symbol construction is delegated to the `qrcode` crate, which picks the
//! smallest version that fits the payload at the requested error correction
//! level. Rendering is done here: [`raster`] paints styled modules onto an
//! RGBA canvas and encodes PNG, [`svg`] emits a vector document, and
//! [`logo`] handles center-logo validation and compositing.

pub mod color;
pub mod logo;
pub mod raster;
pub mod svg;

use qrcode::EcLevel;

/// Module rendering style for raster output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrStyle {
    /// Solid squares filling each module cell.
    Square,
    /// Squares with rounded corners.
    Rounded,
    /// Circles inscribed in each cell at roughly 80% of the cell width.
    Dots,
    /// Slightly inset squares leaving a visible gap between modules.
    ///
    /// Kept under the name "circle" for wire compatibility with existing
    /// clients even though the shape is a gapped square.
    Circle,
}

impl QrStyle {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "square" => Some(Self::Square),
            "rounded" => Some(Self::Rounded),
            "dots" => Some(Self::Dots),
            "circle" => Some(Self::Circle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Rounded => "rounded",
            Self::Dots => "dots",
            Self::Circle => "circle",
        }
    }
}

/// Maps a single-letter error correction code to the symbol level.
pub fn ec_level(code: &str) -> Option<EcLevel> {
    match code {
        "L" => Some(EcLevel::L),
        "M" => Some(EcLevel::M),
        "Q" => Some(EcLevel::Q),
        "H" => Some(EcLevel::H),
        _ => None,
    }
}

/// Geometry and paint parameters for a single render.
#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    pub content: &'a str,
    pub foreground: (u8, u8, u8),
    pub background: (u8, u8, u8),
    pub style: QrStyle,
    /// Pixels per module.
    pub box_size: u32,
    /// Quiet zone width in modules.
    pub border_size: u32,
    pub ec: EcLevel,
    /// Decoded logo image bytes, already validated.
    pub logo: Option<&'a [u8]>,
}
