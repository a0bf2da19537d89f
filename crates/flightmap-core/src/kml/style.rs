use crate::config::Rgba;
use crate::error::{FlightMapError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Rgba,
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: [255, 255, 255, 255],
            width: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolyStyle {
    pub color: Rgba,
    pub fill: bool,
    pub outline: bool,
}

impl Default for PolyStyle {
    fn default() -> Self {
        Self {
            color: [255, 255, 255, 255],
            fill: true,
            outline: true,
        }
    }
}

/// Drawing style of a `<Style>` block. Sub-styles the file omits stay `None`
/// so the renderer can fall back to its own defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KmlStyle {
    pub line: Option<LineStyle>,
    pub poly: Option<PolyStyle>,
}

/// Decode a KML `aabbggrr` hex colour into RGBA.
pub fn parse_color(text: &str) -> Result<Rgba> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 8 || !hex.is_ascii() {
        return Err(FlightMapError::InvalidKml(format!("invalid colour '{text}'")));
    }
    let byte = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| FlightMapError::InvalidKml(format!("invalid colour '{text}'")))
    };
    let (a, b, g, r) = (byte(0)?, byte(2)?, byte(4)?, byte(6)?);
    Ok([r, g, b, a])
}

/// KML booleans are `0`/`1`, though `true`/`false` shows up in the wild.
pub fn parse_bool(text: &str) -> Result<bool> {
    match text.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(FlightMapError::InvalidKml(format!("invalid boolean '{other}'"))),
    }
}
