// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color parsing and WCAG contrast colorimetry.
//!
//! Recognizes a closed grammar of color expressions: a fixed named-color
//! table, 3/6/8-digit hex, and rgb()/rgba() functional notation. Anything
//! else (including `transparent`) parses to None and the caller skips the
//! check rather than guessing.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// AA minimum contrast ratio for normal-size text. Large text is allowed
/// 3:1 by WCAG, but this engine applies the single 4.5 threshold.
pub const AA_NORMAL_TEXT: f64 = 4.5;

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Named CSS colors the parser recognizes
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("white", Rgb(255, 255, 255)),
    ("black", Rgb(0, 0, 0)),
    ("red", Rgb(255, 0, 0)),
    ("green", Rgb(0, 128, 0)),
    ("blue", Rgb(0, 0, 255)),
    ("yellow", Rgb(255, 255, 0)),
    ("gray", Rgb(128, 128, 128)),
    ("grey", Rgb(128, 128, 128)),
    ("silver", Rgb(192, 192, 192)),
    ("maroon", Rgb(128, 0, 0)),
    ("olive", Rgb(128, 128, 0)),
    ("lime", Rgb(0, 255, 0)),
    ("aqua", Rgb(0, 255, 255)),
    ("cyan", Rgb(0, 255, 255)),
    ("teal", Rgb(0, 128, 128)),
    ("navy", Rgb(0, 0, 128)),
    ("fuchsia", Rgb(255, 0, 255)),
    ("magenta", Rgb(255, 0, 255)),
    ("purple", Rgb(128, 0, 128)),
    ("orange", Rgb(255, 165, 0)),
];

/// Parse a color expression. First match wins: named table, hex, rgb().
pub fn parse_color(value: &str) -> Option<Rgb> {
    let trimmed = value.trim().to_lowercase();
    if trimmed.is_empty() || trimmed == "transparent" {
        return None;
    }
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }
    if trimmed.starts_with("rgb") {
        return parse_rgb_functional(&trimmed);
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == trimmed)
        .map(|(_, rgb)| *rgb)
}

/// Parse 3-, 6-, or 8-digit hex (alpha digits are ignored)
fn parse_hex(hex: &str) -> Option<Rgb> {
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Rgb(r, g, b))
        }
        6 | 8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Parse rgb()/rgba() notation (alpha channel is ignored)
fn parse_rgb_functional(value: &str) -> Option<Rgb> {
    let re = Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})").ok()?;
    let caps = re.captures(value)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;
    Some(Rgb(r, g, b))
}

/// Canonical 6-digit hex form of a color
pub fn to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

/// Relative luminance per the WCAG definition
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub fn relative_luminance(color: Rgb) -> f64 {
    let channels = [color.0, color.1, color.2].map(|c| {
        let v = c as f64 / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * channels[0] + 0.7152 * channels[1] + 0.0722 * channels[2]
}

/// Contrast ratio between two colors, in [1, 21]. Symmetric in its
/// arguments.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la > lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}
