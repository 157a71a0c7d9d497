//! # Color Module
//!
//! RGBA colors as carried by resolved styles.
//!
//! Styles arrive as CSS-like strings (`"#fff"`, `"rgba(0, 0, 0, 0.5)"`,
//! `"red"`, `"transparent"`), so parsing lives here and serde goes through
//! the string form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Represents a RGBA color in float format (0.0 - 1.0).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorParseError {
    #[error("Invalid hex color: {0}")]
    Hex(String),
    #[error("Invalid color function: {0}")]
    Function(String),
    #[error("Unknown color name: {0}")]
    UnknownName(String),
}

const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("cyan", (0, 255, 255)),
    ("aqua", (0, 255, 255)),
    ("magenta", (255, 0, 255)),
    ("fuchsia", (255, 0, 255)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("silver", (192, 192, 192)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("navy", (0, 0, 128)),
    ("teal", (0, 128, 128)),
    ("maroon", (128, 0, 0)),
    ("olive", (128, 128, 0)),
];

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Channels quantized to 8 bits, in `[r, g, b, a]` order.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// A fully transparent color paints nothing, with or without a shadow.
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Returns the color with its alpha scaled by `opacity`.
    pub fn with_alpha_multiplied(&self, opacity: f32) -> Self {
        Self {
            a: self.a * opacity,
            ..*self
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let digit = |s: &str| u8::from_str_radix(s, 16).ok();
    let short = |s: &str| digit(s).map(|v| v * 17);
    match hex.len() {
        3 => Some(Color::from_rgba8(
            short(&hex[0..1])?,
            short(&hex[1..2])?,
            short(&hex[2..3])?,
            255,
        )),
        4 => Some(Color::from_rgba8(
            short(&hex[0..1])?,
            short(&hex[1..2])?,
            short(&hex[2..3])?,
            short(&hex[3..4])?,
        )),
        6 => Some(Color::from_rgba8(
            digit(&hex[0..2])?,
            digit(&hex[2..4])?,
            digit(&hex[4..6])?,
            255,
        )),
        8 => Some(Color::from_rgba8(
            digit(&hex[0..2])?,
            digit(&hex[2..4])?,
            digit(&hex[4..6])?,
            digit(&hex[6..8])?,
        )),
        _ => None,
    }
}

fn parse_function(input: &str) -> Option<Color> {
    let open = input.find('(')?;
    let name = input[..open].trim();
    let args = input[open + 1..].strip_suffix(')')?;
    let parts: Vec<f32> = args
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .ok()?;

    let channel = |v: f32| (v / 255.0).clamp(0.0, 1.0);
    match (name, parts.as_slice()) {
        ("rgb", [r, g, b]) => Some(Color::new(channel(*r), channel(*g), channel(*b), 1.0)),
        ("rgba", [r, g, b, a]) => Some(Color::new(
            channel(*r),
            channel(*g),
            channel(*b),
            a.clamp(0.0, 1.0),
        )),
        _ => None,
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        if let Some(hex) = input.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::Hex(s.to_string()));
        }
        if input.contains('(') {
            return parse_function(&input).ok_or_else(|| ColorParseError::Function(s.to_string()));
        }
        if input == "transparent" {
            return Ok(Color::TRANSPARENT);
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == input)
            .map(|(_, (r, g, b))| Color::from_rgba8(*r, *g, *b, 255))
            .ok_or_else(|| ColorParseError::UnknownName(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, _] = self.to_rgba8();
        write!(f, "rgba({}, {}, {}, {})", r, g, b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#000000".parse::<Color>().unwrap(), Color::BLACK);
        let c: Color = "#ff000080".parse().unwrap();
        assert_eq!(c.to_rgba8(), [255, 0, 0, 128]);
    }

    #[test]
    fn parses_functions_and_names() {
        let c: Color = "rgba(0, 128, 255, 0.5)".parse().unwrap();
        assert_eq!(c.to_rgba8(), [0, 128, 255, 128]);
        assert_eq!("Red".parse::<Color>().unwrap().to_rgba8(), [255, 0, 0, 255]);
        assert!("transparent".parse::<Color>().unwrap().is_transparent());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "#ggg".parse::<Color>(),
            Err(ColorParseError::Hex(_))
        ));
        assert!(matches!(
            "hsl(1, 2, 3)".parse::<Color>(),
            Err(ColorParseError::Function(_))
        ));
        assert!(matches!(
            "blurple".parse::<Color>(),
            Err(ColorParseError::UnknownName(_))
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let c = Color::from_rgba8(10, 20, 30, 255);
        let back: Color = c.to_string().parse().unwrap();
        assert_eq!(back.to_rgba8(), c.to_rgba8());
    }
}
