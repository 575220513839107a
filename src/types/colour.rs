//! RGB colour type, hex parsing and contrast arithmetic.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Serialize, Serializer};

use crate::error::{MediaError, Result};

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports `#RGB` (expanded to `#RRGGBB`) and `#RRGGBB`, with or
    /// without the leading `#`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 => {
                // #RGB -> #RRGGBB
                let mut digits = [0u8; 3];
                for (slot, c) in digits.iter_mut().zip(hex.chars()) {
                    *slot = parse_hex_digit(c)?;
                }
                let [r, g, b] = digits;
                Ok(Self::new(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Parse a colour token taken from SVG markup.
    ///
    /// Only `#`-prefixed hex tokens count; named colours, `rgb()` and
    /// `url(#…)` references yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if !token.starts_with('#') {
            return None;
        }
        Self::from_hex(token).ok()
    }

    /// Relative luminance as the weighted sum of the normalized channels.
    ///
    /// Channels stay gamma-encoded: this is the quick perceptual weighting
    /// used for background picking, not the linearized WCAG formula.
    pub fn luminance(self) -> f64 {
        let rgb: Srgb<f64> = Srgb::new(self.r, self.g, self.b).into_format();
        0.2126 * rgb.red + 0.7152 * rgb.green + 0.0722 * rgb.blue
    }

    /// Contrast ratio between two colours, in `[1, 21]`.
    pub fn contrast_ratio(self, other: Rgb) -> f64 {
        let a = self.luminance();
        let b = other.luminance();
        let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
        (lighter + 0.05) / (darker + 0.05)
    }
}

impl FromStr for Rgb {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn invalid_hex(s: &str) -> MediaError {
    MediaError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB or #RRGGBB format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| MediaError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| MediaError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
