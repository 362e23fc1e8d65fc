//! Canonical hex colors and the float-triple codec used by animation documents.
//!
//! Animation documents store colors as `[r, g, b]` or `[r, g, b, a]` tuples
//! with each channel in `0.0..=1.0`. Everything user-facing (extracted
//! palettes, override keys and values) uses [`HexColor`], which always
//! displays as lowercase `#rrggbb`.
//!
//! ```
//! use lottie_retouch::HexColor;
//!
//! let red: HexColor = "#F00".parse().unwrap();
//! assert_eq!(red.to_string(), "#ff0000");
//!
//! let [r, g, b] = red.to_rgb_f64();
//! assert_eq!(HexColor::from_rgb_f64(r, g, b), red);
//! ```

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::{RetouchError, RetouchResult};

// ============================================================================
// HexColor
// ============================================================================

/// An 8-bit sRGB color in canonical `#rrggbb` form.
///
/// Alpha is never part of a `HexColor`; documents keep their alpha
/// component structurally and edits leave it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor([u8; 3]);

impl HexColor {
    /// Creates a color from 8-bit channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Quantizes a float triple to 8 bits per channel.
    ///
    /// Each channel is clamped to `0.0..=1.0`, scaled by 255 and rounded
    /// half away from zero.
    pub fn from_rgb_f64(r: f64, g: f64, b: f64) -> Self {
        Self([quantize(r), quantize(g), quantize(b)])
    }

    /// Returns the channels as floats in `0.0..=1.0` (`channel / 255`).
    ///
    /// Exact inverse of [`from_rgb_f64`](Self::from_rgb_f64) for any color
    /// that came out of it.
    pub fn to_rgb_f64(self) -> [f64; 3] {
        let rgb: Srgb<f64> = self.to_srgb().into_format();
        [rgb.red, rgb.green, rgb.blue]
    }

    /// Returns the color as a palette [`Srgb`] value.
    pub fn to_srgb(self) -> Srgb<u8> {
        let [r, g, b] = self.0;
        Srgb::new(r, g, b)
    }

    /// Parses a `#rrggbb` string exactly, without shorthand expansion.
    ///
    /// This is the strict form used for solid-layer colors inside
    /// documents. Returns `None` for anything else.
    pub fn parse_rrggbb(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

fn quantize(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl From<Srgb<u8>> for HexColor {
    fn from(rgb: Srgb<u8>) -> Self {
        Self([rgb.red, rgb.green, rgb.blue])
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Parses a user-supplied override value.
///
/// Accepts `#` followed by exactly 3 or 6 hex digits in any case; the
/// shorthand form expands each digit (`#abc` is `#aabbcc`).
impl FromStr for HexColor {
    type Err = RetouchError;

    fn from_str(s: &str) -> RetouchResult<Self> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| RetouchError::invalid_color(s))?;
        if !matches!(digits.len(), 3 | 6) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(RetouchError::invalid_color(s));
        }
        let rgb = Srgb::<u8>::from_str(digits).map_err(|_| RetouchError::invalid_color(s))?;
        Ok(rgb.into())
    }
}

impl TryFrom<String> for HexColor {
    type Error = RetouchError;

    fn try_from(s: String) -> RetouchResult<Self> {
        s.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
