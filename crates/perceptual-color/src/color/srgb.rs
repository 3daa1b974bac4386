//! sRGB color type
//!
//! Device RGB as delivered by image decoders and consumed by displays.
//! Every enumerated cube color and every quantized palette entry is an
//! [`Srgb`].

use std::fmt;
use std::str::FromStr;

use super::distance::Channels;
use super::linear_rgb::LinearRgb;
use super::transfer::linear_to_srgb;
use crate::palette::ParseColorError;

/// A color in gamma-encoded sRGB.
///
/// Values are in the range 0.0..=1.0 (mapping to 0..255 for 8-bit).
/// Conversions that produce an `Srgb` from another space clamp into that
/// range, so out-of-gamut inputs saturate instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Srgb {
    /// Red channel (gamma-encoded, 0.0..=1.0)
    pub r: f64,
    /// Green channel (gamma-encoded, 0.0..=1.0)
    pub g: f64,
    /// Blue channel (gamma-encoded, 0.0..=1.0)
    pub b: f64,
}

impl Srgb {
    /// Black, also used as the fill color for empty palette slots.
    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Create a new Srgb color from float values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from 8-bit unsigned integer values.
    ///
    /// # Example
    /// ```
    /// use perceptual_color::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Convert to a byte array [R, G, B], rounding and clamping to 0..=255.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Clamp every channel into 0.0..=1.0.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// Format as `#rrggbb`.
    ///
    /// ```
    /// use perceptual_color::Srgb;
    /// assert_eq!(Srgb::from_u8(255, 128, 0).to_hex(), "#ff8000");
    /// ```
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Channels for Srgb {
    #[inline]
    fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    fn from_channels([r, g, b]: [f64; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<LinearRgb> for Srgb {
    /// Gamma-encode linear light. The result is clamped to 0.0..=1.0.
    fn from(linear: LinearRgb) -> Self {
        Self {
            r: linear_to_srgb(linear.r),
            g: linear_to_srgb(linear.g),
            b: linear_to_srgb(linear.b),
        }
        .clamped()
    }
}

impl fmt::Display for Srgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`.
    ///
    /// Parsing is case-insensitive and surrounding whitespace is trimmed.
    ///
    /// ```
    /// use perceptual_color::Srgb;
    ///
    /// let red: Srgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Srgb::from_u8(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(c));
        }

        let digits: Vec<u8> = s.chars().filter_map(|c| c.to_digit(16)).map(|d| d as u8).collect();
        match digits[..] {
            // Shorthand: 0xF -> 0xFF
            [r, g, b] => Ok(Self::from_u8(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::from_u8(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
