//! Linear RGB color type
//!
//! Linear RGB is proportional to physical light intensity. It is the
//! bridge between device sRGB and CIE XYZ.

use super::distance::Channels;
use super::srgb::Srgb;
use super::transfer::srgb_to_linear;

/// A color in linear-light RGB (sRGB primaries, D65 white).
///
/// Values are typically in 0.0..=1.0 but are never clamped here; out of
/// gamut Lab colors come back through this type with components outside
/// that range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl Channels for LinearRgb {
    #[inline]
    fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    fn from_channels([r, g, b]: [f64; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Srgb> for LinearRgb {
    /// Gamma-decode sRGB into linear light.
    fn from(srgb: Srgb) -> Self {
        Self {
            r: srgb_to_linear(srgb.r),
            g: srgb_to_linear(srgb.g),
            b: srgb_to_linear(srgb.b),
        }
    }
}
