//! CIE 1931 XYZ color type

use super::distance::Channels;
use super::linear_rgb::LinearRgb;

/// A color in CIE XYZ, scaled so that the D65 white point has `y == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Channels for Xyz {
    #[inline]
    fn channels(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    fn from_channels([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<LinearRgb> for Xyz {
    /// Linear sRGB to XYZ using the sRGB/D65 primaries matrix.
    fn from(rgb: LinearRgb) -> Self {
        Self {
            x: 0.4124564 * rgb.r + 0.3575761 * rgb.g + 0.1804375 * rgb.b,
            y: 0.2126729 * rgb.r + 0.7151522 * rgb.g + 0.0721750 * rgb.b,
            z: 0.0193339 * rgb.r + 0.1191920 * rgb.g + 0.9503041 * rgb.b,
        }
    }
}

impl From<Xyz> for LinearRgb {
    /// XYZ to linear sRGB using the inverse primaries matrix. Not clamped.
    fn from(xyz: Xyz) -> Self {
        Self {
            r: 3.2404542 * xyz.x - 1.5371385 * xyz.y - 0.4985314 * xyz.z,
            g: -0.9692660 * xyz.x + 1.8760108 * xyz.y + 0.0415560 * xyz.z,
            b: 0.0556434 * xyz.x - 0.2040259 * xyz.y + 1.0572252 * xyz.z,
        }
    }
}
