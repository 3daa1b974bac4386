//! Hue / saturation / brightness derived from sRGB

use super::distance::Channels;
use super::srgb::Srgb;

/// Cylindrical HSB (a.k.a. HSV) coordinates.
///
/// All components are in 0.0..=1.0 for in-gamut input; `hue` is in
/// 0.0..1.0 and wraps, so pure red is hue 0 and never hue 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsb {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
}

impl Hsb {
    #[inline]
    pub fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }
}

impl Channels for Hsb {
    #[inline]
    fn channels(&self) -> [f64; 3] {
        [self.hue, self.saturation, self.brightness]
    }

    #[inline]
    fn from_channels([hue, saturation, brightness]: [f64; 3]) -> Self {
        Self::new(hue, saturation, brightness)
    }
}

impl From<Srgb> for Hsb {
    /// Standard max/min/delta derivation. Achromatic colors get hue 0.
    fn from(rgb: Srgb) -> Self {
        let Srgb { r, g, b } = rgb;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let saturation = if max == 0.0 { 0.0 } else { delta / max };

        let hue = if delta == 0.0 {
            0.0
        } else {
            let sector = if max == r {
                (g - b) / delta + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / delta + 2.0
            } else {
                (r - g) / delta + 4.0
            };
            (sector / 6.0).rem_euclid(1.0)
        };

        Self {
            hue,
            saturation,
            brightness: max,
        }
    }
}
