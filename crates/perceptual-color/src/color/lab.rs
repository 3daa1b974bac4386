//! CIE 1976 L*a*b* color space
//!
//! Lab is the space the orderer measures perceptual distance in. Euclidean
//! distance between two Lab colors approximates how different they look.
//!
//! # References
//!
//! Bruce Lindbloom, "XYZ to Lab" / "Lab to XYZ"
//! <http://www.brucelindbloom.com/>

use super::distance::Channels;
use super::linear_rgb::LinearRgb;
use super::srgb::Srgb;
use super::xyz::Xyz;

/// D65 reference white in XYZ (Y normalized to 1.0).
pub const D65_WHITE: Xyz = Xyz {
    x: 0.95047,
    y: 1.00000,
    z: 1.08883,
};

/// CIE standard epsilon (actual value 216/24389).
pub const EPSILON: f64 = 0.008856;

/// CIE standard kappa (actual value 24389/27).
pub const KAPPA: f64 = 903.3;

/// A color in CIE 1976 L*a*b* relative to D65.
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green (negative) to red (positive), roughly -128..=128
/// - `b`: Blue (negative) to yellow (positive), roughly -128..=128
///
/// Values are not clamped; out-of-gamut colors survive intermediate math.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma, the distance from the neutral axis.
    #[inline]
    pub fn chroma(self) -> f64 {
        self.a.hypot(self.b)
    }
}

impl Channels for Lab {
    #[inline]
    fn channels(&self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    #[inline]
    fn from_channels([l, a, b]: [f64; 3]) -> Self {
        Self::new(l, a, b)
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

#[inline]
fn lab_f_inv(f: f64) -> f64 {
    let cubed = f * f * f;
    if cubed > EPSILON {
        cubed
    } else {
        (116.0 * f - 16.0) / KAPPA
    }
}

impl From<Xyz> for Lab {
    fn from(xyz: Xyz) -> Self {
        let fx = lab_f(xyz.x / D65_WHITE.x);
        let fy = lab_f(xyz.y / D65_WHITE.y);
        let fz = lab_f(xyz.z / D65_WHITE.z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Lab> for Xyz {
    fn from(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = lab.a / 500.0 + fy;
        let fz = fy - lab.b / 200.0;

        // Y is decided by L itself, not by fy^3: near black the two
        // branches disagree and only the L test keeps the inverse exact.
        let yr = if lab.l > KAPPA * EPSILON {
            fy * fy * fy
        } else {
            lab.l / KAPPA
        };

        Self {
            x: lab_f_inv(fx) * D65_WHITE.x,
            y: yr * D65_WHITE.y,
            z: lab_f_inv(fz) * D65_WHITE.z,
        }
    }
}

impl From<Srgb> for Lab {
    /// sRGB -> linear -> XYZ -> Lab.
    fn from(srgb: Srgb) -> Self {
        Lab::from(Xyz::from(LinearRgb::from(srgb)))
    }
}

impl From<Lab> for Srgb {
    /// Lab -> XYZ -> linear -> sRGB, clamped into the sRGB gamut.
    fn from(lab: Lab) -> Self {
        Srgb::from(LinearRgb::from(Xyz::from(lab)))
    }
}
