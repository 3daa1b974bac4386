//! sRGB transfer function (IEC 61966-2-1)
//!
//! Exact piecewise curves. Inputs outside 0.0..=1.0 are accepted; the
//! power segment is mirrored for negative values so the functions stay
//! odd and invertible.

/// Decode threshold on the gamma-encoded side.
const DECODE_THRESHOLD: f64 = 0.04045;

/// Encode threshold on the linear side.
const ENCODE_THRESHOLD: f64 = 0.0031308;

const GAMMA: f64 = 2.4;

/// Convert an sRGB channel value to linear light.
#[inline]
pub fn srgb_to_linear(srgb: f64) -> f64 {
    let magnitude = srgb.abs();
    let linear = if magnitude <= DECODE_THRESHOLD {
        magnitude / 12.92
    } else {
        ((magnitude + 0.055) / 1.055).powf(GAMMA)
    };
    linear.copysign(srgb)
}

/// Convert a linear-light channel value to sRGB.
#[inline]
pub fn linear_to_srgb(linear: f64) -> f64 {
    let magnitude = linear.abs();
    let srgb = if magnitude <= ENCODE_THRESHOLD {
        magnitude * 12.92
    } else {
        1.055 * magnitude.powf(1.0 / GAMMA) - 0.055
    };
    srgb.copysign(linear)
}
