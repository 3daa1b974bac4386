//! Euclidean distance in whichever space two colors share

/// Access to the three raw components of a color value.
///
/// Implemented by every color type in this crate so [`distance`] can
/// work in any of them. The caller picks the space by picking the type:
/// [`Lab`](super::Lab) for perceptual distance, [`Srgb`](super::Srgb) for
/// screen-space distance.
pub trait Channels: Sized {
    fn channels(&self) -> [f64; 3];

    /// Rebuild a value from raw components. All-zero components are black
    /// in every space of this crate.
    fn from_channels(channels: [f64; 3]) -> Self;
}

/// Squared Euclidean distance. Cheaper than [`distance`] when only
/// comparing.
#[inline]
pub fn distance_squared<C: Channels>(a: &C, b: &C) -> f64 {
    let [a0, a1, a2] = a.channels();
    let [b0, b1, b2] = b.channels();
    let d0 = a0 - b0;
    let d1 = a1 - b1;
    let d2 = a2 - b2;
    d0 * d0 + d1 * d1 + d2 * d2
}

/// Euclidean distance.
///
/// ```
/// use perceptual_color::{distance, Srgb};
///
/// let black = Srgb::new(0.0, 0.0, 0.0);
/// let red = Srgb::new(1.0, 0.0, 0.0);
/// assert_eq!(distance(&black, &red), 1.0);
/// ```
#[inline]
pub fn distance<C: Channels>(a: &C, b: &C) -> f64 {
    distance_squared(a, b).sqrt()
}
