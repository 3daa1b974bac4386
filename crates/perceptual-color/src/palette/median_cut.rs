//! Median-cut quantization
//!
//! Reduces a flat list of sample pixels to a small set of representative
//! colors. Buckets are split at the median *index* along their widest
//! channel, so both halves hold the same number of pixels regardless of how
//! much of the color volume each covers.
//!
//! Every round splits every bucket, so the bucket count is always a power of
//! two. When `k` is not a power of two the result has more than `k` entries;
//! use [`fit_palette_size`] to get exactly `k`.

use crate::color::Channels;

/// Quantize `pixels` into at least `k` representative colors.
///
/// The result has `k.next_power_of_two()` entries. Each entry is the
/// per-channel mean of one bucket. A bucket left empty by splitting a
/// one-pixel bucket is reported as all-zero channels (black).
///
/// Works in whatever space `C` is; sRGB in the usual case.
///
/// Returns an empty vector for empty input or `k == 0`.
///
/// ```
/// use perceptual_color::{quantize, Srgb};
///
/// let pixels = vec![Srgb::new(0.0, 0.0, 1.0), Srgb::new(1.0, 0.0, 0.0)];
/// let palette = quantize(&pixels, 2);
/// assert_eq!(palette, pixels);
/// ```
pub fn quantize<C: Channels + Copy>(pixels: &[C], k: usize) -> Vec<C> {
    if pixels.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut buckets: Vec<Vec<C>> = vec![pixels.to_vec()];
    while buckets.len() < k {
        buckets = buckets
            .into_iter()
            .flat_map(|bucket| {
                let (low, high) = split_bucket(bucket);
                [low, high]
            })
            .collect();
    }

    buckets.iter().map(|bucket| bucket_mean(bucket)).collect()
}

/// Truncate or pad `palette` to exactly `k` entries. Padding is black.
///
/// ```
/// use perceptual_color::{fit_palette_size, Srgb};
///
/// let palette = vec![Srgb::new(1.0, 1.0, 1.0)];
/// let fitted = fit_palette_size(palette, 3);
/// assert_eq!(fitted, vec![Srgb::new(1.0, 1.0, 1.0), Srgb::BLACK, Srgb::BLACK]);
/// ```
pub fn fit_palette_size<C: Channels + Copy>(mut palette: Vec<C>, k: usize) -> Vec<C> {
    palette.truncate(k);
    palette.resize(k, C::from_channels([0.0; 3]));
    palette
}

/// Channel with the widest value range. Ties prefer the lower channel index.
fn widest_channel<C: Channels>(bucket: &[C]) -> usize {
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for pixel in bucket {
        for (i, value) in pixel.channels().into_iter().enumerate() {
            min[i] = min[i].min(value);
            max[i] = max[i].max(value);
        }
    }

    let mut widest = 0;
    for i in 1..3 {
        if max[i] - min[i] > max[widest] - min[widest] {
            widest = i;
        }
    }
    widest
}

fn split_bucket<C: Channels + Copy>(mut bucket: Vec<C>) -> (Vec<C>, Vec<C>) {
    if bucket.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let channel = widest_channel(&bucket);
    // Stable, so equal values keep their sample order
    bucket.sort_by(|a, b| a.channels()[channel].total_cmp(&b.channels()[channel]));

    let high = bucket.split_off(bucket.len() / 2);
    (bucket, high)
}

/// Mean as an offset from the first member, so a bucket of identical
/// colors yields that color bit for bit.
fn bucket_mean<C: Channels>(bucket: &[C]) -> C {
    let Some(first) = bucket.first() else {
        return C::from_channels([0.0; 3]);
    };

    let base = first.channels();
    let mut offset = [0.0f64; 3];
    for pixel in &bucket[1..] {
        for ((acc, value), base) in offset.iter_mut().zip(pixel.channels()).zip(base) {
            *acc += value - base;
        }
    }
    let count = bucket.len() as f64;
    let mut mean = base;
    for (m, o) in mean.iter_mut().zip(offset) {
        *m += o / count;
    }
    C::from_channels(mean)
}
