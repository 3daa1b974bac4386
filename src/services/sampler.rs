//! Image palette sampling.
//!
//! Decodes a PNG, box-filters it down to a small square grid and quantizes
//! the grid to a fixed-size palette. The grid keeps quantization cost
//! independent of the source resolution.

use perceptual_color::{fit_palette_size, quantize, Srgb};
use std::io::Cursor;

use crate::error::SampleError;

/// Decoded 8-bit image.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    /// Row-major, alpha discarded
    pub pixels: Vec<Srgb>,
}

/// Decode PNG bytes of any color type and bit depth.
pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, SampleError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => return Err(SampleError::UnsupportedColorType(other)),
    };

    let width = info.width as usize;
    let height = info.height as usize;
    if width == 0 || height == 0 {
        return Err(SampleError::Empty);
    }

    let pixels = data
        .chunks_exact(channels)
        .take(width * height)
        .map(|px| match channels {
            1 | 2 => Srgb::from_u8(px[0], px[0], px[0]),
            _ => Srgb::from_u8(px[0], px[1], px[2]),
        })
        .collect();

    Ok(DecodedImage {
        width,
        height,
        pixels,
    })
}

/// Box-downsample to at most `size × size` pixels.
///
/// Each output pixel is the mean of the source rectangle it covers. Images
/// already smaller than the grid along an axis keep their size on that
/// axis.
pub fn downsample(image: &DecodedImage, size: usize) -> Vec<Srgb> {
    let size = size.max(1);
    let out_w = image.width.min(size);
    let out_h = image.height.min(size);
    let mut out = Vec::with_capacity(out_w * out_h);

    for oy in 0..out_h {
        let y0 = oy * image.height / out_h;
        let y1 = ((oy + 1) * image.height / out_h).max(y0 + 1);
        for ox in 0..out_w {
            let x0 = ox * image.width / out_w;
            let x1 = ((ox + 1) * image.width / out_w).max(x0 + 1);

            let mut sum = [0.0f64; 3];
            for y in y0..y1 {
                for px in &image.pixels[y * image.width + x0..y * image.width + x1] {
                    sum[0] += px.r;
                    sum[1] += px.g;
                    sum[2] += px.b;
                }
            }
            let n = ((y1 - y0) * (x1 - x0)) as f64;
            out.push(Srgb::new(sum[0] / n, sum[1] / n, sum[2] / n));
        }
    }

    out
}

/// Decode, downsample and quantize to exactly `k` colors.
pub fn extract_palette(bytes: &[u8], k: usize, sample_size: usize) -> Result<Vec<Srgb>, SampleError> {
    if k == 0 {
        return Err(SampleError::ZeroPaletteSize);
    }

    let image = decode_png(bytes)?;
    let samples = downsample(&image, sample_size);
    let palette = fit_palette_size(quantize(&samples, k), k);

    tracing::debug!(
        width = image.width,
        height = image.height,
        samples = samples.len(),
        k,
        "Extracted palette"
    );
    Ok(palette)
}
