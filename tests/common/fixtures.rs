//! Test fixtures and constants.

use thatcolor::models::{AppConfig, HuePreset, HueRangeConfig, HueTableConfig};

/// Batch size used by [`small_config`]
pub const SMALL_BATCH: usize = 16;

/// 6³ cube in three equal hue segments, small batches
pub fn small_config() -> AppConfig {
    AppConfig {
        cube_resolution: 6,
        hue_table: HueTableConfig::Ranges {
            segments: Some(3),
            ranges: vec![
                HueRangeConfig {
                    start: 0.0,
                    end: 1.0 / 3.0,
                    segment: 0,
                },
                HueRangeConfig {
                    start: 1.0 / 3.0,
                    end: 2.0 / 3.0,
                    segment: 1,
                },
                HueRangeConfig {
                    start: 2.0 / 3.0,
                    end: 1.0,
                    segment: 2,
                },
            ],
        },
        batch_size: SMALL_BATCH,
        prefetch_threshold: 10,
        ..AppConfig::default()
    }
}

/// 8³ cube with the wrap-around eight segment table
pub fn wrap_config() -> AppConfig {
    AppConfig {
        cube_resolution: 8,
        hue_table: HueTableConfig::Preset {
            preset: HuePreset::Wrap8,
        },
        batch_size: 32,
        ..AppConfig::default()
    }
}

/// Encode an 8-bit RGB PNG from a pixel function
pub fn rgb_png(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&pixel(x, y));
        }
    }

    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("PNG header");
        writer.write_image_data(&data).expect("PNG data");
    }
    buf
}

/// Single-color PNG
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    rgb_png(width, height, |_, _| rgb)
}

/// Four vertical stripes: red, green, blue, white
pub fn stripes_png() -> Vec<u8> {
    rgb_png(64, 64, |x, _| match x / 16 {
        0 => [255, 0, 0],
        1 => [0, 255, 0],
        2 => [0, 0, 255],
        _ => [255, 255, 255],
    })
}
