//! perceptual-color: color math, palette extraction and perceptual ordering
//!
//! # Quick Start
//!
//! Order a small color cube into smooth hue segments:
//!
//! ```
//! use perceptual_color::{HueTable, OrderOptions, PerceptualOrderer};
//!
//! let options = OrderOptions::new()
//!     .resolution(8)
//!     .hue_table(HueTable::uniform(6).unwrap())
//!     .batch_size(64);
//! let orderer = PerceptualOrderer::new(options).unwrap();
//!
//! // First batch of the red segment, ready to display
//! let reds = orderer.compute_batch(0, 0).unwrap();
//! assert!(!reds.is_empty());
//! ```
//!
//! Extract a stable palette from a stream of frames:
//!
//! ```
//! use perceptual_color::{fit_palette_size, quantize, PaletteSmoother, Srgb};
//!
//! let frame = vec![Srgb::from_u8(200, 30, 30), Srgb::from_u8(30, 30, 200)];
//! let mut smoother = PaletteSmoother::default();
//! smoother.push(fit_palette_size(quantize(&frame, 3), 3));
//! assert_eq!(smoother.current_average().len(), 3);
//! ```
//!
//! # Color Spaces
//!
//! | Type | Role |
//! |------|------|
//! | [`Srgb`] | Device values, 0..=1, gamma-encoded |
//! | [`LinearRgb`] | Linear light, intermediate |
//! | [`Xyz`] | CIE XYZ, D65, Y = 1 for white |
//! | [`Lab`] | CIE 1976 L*a*b*, distance metric for ordering |
//! | [`Hsb`] | Hue segmentation and pre-sort keys |
//!
//! Conversions are `From` impls and never fail. Only the way back into
//! [`Srgb`] clamps, so intermediate spaces keep out-of-gamut values intact.
//!
//! # Ordering
//!
//! Exact shortest-path ordering of a whole hue segment is hopeless at
//! 262 144 colors. [`PerceptualOrderer`] pre-sorts each segment by
//! saturation and brightness, then runs a greedy nearest-neighbour walk over
//! one fixed-size slice at a time. Consecutive slices follow the pre-sort,
//! so the sequence drifts from vivid to muted while staying locally smooth.

pub mod color;
pub mod order;
pub mod palette;


pub use color::{distance, distance_squared, Channels, Hsb, Lab, LinearRgb, Srgb, Xyz};
pub use order::{
    nearest_neighbour_order, nearest_neighbour_path, ColorCube, ColorEntry, DistanceSpace,
    HueRange, HueTable, HueTableError, OrderError, OrderOptions, PerceptualOrderer,
    VibrancyFilter,
};
pub use palette::{fit_palette_size, quantize, PaletteSmoother, ParseColorError};
