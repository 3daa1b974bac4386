//! Palette extraction and stabilization
//!
//! - [`quantize`]: median-cut reduction of sample pixels to a palette
//! - [`fit_palette_size`]: pad/truncate a palette to a fixed length
//! - [`PaletteSmoother`]: rolling per-slot average across frames

mod error;
mod median_cut;
mod smoother;

pub use error::ParseColorError;
pub use median_cut::{fit_palette_size, quantize};
pub use smoother::{PaletteSmoother, DEFAULT_HISTORY};
