//! Perceptual ordering of a discretized color space
//!
//! The pipeline runs in four stages:
//!
//! 1. [`ColorCube::enumerate`] walks an `n³` RGB lattice and annotates each
//!    color with HSB and Lab.
//! 2. A [`HueTable`] assigns every color to exactly one hue segment.
//! 3. Each segment is optionally filtered by a [`VibrancyFilter`] and
//!    pre-sorted by saturation, then brightness.
//! 4. [`PerceptualOrderer::compute_batch`] cuts a fixed-size slice from the
//!    pre-sorted segment and orders it with a greedy nearest-neighbour walk.
//!
//! Stages 1-3 happen once in [`PerceptualOrderer::new`]. Stage 4 is cheap
//! enough to run on demand, one batch at a time.

mod cube;
mod error;
mod hue_table;
mod options;
mod orderer;
mod tsp;

pub use cube::{ColorCube, ColorEntry, VibrancyFilter, MAX_RESOLUTION, MIN_RESOLUTION};
pub use error::{HueTableError, OrderError};
pub use hue_table::{HueRange, HueTable};
pub use options::{DistanceSpace, OrderOptions, DEFAULT_BATCH_SIZE, DEFAULT_RESOLUTION};
pub use orderer::PerceptualOrderer;
pub use tsp::{nearest_neighbour_order, nearest_neighbour_path};
