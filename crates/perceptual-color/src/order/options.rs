//! Orderer configuration.

use super::cube::VibrancyFilter;
use super::hue_table::HueTable;

/// Default lattice resolution per channel (64³ = 262 144 colors).
pub const DEFAULT_RESOLUTION: usize = 64;

/// Default number of colors per TSP batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Space in which nearest-neighbour distances are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceSpace {
    /// CIE Lab, perceptually uniform.
    #[default]
    Lab,
    /// Gamma-encoded sRGB.
    Rgb,
}

/// Configuration for [`PerceptualOrderer`](super::PerceptualOrderer).
///
/// # Defaults
///
/// - resolution 64
/// - six equal hue segments
/// - batches of 1000 colors
/// - no vibrancy filter
/// - Lab distance
/// - no final pass
///
/// ```
/// use perceptual_color::{DistanceSpace, HueTable, OrderOptions, VibrancyFilter};
///
/// let options = OrderOptions::new()
///     .resolution(16)
///     .hue_table(HueTable::eight_with_wrap())
///     .batch_size(250)
///     .vibrancy(Some(VibrancyFilter::default()))
///     .distance(DistanceSpace::Rgb);
/// assert_eq!(options.batch_size, 250);
/// ```
#[derive(Debug, Clone)]
pub struct OrderOptions {
    /// Lattice points per channel. Must be within `2..=256`.
    pub resolution: usize,

    pub hue_table: HueTable,

    /// Colors per batch. Must be at least 1.
    pub batch_size: usize,

    /// Optional pre-filter applied before pre-sorting.
    pub vibrancy: Option<VibrancyFilter>,

    pub distance: DistanceSpace,

    /// Re-run nearest-neighbour over the concatenated batches in
    /// [`order_segment`](super::PerceptualOrderer::order_segment).
    ///
    /// Incremental batches never see this pass.
    pub final_pass: bool,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            hue_table: HueTable::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            vibrancy: None,
            distance: DistanceSpace::default(),
            final_pass: false,
        }
    }
}

impl OrderOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    #[inline]
    pub fn hue_table(mut self, table: HueTable) -> Self {
        self.hue_table = table;
        self
    }

    #[inline]
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    #[inline]
    pub fn vibrancy(mut self, filter: Option<VibrancyFilter>) -> Self {
        self.vibrancy = filter;
        self
    }

    #[inline]
    pub fn distance(mut self, space: DistanceSpace) -> Self {
        self.distance = space;
        self
    }

    #[inline]
    pub fn final_pass(mut self, enabled: bool) -> Self {
        self.final_pass = enabled;
        self
    }
}
