//! Segmented, batched perceptual ordering.

use rayon::prelude::*;

use crate::color::{distance_squared, Srgb};

use super::cube::{ColorCube, ColorEntry};
use super::error::OrderError;
use super::hue_table::HueTable;
use super::options::{DistanceSpace, OrderOptions};
use super::tsp::nearest_neighbour_order;

/// Pre-sorted hue segments of an enumerated cube, ready to be ordered batch
/// by batch.
///
/// Construction does all the work that is shared between batches:
/// enumeration, segmentation, filtering and the saturation/brightness
/// pre-sort. After that the orderer is immutable and every method takes
/// `&self`, so it can sit behind an `Arc` and serve several threads.
///
/// ```
/// use perceptual_color::{HueTable, OrderOptions, PerceptualOrderer};
///
/// let options = OrderOptions::new()
///     .resolution(4)
///     .hue_table(HueTable::uniform(2).unwrap())
///     .batch_size(8);
/// let orderer = PerceptualOrderer::new(options).unwrap();
///
/// let total: usize = (0..2).map(|s| orderer.segment_len(s)).sum();
/// assert_eq!(total, 64);
///
/// let first = orderer.compute_batch(0, 0).unwrap();
/// assert_eq!(first.len(), 8);
/// assert!(orderer.compute_batch(0, orderer.batch_count(0)).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PerceptualOrderer {
    options: OrderOptions,
    cube_len: usize,
    segments: Vec<Vec<ColorEntry>>,
}

impl PerceptualOrderer {
    /// Validate `options`, enumerate the cube and pre-sort every segment.
    ///
    /// Segments are built in parallel on the rayon pool.
    pub fn new(options: OrderOptions) -> Result<Self, OrderError> {
        if options.batch_size == 0 {
            return Err(OrderError::InvalidBatchSize);
        }
        if let Some(filter) = &options.vibrancy {
            filter.validate()?;
        }
        let table = HueTable::new(
            options.hue_table.segment_count(),
            options.hue_table.ranges().to_vec(),
        )?;

        let cube = ColorCube::enumerate(options.resolution)?;
        let segments = build_segments(&cube, &table, &options);

        Ok(Self {
            cube_len: cube.len(),
            options,
            segments,
        })
    }

    pub fn options(&self) -> &OrderOptions {
        &self.options
    }

    /// Number of colors in the full cube, before filtering.
    pub fn cube_len(&self) -> usize {
        self.cube_len
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn batch_size(&self) -> usize {
        self.options.batch_size
    }

    /// Colors in `segment` after filtering. Zero for an unknown segment.
    pub fn segment_len(&self, segment: usize) -> usize {
        self.segments.get(segment).map_or(0, Vec::len)
    }

    /// Number of batches `segment` splits into. The last may be partial.
    pub fn batch_count(&self, segment: usize) -> usize {
        self.segment_len(segment).div_ceil(self.options.batch_size)
    }

    /// Pre-sorted entries of `segment`.
    pub fn segment_entries(&self, segment: usize) -> Option<&[ColorEntry]> {
        self.segments.get(segment).map(Vec::as_slice)
    }

    /// TSP-order batch `batch_index` of `segment`.
    ///
    /// Returns `None` for an unknown segment or an index past the last
    /// batch. Calling this twice with the same arguments yields the same
    /// colors in the same order.
    pub fn compute_batch(&self, segment: usize, batch_index: usize) -> Option<Vec<Srgb>> {
        let entries = self.batch_entries(segment, batch_index)?;
        Some(
            self.order_entries(entries)
                .into_iter()
                .map(|entry| entry.rgb)
                .collect(),
        )
    }

    /// Whole segment, batch paths concatenated in batch order.
    ///
    /// With `final_pass` enabled, the concatenation is re-ordered once more
    /// as a single tour. That pass is quadratic in the segment size.
    pub fn order_segment(&self, segment: usize) -> Option<Vec<Srgb>> {
        let entries = self.segments.get(segment)?;

        let mut ordered: Vec<ColorEntry> = entries
            .chunks(self.options.batch_size)
            .flat_map(|batch| self.order_entries(batch))
            .collect();

        if self.options.final_pass {
            ordered = self.order_entries(&ordered);
        }

        Some(ordered.into_iter().map(|entry| entry.rgb).collect())
    }

    fn batch_entries(&self, segment: usize, batch_index: usize) -> Option<&[ColorEntry]> {
        let entries = self.segments.get(segment)?;
        let start = batch_index.checked_mul(self.options.batch_size)?;
        if start >= entries.len() {
            return None;
        }
        let end = (start + self.options.batch_size).min(entries.len());
        Some(&entries[start..end])
    }

    fn order_entries(&self, entries: &[ColorEntry]) -> Vec<ColorEntry> {
        let order = match self.options.distance {
            DistanceSpace::Lab => {
                nearest_neighbour_order(entries, |a, b| distance_squared(&a.lab, &b.lab))
            }
            DistanceSpace::Rgb => {
                nearest_neighbour_order(entries, |a, b| distance_squared(&a.rgb, &b.rgb))
            }
        };
        order.into_iter().map(|i| entries[i]).collect()
    }
}

fn build_segments(cube: &ColorCube, table: &HueTable, options: &OrderOptions) -> Vec<Vec<ColorEntry>> {
    (0..table.segment_count())
        .into_par_iter()
        .map(|segment| presort_segment(cube, table, options, segment))
        .collect()
}

/// Entries of one segment, filtered, sorted by saturation then brightness
/// (both descending). The sort is stable, so enumeration order breaks the
/// remaining ties.
fn presort_segment(
    cube: &ColorCube,
    table: &HueTable,
    options: &OrderOptions,
    segment: usize,
) -> Vec<ColorEntry> {
    let mut entries: Vec<ColorEntry> = cube
        .entries()
        .iter()
        .filter(|entry| table.segment_of(entry.hsb.hue) == segment)
        .filter(|entry| {
            options
                .vibrancy
                .as_ref()
                .map_or(true, |filter| filter.accepts(&entry.hsb))
        })
        .copied()
        .collect();

    entries.sort_by(|a, b| {
        b.hsb
            .saturation
            .total_cmp(&a.hsb.saturation)
            .then_with(|| b.hsb.brightness.total_cmp(&a.hsb.brightness))
    });
    entries
}
