//! Shared live-palette state.

use perceptual_color::{PaletteSmoother, Srgb};
use std::sync::{Mutex, PoisonError};

use super::sampler::extract_palette;
use crate::error::SampleError;
use crate::models::PaletteConfig;

/// One observed frame and the smoothed palette after it.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteReading {
    pub raw: Vec<Srgb>,
    pub smoothed: Vec<Srgb>,
    /// Palettes currently in the smoothing history
    pub history: usize,
}

#[derive(Debug)]
struct TrackerState {
    smoother: PaletteSmoother,
    /// Palette size of the frames in history
    k: Option<usize>,
}

/// Feeds successive frame palettes through a [`PaletteSmoother`].
///
/// History is reset whenever the palette size changes, so slots are never
/// averaged across palettes of different K.
#[derive(Debug)]
pub struct PaletteTracker {
    state: Mutex<TrackerState>,
    default_k: usize,
    sample_size: usize,
}

impl PaletteTracker {
    pub fn new(config: &PaletteConfig) -> Self {
        Self {
            state: Mutex::new(TrackerState {
                smoother: PaletteSmoother::new(config.history),
                k: None,
            }),
            default_k: config.k,
            sample_size: config.sample_size,
        }
    }

    /// Push an already quantized palette of fixed length.
    pub fn observe(&self, raw: Vec<Srgb>) -> PaletteReading {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let k = raw.len();
        if state.k.is_some_and(|previous| previous != k) {
            tracing::debug!(previous = ?state.k, k, "Palette size changed, clearing history");
            state.smoother.clear();
        }
        state.k = Some(k);
        state.smoother.push(raw.clone());

        PaletteReading {
            smoothed: state.smoother.current_average(),
            history: state.smoother.len(),
            raw,
        }
    }

    /// Extract a palette from PNG bytes and push it.
    ///
    /// CPU-bound; call from a blocking context for large images.
    pub fn sample(&self, png: &[u8], k: Option<usize>) -> Result<PaletteReading, SampleError> {
        let k = k.unwrap_or(self.default_k);
        let raw = extract_palette(png, k, self.sample_size)?;
        Ok(self.observe(raw))
    }

    /// Smoothed palette without pushing anything.
    pub fn current(&self) -> Vec<Srgb> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .smoother
            .current_average()
    }

    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.smoother.clear();
        state.k = None;
        tracing::debug!("Palette history cleared");
    }

    pub fn default_k(&self) -> usize {
        self.default_k
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

impl Default for PaletteTracker {
    fn default() -> Self {
        Self::new(&PaletteConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_observe_smooths_across_frames() {
        let tracker = PaletteTracker::default();
        tracker.observe(vec![Srgb::new(1.0, 1.0, 1.0); 2]);
        let reading = tracker.observe(vec![Srgb::BLACK; 2]);

        assert_eq!(reading.raw, vec![Srgb::BLACK; 2]);
        assert_eq!(reading.smoothed, vec![Srgb::new(0.5, 0.5, 0.5); 2]);
        assert_eq!(reading.history, 2);
    }

    #[test]
    fn test_size_change_clears_history() {
        let tracker = PaletteTracker::default();
        tracker.observe(vec![Srgb::new(1.0, 1.0, 1.0); 2]);
        let reading = tracker.observe(vec![Srgb::BLACK; 3]);

        assert_eq!(reading.history, 1);
        assert_eq!(reading.smoothed, vec![Srgb::BLACK; 3]);
    }

    #[test]
    fn test_reset() {
        let tracker = PaletteTracker::default();
        tracker.observe(vec![Srgb::BLACK; 4]);
        tracker.reset();
        assert!(tracker.current().is_empty());
    }

    #[test]
    fn test_history_capacity_from_config() {
        let tracker = PaletteTracker::new(&PaletteConfig {
            k: 4,
            history: 1,
            sample_size: 16,
        });
        tracker.observe(vec![Srgb::new(1.0, 1.0, 1.0)]);
        let reading = tracker.observe(vec![Srgb::BLACK]);
        assert_eq!(reading.smoothed, vec![Srgb::BLACK]);
        assert_eq!(tracker.default_k(), 4);
        assert_eq!(tracker.sample_size(), 16);
    }
}
