//! Temporal palette smoothing
//!
//! Quantizing successive frames independently makes the palette flicker.
//! [`PaletteSmoother`] keeps the last few palettes and reports their
//! per-slot average.

use std::collections::VecDeque;

use crate::color::Srgb;

/// Default number of palettes kept in history.
pub const DEFAULT_HISTORY: usize = 3;

/// Rolling history of quantized palettes with a per-slot average.
///
/// The smoother never resets itself. If the palette size changes the caller
/// should [`clear`](Self::clear) it, otherwise slots are averaged across the
/// discontinuity.
///
/// ```
/// use perceptual_color::{PaletteSmoother, Srgb};
///
/// let mut smoother = PaletteSmoother::new(2);
/// smoother.push(vec![Srgb::new(1.0, 1.0, 1.0)]);
/// smoother.push(vec![Srgb::new(0.0, 0.0, 0.0)]);
/// assert_eq!(smoother.current_average(), vec![Srgb::new(0.5, 0.5, 0.5)]);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteSmoother {
    history: VecDeque<Vec<Srgb>>,
    capacity: usize,
}

impl PaletteSmoother {
    /// Create a smoother holding at most `capacity` palettes (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a palette, evicting the oldest when the history is full.
    pub fn push(&mut self, palette: Vec<Srgb>) {
        self.history.push_back(palette);
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
    }

    /// Per-slot channel mean over every palette in history.
    ///
    /// Slot `i` is averaged only over the palettes that have an entry at
    /// `i`, and the result is as long as the longest palette in history.
    /// An empty history gives an empty palette.
    pub fn current_average(&self) -> Vec<Srgb> {
        let len = self.history.iter().map(Vec::len).max().unwrap_or(0);

        (0..len)
            .map(|slot| {
                let (sum, count) = self
                    .history
                    .iter()
                    .filter_map(|palette| palette.get(slot))
                    .fold(([0.0f64; 3], 0usize), |(sum, count), c| {
                        ([sum[0] + c.r, sum[1] + c.g, sum[2] + c.b], count + 1)
                    });
                let n = count as f64;
                Srgb::new(sum[0] / n, sum[1] / n, sum[2] / n)
            })
            .collect()
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for PaletteSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}
