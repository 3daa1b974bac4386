//! Discretized RGB cube enumeration.

use crate::color::{Hsb, Lab, Srgb};

use super::error::OrderError;

/// Smallest and largest supported cube resolution.
pub const MIN_RESOLUTION: usize = 2;
pub const MAX_RESOLUTION: usize = 256;

/// One enumerated cube color with its derived representations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorEntry {
    pub rgb: Srgb,
    pub hsb: Hsb,
    pub lab: Lab,
}

impl ColorEntry {
    pub fn new(rgb: Srgb) -> Self {
        Self {
            rgb,
            hsb: Hsb::from(rgb),
            lab: Lab::from(rgb),
        }
    }
}

/// Immutable enumeration of an `n × n × n` RGB lattice.
///
/// Entries are stored in `r`-major order: blue varies fastest. The position
/// of an entry is its enumeration index, used as the last tie-breaker when
/// pre-sorting.
///
/// ```
/// use perceptual_color::ColorCube;
///
/// let cube = ColorCube::enumerate(2).unwrap();
/// assert_eq!(cube.len(), 8);
/// assert_eq!(cube.entries()[1].rgb.b, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ColorCube {
    resolution: usize,
    entries: Vec<ColorEntry>,
}

impl ColorCube {
    /// Enumerate every lattice point. Channel `i` maps to `i / (n - 1)`.
    pub fn enumerate(resolution: usize) -> Result<Self, OrderError> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
            return Err(OrderError::InvalidResolution(resolution));
        }

        let scale = (resolution - 1) as f64;
        let mut entries = Vec::with_capacity(resolution.pow(3));
        for r in 0..resolution {
            for g in 0..resolution {
                for b in 0..resolution {
                    let rgb = Srgb::new(r as f64 / scale, g as f64 / scale, b as f64 / scale);
                    entries.push(ColorEntry::new(rgb));
                }
            }
        }

        Ok(Self {
            resolution,
            entries,
        })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Drops dull colors before ordering.
///
/// An entry passes when both its saturation and brightness reach the
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VibrancyFilter {
    pub min_saturation: f64,
    pub min_brightness: f64,
}

impl Default for VibrancyFilter {
    fn default() -> Self {
        Self {
            min_saturation: 0.5,
            min_brightness: 0.5,
        }
    }
}

impl VibrancyFilter {
    pub fn new(min_saturation: f64, min_brightness: f64) -> Self {
        Self {
            min_saturation,
            min_brightness,
        }
    }

    #[inline]
    pub fn accepts(&self, hsb: &Hsb) -> bool {
        hsb.saturation >= self.min_saturation && hsb.brightness >= self.min_brightness
    }

    pub(crate) fn validate(&self) -> Result<(), OrderError> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if in_unit(self.min_saturation) && in_unit(self.min_brightness) {
            Ok(())
        } else {
            Err(OrderError::InvalidVibrancy)
        }
    }
}
