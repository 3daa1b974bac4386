//! Error types for color space setup
//!
//! Everything here is a configuration fault detected when the orderer is
//! built. Once construction succeeds, ordering itself cannot fail.

use std::fmt;

/// A hue table that does not partition `[0, 1)` into the configured
/// segments.
#[derive(Debug, Clone, PartialEq)]
pub enum HueTableError {
    /// Segment count is zero
    NoSegments,
    /// No ranges were given
    NoRanges,
    /// A range bound is NaN or infinite
    NonFiniteBound {
        /// Index of the offending range, in the order given
        index: usize,
    },
    /// A range has `end <= start`
    EmptyRange {
        /// Index of the offending range, in the order given
        index: usize,
    },
    /// Part of `[0, 1)` is covered by no range
    Gap {
        from: f64,
        to: f64,
    },
    /// Two ranges cover the same hue interval
    Overlap {
        from: f64,
        to: f64,
    },
    /// A range targets a segment index outside `0..segment_count`
    UnknownSegment {
        segment: usize,
        segment_count: usize,
    },
    /// A segment has no range assigned to it
    UncoveredSegment {
        segment: usize,
    },
}

impl fmt::Display for HueTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HueTableError::NoSegments => write!(f, "hue table needs at least one segment"),
            HueTableError::NoRanges => write!(f, "hue table has no ranges"),
            HueTableError::NonFiniteBound { index } => {
                write!(f, "hue range {} has a non-finite bound", index)
            }
            HueTableError::EmptyRange { index } => {
                write!(f, "hue range {} is empty (end <= start)", index)
            }
            HueTableError::Gap { from, to } => {
                write!(f, "hues {:.4}..{:.4} belong to no segment", from, to)
            }
            HueTableError::Overlap { from, to } => {
                write!(f, "hues {:.4}..{:.4} belong to more than one range", from, to)
            }
            HueTableError::UnknownSegment {
                segment,
                segment_count,
            } => write!(
                f,
                "hue range targets segment {} but only {} segments exist",
                segment, segment_count
            ),
            HueTableError::UncoveredSegment { segment } => {
                write!(f, "segment {} has no hue range", segment)
            }
        }
    }
}

impl std::error::Error for HueTableError {}

/// Error type for building a [`PerceptualOrderer`](super::PerceptualOrderer).
#[derive(Debug, Clone, PartialEq)]
pub enum OrderError {
    /// Cube resolution outside `2..=256`
    InvalidResolution(usize),
    /// Batch size of zero
    InvalidBatchSize,
    /// Vibrancy threshold outside `0.0..=1.0`
    InvalidVibrancy,
    /// Hue table validation failed
    HueTable(HueTableError),
}

impl From<HueTableError> for OrderError {
    fn from(err: HueTableError) -> Self {
        OrderError::HueTable(err)
    }
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::InvalidResolution(n) => {
                write!(f, "cube resolution {} is outside 2..=256", n)
            }
            OrderError::InvalidBatchSize => write!(f, "batch size must be at least 1"),
            OrderError::InvalidVibrancy => {
                write!(f, "vibrancy thresholds must be within 0.0..=1.0")
            }
            OrderError::HueTable(err) => write!(f, "invalid hue table: {}", err),
        }
    }
}

impl std::error::Error for OrderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrderError::HueTable(err) => Some(err),
            _ => None,
        }
    }
}
