//! Hue segmentation table
//!
//! A [`HueTable`] maps every hue in `[0, 1)` to exactly one segment. Ranges
//! are half-open and carry their target segment explicitly, so more than
//! one range may feed the same segment. That is how the red family, which
//! straddles hue 0/1, is kept in one segment: its upper part is a second
//! range pointing back at segment 0.

use super::error::HueTableError;

/// Tolerance when checking that consecutive ranges touch.
const ADJACENCY_TOLERANCE: f64 = 1e-9;

/// Half-open hue interval `[start, end)` assigned to `segment`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueRange {
    pub start: f64,
    pub end: f64,
    pub segment: usize,
}

impl HueRange {
    pub fn new(start: f64, end: f64, segment: usize) -> Self {
        Self {
            start,
            end,
            segment,
        }
    }

    #[inline]
    pub fn contains(&self, hue: f64) -> bool {
        hue >= self.start && hue < self.end
    }
}

/// Validated partition of the hue circle into segments.
#[derive(Debug, Clone, PartialEq)]
pub struct HueTable {
    segment_count: usize,
    /// Sorted by `start`; tiles `[0, 1)` without gaps or overlaps.
    ranges: Vec<HueRange>,
}

impl HueTable {
    /// Validate and build a table.
    ///
    /// Ranges may be given in any order. They must tile `[0, 1)` exactly,
    /// target only segments below `segment_count`, and every segment must
    /// receive at least one range.
    pub fn new(segment_count: usize, mut ranges: Vec<HueRange>) -> Result<Self, HueTableError> {
        if segment_count == 0 {
            return Err(HueTableError::NoSegments);
        }
        if ranges.is_empty() {
            return Err(HueTableError::NoRanges);
        }

        for (index, range) in ranges.iter().enumerate() {
            if !range.start.is_finite() || !range.end.is_finite() {
                return Err(HueTableError::NonFiniteBound { index });
            }
            if range.end <= range.start {
                return Err(HueTableError::EmptyRange { index });
            }
            if range.segment >= segment_count {
                return Err(HueTableError::UnknownSegment {
                    segment: range.segment,
                    segment_count,
                });
            }
        }

        ranges.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut cursor = 0.0;
        for range in &ranges {
            if range.start > cursor + ADJACENCY_TOLERANCE {
                return Err(HueTableError::Gap {
                    from: cursor,
                    to: range.start,
                });
            }
            if range.start < cursor - ADJACENCY_TOLERANCE {
                return Err(HueTableError::Overlap {
                    from: range.start,
                    to: cursor.min(range.end),
                });
            }
            cursor = range.end;
        }
        if (cursor - 1.0).abs() > ADJACENCY_TOLERANCE {
            return Err(if cursor < 1.0 {
                HueTableError::Gap {
                    from: cursor,
                    to: 1.0,
                }
            } else {
                HueTableError::Overlap {
                    from: 1.0,
                    to: cursor,
                }
            });
        }

        let mut covered = vec![false; segment_count];
        for range in &ranges {
            covered[range.segment] = true;
        }
        if let Some(segment) = covered.iter().position(|c| !c) {
            return Err(HueTableError::UncoveredSegment { segment });
        }

        Ok(Self {
            segment_count,
            ranges,
        })
    }

    /// `count` equal-width segments starting at hue 0.
    ///
    /// ```
    /// use perceptual_color::HueTable;
    ///
    /// let table = HueTable::uniform(6).unwrap();
    /// assert_eq!(table.segment_of(0.0), 0);
    /// assert_eq!(table.segment_of(0.5), 3);
    /// assert_eq!(table.segment_of(0.999), 5);
    /// ```
    pub fn uniform(count: usize) -> Result<Self, HueTableError> {
        let step = |i: usize| i as f64 / count as f64;
        let ranges = (0..count)
            .map(|i| HueRange::new(step(i), step(i + 1), i))
            .collect();
        Self::new(count, ranges)
    }

    /// Eight hue families over nine ranges.
    ///
    /// Segment order: red, orange, yellow, green, cyan, blue, purple, pink.
    /// The ninth range covers the reds just below hue 1.0 and is merged into
    /// segment 0.
    pub fn eight_with_wrap() -> Self {
        let ranges = vec![
            HueRange::new(0.0, 0.05, 0),
            HueRange::new(0.05, 0.11, 1),
            HueRange::new(0.11, 0.19, 2),
            HueRange::new(0.19, 0.45, 3),
            HueRange::new(0.45, 0.53, 4),
            HueRange::new(0.53, 0.70, 5),
            HueRange::new(0.70, 0.80, 6),
            HueRange::new(0.80, 0.95, 7),
            HueRange::new(0.95, 1.0, 0),
        ];
        Self {
            segment_count: 8,
            ranges,
        }
    }

    /// Segment that `hue` belongs to. Hue is taken modulo 1.0.
    pub fn segment_of(&self, hue: f64) -> usize {
        let hue = hue.rem_euclid(1.0);
        let index = self
            .ranges
            .partition_point(|range| range.start <= hue)
            .saturating_sub(1);
        self.ranges[index].segment
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn ranges(&self) -> &[HueRange] {
        &self.ranges
    }
}

impl Default for HueTable {
    /// Six equal segments.
    fn default() -> Self {
        let step = |i: usize| i as f64 / 6.0;
        Self {
            segment_count: 6,
            ranges: (0..6).map(|i| HueRange::new(step(i), step(i + 1), i)).collect(),
        }
    }
}
