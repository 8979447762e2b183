#![forbid(unsafe_code)]

//! Axis layout solvers.
//!
//! This crate resolves declarative size scalars into concrete cell spans
//! along one axis of a terminal grid:
//!
//! - [`Track`] - gutter-separated rows/columns resolved to (offset, length) spans
//! - [`resolve_fraction_unit`] - the shared `fr` unit, with per-item min/max clamps
//! - [`resolve_box_models`] - per-item box models for a run of siblings
//! - [`Scalar`] - declarative sizes (cells, percent, viewport percent, fraction, auto)
//!
//! Arithmetic is exact-rational end to end ([`Frac`]); each entry point
//! floors to integer cells exactly once, so repeated passes over the same
//! inputs are bit-identical. Two-dimensional layout is the caller's
//! composition: invoke the engine once per axis.
//!
//! # Example
//!
//! ```
//! use cellflow_core::geometry::Size;
//! use cellflow_layout::{Scalar, Track};
//!
//! let size = Size::new(10, 4);
//! let spans = Track::new([Scalar::fraction(1); 3]).resolve(10, size, size);
//! assert_eq!(spans, vec![(0, 3), (3, 3), (6, 4)]);
//! ```

pub mod flow;
pub mod fraction;
pub mod scalar;
pub mod style;

pub use cellflow_core::geometry::{Sides, Size};
pub use flow::resolve_box_models;
pub use fraction::resolve_fraction_unit;
use num_traits::{One, Zero};
pub use scalar::{Frac, Scalar, frac};
pub use style::{BoxModel, LayoutItem, Overlay, StyleSnapshot};

/// The axis a resolution pass runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Resolve widths (columns).
    #[default]
    Width,
    /// Resolve heights (rows).
    Height,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    #[must_use]
    pub const fn cross(self) -> Axis {
        match self {
            Axis::Width => Axis::Height,
            Axis::Height => Axis::Width,
        }
    }

    /// Length of `size` along this axis.
    #[inline]
    #[must_use]
    pub const fn of(self, size: Size) -> u16 {
        match self {
            Axis::Width => size.width,
            Axis::Height => size.height,
        }
    }
}

/// A run of scalar-sized cells along one axis, separated by a gutter.
///
/// Resolution is a total function of its inputs: degenerate magnitudes
/// (zero totals, gutters wider than the track, oversubscribed space) clamp
/// to zero-length spans rather than failing.
#[derive(Debug, Clone, Default)]
pub struct Track {
    scalars: Vec<Scalar>,
    gutter: u16,
    expand: bool,
    shrink: bool,
    minimums: Option<Vec<u16>>,
}

impl Track {
    /// Create a track from scalars, one per cell.
    pub fn new(scalars: impl IntoIterator<Item = Scalar>) -> Self {
        Self {
            scalars: scalars.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Set the gutter between adjacent cells.
    #[must_use]
    pub fn gutter(mut self, gutter: u16) -> Self {
        self.gutter = gutter;
        self
    }

    /// Grow cells proportionally to their share when they underfill the track.
    #[must_use]
    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Shrink cells proportionally to their share when they overflow the track.
    #[must_use]
    pub fn shrink(mut self, shrink: bool) -> Self {
        self.shrink = shrink;
        self
    }

    /// Per-cell minimum lengths, honored while shrinking.
    #[must_use]
    pub fn minimums(mut self, minimums: impl IntoIterator<Item = u16>) -> Self {
        self.minimums = Some(minimums.into_iter().collect());
        self
    }

    /// Number of cells (and output spans).
    #[must_use]
    pub fn len(&self) -> usize {
        self.scalars.len()
    }

    /// Whether the track has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }

    /// Resolve the track into (offset, length) spans in cells.
    ///
    /// Fixed scalars resolve first; fraction scalars then split whatever the
    /// gutter and the fixed cells left over, all in exact rationals. The
    /// single floor-to-integer step happens while the running boundary is
    /// accumulated, so lengths absorb rounding without drifting: adjacent
    /// spans always butt against the same floored boundary.
    pub fn resolve(&self, total: u16, size: Size, viewport: Size) -> Vec<(u16, u16)> {
        if self.scalars.is_empty() {
            return Vec::new();
        }

        // Non-fraction scalars resolve immediately; fraction scalars wait
        // for the shared unit.
        let immediate: Vec<Option<Frac>> = self
            .scalars
            .iter()
            .map(|scalar| {
                if scalar.is_fraction() {
                    None
                } else {
                    Some(scalar.resolve(size, viewport, Frac::one()))
                }
            })
            .collect();

        let total_weight = self
            .scalars
            .iter()
            .zip(&immediate)
            .filter(|(_, length)| length.is_none())
            .fold(Frac::zero(), |acc, (scalar, _)| acc + scalar.magnitude());

        let total_gutter = i64::from(self.gutter) * (self.scalars.len() as i64 - 1);

        let mut lengths: Vec<Frac> = if total_weight > Frac::zero() {
            let consumed = immediate
                .iter()
                .flatten()
                .fold(Frac::zero(), |acc, length| acc + *length);
            let remaining =
                (frac(i64::from(total) - total_gutter) - consumed).max(Frac::zero());
            let fraction_unit = remaining / total_weight;
            self.scalars
                .iter()
                .zip(&immediate)
                .map(|(scalar, length)| {
                    length.unwrap_or_else(|| scalar.magnitude() * fraction_unit)
                })
                .collect()
        } else {
            immediate
                .into_iter()
                .map(|length| length.unwrap_or_else(Frac::zero))
                .collect()
        };

        if self.expand || self.shrink {
            let total_space = frac(i64::from(total) - total_gutter);
            let used_space = lengths
                .iter()
                .fold(Frac::zero(), |acc, length| acc + *length);

            if self.expand {
                let remaining_space = total_space - used_space;
                if remaining_space > Frac::zero() && used_space > Frac::zero() {
                    for length in &mut lengths {
                        *length += *length / used_space * remaining_space;
                    }
                }
            }
            if self.shrink {
                let mut used_space = used_space;
                let mut excess_space = used_space - total_space;

                if let Some(minimums) = &self.minimums
                    && excess_space > Frac::zero()
                {
                    // One in-order pass: each cell gives up at least its
                    // full share of the excess (never less than the whole
                    // excess when its share is under one), floored at its
                    // minimum, with the pool rebalanced after every cell.
                    for (length, minimum) in lengths.iter_mut().zip(minimums) {
                        if used_space <= Frac::zero() {
                            break;
                        }
                        let remove_space =
                            (*length / used_space).max(Frac::one()) * excess_space;
                        let updated = (*length - remove_space).max(frac(i64::from(*minimum)));
                        used_space = used_space - *length + updated;
                        *length = updated;
                        excess_space = used_space - total_space;
                        if excess_space <= Frac::zero() {
                            break;
                        }
                    }

                    used_space = lengths
                        .iter()
                        .fold(Frac::zero(), |acc, length| acc + *length);
                    excess_space = used_space - total_space;
                }

                // Whatever the minimums would not yield comes off
                // proportionally, minimum protection ends here.
                if excess_space > Frac::zero() && used_space > Frac::zero() {
                    for length in &mut lengths {
                        *length -= *length / used_space * excess_space;
                    }
                }
            }
        }

        // Single floor step: accumulate the running boundary (cell, gutter,
        // cell, ...) and floor each partial sum; spans are deltas between
        // consecutive floored cell boundaries.
        let gutter = frac(i64::from(self.gutter));
        let max_cell = i64::from(u16::MAX);
        let mut spans = Vec::with_capacity(lengths.len());
        let mut boundary = Frac::zero();
        for length in &lengths {
            let offset = boundary.floor().to_integer();
            boundary += *length;
            let end = boundary.floor().to_integer();
            spans.push((
                offset.clamp(0, max_cell) as u16,
                (end - offset).clamp(0, max_cell) as u16,
            ));
            boundary += gutter;
        }
        spans
    }
}
