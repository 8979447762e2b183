#![forbid(unsafe_code)]

//! Per-item style snapshots and the sizing capability.

use cellflow_core::geometry::{Sides, Size};

use crate::Axis;
use crate::scalar::{Frac, Scalar};

/// Overlay mode for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    /// Normal flow participation.
    #[default]
    None,
    /// Full-screen overlay. Excluded from flow-space accounting on both
    /// axes; still receives a box model.
    Screen,
}

impl Overlay {
    /// Whether the item is excluded from flow-space accounting.
    #[inline]
    #[must_use]
    pub const fn is_screen(self) -> bool {
        matches!(self, Overlay::Screen)
    }
}

/// Read-only style bundle consumed by the solvers.
///
/// Produced per item per layout pass by the style system; the engine never
/// mutates or retains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleSnapshot {
    /// Primary width scalar, if set.
    pub width: Option<Scalar>,
    /// Primary height scalar, if set.
    pub height: Option<Scalar>,
    /// Lower width bound, if set.
    pub min_width: Option<Scalar>,
    /// Upper width bound, if set.
    pub max_width: Option<Scalar>,
    /// Lower height bound, if set.
    pub min_height: Option<Scalar>,
    /// Upper height bound, if set.
    pub max_height: Option<Scalar>,
    /// Margin around the item.
    pub margin: Sides,
    /// Overlay mode.
    pub overlay: Overlay,
}

impl StyleSnapshot {
    /// The primary scalar for `axis`.
    #[inline]
    #[must_use]
    pub const fn scalar(&self, axis: Axis) -> Option<Scalar> {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }

    /// The minimum bound scalar for `axis`.
    #[inline]
    #[must_use]
    pub const fn min_scalar(&self, axis: Axis) -> Option<Scalar> {
        match axis {
            Axis::Width => self.min_width,
            Axis::Height => self.min_height,
        }
    }

    /// The maximum bound scalar for `axis`.
    #[inline]
    #[must_use]
    pub const fn max_scalar(&self, axis: Axis) -> Option<Scalar> {
        match axis {
            Axis::Width => self.max_width,
            Axis::Height => self.max_height,
        }
    }
}

/// An item's resolved content size plus margin, prior to rendering.
///
/// Widths and heights stay exact rationals here; the paint layer floors
/// them when it places content on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxModel {
    /// Content width in exact cells.
    pub width: Frac,
    /// Content height in exact cells.
    pub height: Frac,
    /// Margin around the content.
    pub margin: Sides,
}

impl BoxModel {
    /// Create a new box model.
    #[must_use]
    pub const fn new(width: Frac, height: Frac, margin: Sides) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Content length along `axis`.
    #[inline]
    #[must_use]
    pub const fn length(&self, axis: Axis) -> Frac {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }
}

/// Sizing capability, implemented once per item kind.
///
/// Decouples the solvers from concrete widget representations: the engine
/// only ever reads a style snapshot and asks for an intrinsic box model.
/// Implementations may recurse into nested layout but must stay synchronous
/// and total within their own contract; sizing failures are theirs to
/// surface loudly, never to coerce into sentinel lengths.
pub trait LayoutItem {
    /// Current style bundle for this item.
    fn style_snapshot(&self) -> StyleSnapshot;

    /// Compute this item's box model.
    ///
    /// `width_fraction` and `height_fraction` carry the resolved value of
    /// one fraction unit on the flow axis and the available cross-axis
    /// space on the other. `greedy` asks auto-sized content to take all
    /// offered space rather than its minimum.
    fn get_box_model(
        &self,
        size: Size,
        viewport: Size,
        width_fraction: Frac,
        height_fraction: Frac,
        greedy: bool,
    ) -> BoxModel;
}
