#![forbid(unsafe_code)]

//! Declarative size scalars and their exact-rational resolution.

use cellflow_core::geometry::Size;
use num_rational::Ratio;

use crate::Axis;

/// Exact rational length in grid cells.
///
/// All intermediate layout arithmetic stays rational; flooring to integer
/// cells happens once, when span boundaries are emitted.
pub type Frac = Ratio<i64>;

/// Build a [`Frac`] from an integer cell count.
#[inline]
#[must_use]
pub fn frac(cells: i64) -> Frac {
    Frac::from_integer(cells)
}

/// A declarative size for one axis of a container or widget.
///
/// Percent variants carry the axis of the edge they reference, so a width
/// scalar may be expressed as a share of the container height and vice
/// versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    /// An exact size in cells.
    Cells(u16),
    /// A percentage of the container edge on the given axis.
    Percent(Frac, Axis),
    /// A percentage of the viewport edge on the given axis.
    ViewPercent(Frac, Axis),
    /// A weighted share of the space left over after fixed-size siblings.
    Fraction(Frac),
    /// Defer to the item's intrinsic content size.
    Auto,
}

impl Scalar {
    /// Fixed cell count.
    #[must_use]
    pub const fn cells(cells: u16) -> Self {
        Self::Cells(cells)
    }

    /// Integer-weight fraction (`weight` shares of the leftover space).
    #[must_use]
    pub fn fraction(weight: i64) -> Self {
        Self::Fraction(frac(weight))
    }

    /// Integer percentage of the container edge on `axis`.
    #[must_use]
    pub fn percent(value: i64, axis: Axis) -> Self {
        Self::Percent(frac(value), axis)
    }

    /// Integer percentage of the viewport edge on `axis`.
    #[must_use]
    pub fn view_percent(value: i64, axis: Axis) -> Self {
        Self::ViewPercent(frac(value), axis)
    }

    /// Whether this scalar is sized in fraction units.
    #[inline]
    #[must_use]
    pub const fn is_fraction(&self) -> bool {
        matches!(self, Scalar::Fraction(_))
    }

    /// Whether this scalar defers to intrinsic sizing.
    #[inline]
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Scalar::Auto)
    }

    /// The raw numeric magnitude, without unit interpretation.
    ///
    /// For fraction scalars this is the weight the solvers distribute
    /// leftover space by. `Auto` has no magnitude and reports zero.
    #[must_use]
    pub fn magnitude(&self) -> Frac {
        match *self {
            Scalar::Cells(cells) => frac(i64::from(cells)),
            Scalar::Percent(value, _) | Scalar::ViewPercent(value, _) => value,
            Scalar::Fraction(weight) => weight,
            Scalar::Auto => frac(0),
        }
    }

    /// Resolve to an exact rational length.
    ///
    /// The result depends only on the container and viewport sizes and the
    /// supplied `fraction_unit`, never on sibling scalars. `Auto` resolves
    /// to zero; auto-sized items are routed through intrinsic sizing by the
    /// box-model pass, not through this method.
    #[must_use]
    pub fn resolve(&self, size: Size, viewport: Size, fraction_unit: Frac) -> Frac {
        match *self {
            Scalar::Cells(cells) => frac(i64::from(cells)),
            Scalar::Percent(value, axis) => value * frac(i64::from(axis.of(size))) / frac(100),
            Scalar::ViewPercent(value, axis) => {
                value * frac(i64::from(axis.of(viewport))) / frac(100)
            }
            Scalar::Fraction(weight) => weight * fraction_unit,
            Scalar::Auto => frac(0),
        }
    }
}
