#![forbid(unsafe_code)]

//! Box-model resolution for a run of sibling items.

use cellflow_core::geometry::Size;
use num_traits::Zero;

use crate::Axis;
use crate::fraction::resolve_fraction_unit;
use crate::scalar::{Frac, Scalar, frac};
use crate::style::{BoxModel, LayoutItem, StyleSnapshot};

/// Resolve box models for sibling items along `axis`.
///
/// `dimensions` carries one optional override scalar per item; `None`
/// defers to the item's own default sizing. Items whose override is absent
/// or not fraction-sized delegate to intrinsic sizing immediately, each
/// offered the container minus its own margin (floored at zero).
/// Fraction-sized items wait in unresolved slots until the space the others
/// consumed is known, then share the leftover through one fraction unit.
///
/// Overlay-screen items neither consume flow space nor participate in unit
/// derivation, but still receive a box model. Output order matches input
/// order.
pub fn resolve_box_models(
    dimensions: &[Option<Scalar>],
    items: &[&dyn LayoutItem],
    size: Size,
    viewport: Size,
    margin: Size,
    axis: Axis,
    greedy: bool,
) -> Vec<BoxModel> {
    let styles: Vec<StyleSnapshot> = items.iter().map(|item| item.style_snapshot()).collect();

    // Immediate pass: everything that does not need the shared unit.
    let box_models: Vec<Option<BoxModel>> = dimensions
        .iter()
        .zip(items)
        .zip(&styles)
        .map(|((dimension, item), item_styles)| {
            if dimension.is_some_and(|scalar| scalar.is_fraction()) {
                None
            } else {
                let margin_totals = item_styles.margin.totals();
                let width = (frac(i64::from(size.width))
                    - frac(i64::from(margin_totals.width)))
                .max(Frac::zero());
                let height = (frac(i64::from(size.height))
                    - frac(i64::from(margin_totals.height)))
                .max(Frac::zero());
                Some(item.get_box_model(size, viewport, width, height, greedy))
            }
        })
        .collect();

    if box_models.iter().all(Option::is_some) {
        return box_models.into_iter().flatten().collect();
    }

    // Space already consumed on the flow axis by resolved, in-flow items.
    let consumed = box_models
        .iter()
        .zip(&styles)
        .filter(|(slot, item_styles)| slot.is_some() && !item_styles.overlay.is_screen())
        .filter_map(|(slot, _)| slot.as_ref())
        .fold(Frac::zero(), |acc, model| acc + model.length(axis));

    let remaining_space = (i64::from(axis.of(size)) - consumed.to_integer()
        - i64::from(axis.of(margin)))
    .max(0);

    let unresolved_styles: Vec<StyleSnapshot> = box_models
        .iter()
        .zip(&styles)
        .filter(|(slot, item_styles)| slot.is_none() && !item_styles.overlay.is_screen())
        .map(|(_, item_styles)| *item_styles)
        .collect();

    let fraction_unit = resolve_fraction_unit(
        &unresolved_styles,
        size,
        viewport,
        frac(remaining_space),
        axis,
    );

    #[cfg(feature = "tracing")]
    tracing::trace!(
        remaining_space,
        unresolved = unresolved_styles.len(),
        "box-model flow pass derived fraction unit"
    );

    let margin_size = size.saturating_sub(margin);
    let (width_fraction, height_fraction) = match axis {
        Axis::Width => (fraction_unit, frac(i64::from(margin_size.height))),
        Axis::Height => (frac(i64::from(margin_size.width)), fraction_unit),
    };

    box_models
        .into_iter()
        .zip(items)
        .map(|(slot, item)| {
            slot.unwrap_or_else(|| {
                item.get_box_model(size, viewport, width_fraction, height_fraction, greedy)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellflow_core::geometry::Sides;
    use num_traits::One;

    use crate::style::Overlay;

    /// Minimal collaborator: resolves its own scalars the way a widget's
    /// intrinsic sizing would, including min/max clamps.
    struct TestItem {
        styles: StyleSnapshot,
    }

    impl TestItem {
        fn new(styles: StyleSnapshot) -> Self {
            Self { styles }
        }

        fn clamp(
            &self,
            value: Frac,
            min: Option<Scalar>,
            max: Option<Scalar>,
            size: Size,
            viewport: Size,
        ) -> Frac {
            let mut value = value;
            if let Some(min) = min {
                value = value.max(min.resolve(size, viewport, Frac::one()));
            }
            if let Some(max) = max {
                value = value.min(max.resolve(size, viewport, Frac::one()));
            }
            value
        }
    }

    impl LayoutItem for TestItem {
        fn style_snapshot(&self) -> StyleSnapshot {
            self.styles
        }

        fn get_box_model(
            &self,
            size: Size,
            viewport: Size,
            width_fraction: Frac,
            height_fraction: Frac,
            _greedy: bool,
        ) -> BoxModel {
            let width = match self.styles.width {
                Some(scalar) => scalar.resolve(size, viewport, width_fraction),
                None => width_fraction,
            };
            let height = match self.styles.height {
                Some(scalar) => scalar.resolve(size, viewport, height_fraction),
                None => height_fraction,
            };
            BoxModel::new(
                self.clamp(width, self.styles.min_width, self.styles.max_width, size, viewport),
                self.clamp(height, self.styles.min_height, self.styles.max_height, size, viewport),
                self.styles.margin,
            )
        }
    }

    fn width_style(scalar: Scalar) -> StyleSnapshot {
        StyleSnapshot {
            width: Some(scalar),
            height: Some(Scalar::cells(1)),
            ..Default::default()
        }
    }

    fn resolve_widths(items: &[TestItem], size: Size) -> Vec<BoxModel> {
        let dimensions: Vec<Option<Scalar>> =
            items.iter().map(|item| item.styles.width).collect();
        let refs: Vec<&dyn LayoutItem> =
            items.iter().map(|item| item as &dyn LayoutItem).collect();
        resolve_box_models(
            &dimensions,
            &refs,
            size,
            size,
            Size::default(),
            Axis::Width,
            true,
        )
    }

    #[test]
    fn fixed_and_fraction_share_a_container() {
        // One 10-cell item and one 1fr item in 30 cells: the fraction item
        // takes the remaining 20.
        let items = [
            TestItem::new(width_style(Scalar::cells(10))),
            TestItem::new(width_style(Scalar::fraction(1))),
        ];
        let models = resolve_widths(&items, Size::new(30, 10));
        assert_eq!(models[0].width, frac(10));
        assert_eq!(models[1].width, frac(20));
    }

    #[test]
    fn all_fixed_returns_without_unit_derivation() {
        let items = [
            TestItem::new(width_style(Scalar::cells(5))),
            TestItem::new(width_style(Scalar::percent(50, Axis::Width))),
        ];
        let models = resolve_widths(&items, Size::new(40, 10));
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].width, frac(5));
        assert_eq!(models[1].width, frac(20));
    }

    #[test]
    fn fraction_weights_split_leftover_space() {
        let items = [
            TestItem::new(width_style(Scalar::cells(10))),
            TestItem::new(width_style(Scalar::fraction(1))),
            TestItem::new(width_style(Scalar::fraction(3))),
        ];
        let models = resolve_widths(&items, Size::new(50, 10));
        assert_eq!(models[1].width, frac(10));
        assert_eq!(models[2].width, frac(30));
    }

    #[test]
    fn min_width_wins_over_the_shared_unit() {
        // 1fr + 1fr in 20 cells, first has min-width 15: the solver pins it
        // and the sibling keeps what is left.
        let clamped = StyleSnapshot {
            width: Some(Scalar::fraction(1)),
            min_width: Some(Scalar::cells(15)),
            height: Some(Scalar::cells(1)),
            ..Default::default()
        };
        let items = [
            TestItem::new(clamped),
            TestItem::new(width_style(Scalar::fraction(1))),
        ];
        let models = resolve_widths(&items, Size::new(20, 10));
        assert_eq!(models[0].width, frac(15));
        assert_eq!(models[1].width, frac(5));
    }

    #[test]
    fn overlay_screen_consumes_no_flow_space() {
        // The overlay's fixed 25 cells must not count against the fraction
        // item's leftover.
        let overlay = StyleSnapshot {
            width: Some(Scalar::cells(25)),
            height: Some(Scalar::cells(1)),
            overlay: Overlay::Screen,
            ..Default::default()
        };
        let items = [
            TestItem::new(overlay),
            TestItem::new(width_style(Scalar::cells(10))),
            TestItem::new(width_style(Scalar::fraction(1))),
        ];
        let models = resolve_widths(&items, Size::new(30, 10));
        assert_eq!(models[0].width, frac(25));
        assert_eq!(models[2].width, frac(20));
    }

    #[test]
    fn margin_is_subtracted_from_the_pool() {
        let items = [
            TestItem::new(width_style(Scalar::cells(10))),
            TestItem::new(width_style(Scalar::fraction(1))),
        ];
        let dimensions: Vec<Option<Scalar>> =
            items.iter().map(|item| item.styles.width).collect();
        let refs: Vec<&dyn LayoutItem> =
            items.iter().map(|item| item as &dyn LayoutItem).collect();
        let models = resolve_box_models(
            &dimensions,
            &refs,
            Size::new(30, 10),
            Size::new(30, 10),
            Size::new(4, 0),
            Axis::Width,
            true,
        );
        assert_eq!(models[1].width, frac(16));
    }

    #[test]
    fn item_margin_shrinks_immediate_availability() {
        // A margin-bearing item with no width scalar takes the offered
        // container width minus its own margin.
        let margined = StyleSnapshot {
            height: Some(Scalar::cells(1)),
            margin: Sides::horizontal(3),
            ..Default::default()
        };
        let items = [TestItem::new(margined)];
        let dimensions = [None];
        let refs: Vec<&dyn LayoutItem> =
            items.iter().map(|item| item as &dyn LayoutItem).collect();
        let models = resolve_box_models(
            &dimensions,
            &refs,
            Size::new(30, 10),
            Size::new(30, 10),
            Size::default(),
            Axis::Width,
            true,
        );
        assert_eq!(models[0].width, frac(24));
        assert_eq!(models[0].margin, Sides::horizontal(3));
    }

    #[test]
    fn height_axis_mirrors_width_axis() {
        let fixed = StyleSnapshot {
            height: Some(Scalar::cells(4)),
            width: Some(Scalar::cells(1)),
            ..Default::default()
        };
        let flexible = StyleSnapshot {
            height: Some(Scalar::fraction(1)),
            width: Some(Scalar::cells(1)),
            ..Default::default()
        };
        let items = [TestItem::new(fixed), TestItem::new(flexible)];
        let dimensions: Vec<Option<Scalar>> =
            items.iter().map(|item| item.styles.height).collect();
        let refs: Vec<&dyn LayoutItem> =
            items.iter().map(|item| item as &dyn LayoutItem).collect();
        let models = resolve_box_models(
            &dimensions,
            &refs,
            Size::new(30, 24),
            Size::new(30, 24),
            Size::default(),
            Axis::Height,
            true,
        );
        assert_eq!(models[0].height, frac(4));
        assert_eq!(models[1].height, frac(20));
    }

    #[test]
    fn output_preserves_input_order() {
        let items = [
            TestItem::new(width_style(Scalar::fraction(1))),
            TestItem::new(width_style(Scalar::cells(7))),
            TestItem::new(width_style(Scalar::fraction(1))),
        ];
        let models = resolve_widths(&items, Size::new(27, 10));
        assert_eq!(models[0].width, frac(10));
        assert_eq!(models[1].width, frac(7));
        assert_eq!(models[2].width, frac(10));
    }

    #[test]
    fn oversubscribed_pool_clamps_to_zero() {
        // Fixed content already exceeds the container: the fraction item
        // gets a zero-space pool, not a negative one.
        let items = [
            TestItem::new(width_style(Scalar::cells(40))),
            TestItem::new(width_style(Scalar::fraction(1))),
        ];
        let models = resolve_widths(&items, Size::new(30, 10));
        assert_eq!(models[0].width, frac(40));
        // Zero remaining space yields the nominal unit of 1.
        assert_eq!(models[1].width, frac(1));
    }

    #[test]
    fn repeated_resolution_is_bit_identical() {
        let items = [
            TestItem::new(width_style(Scalar::cells(10))),
            TestItem::new(width_style(Scalar::fraction(2))),
            TestItem::new(width_style(Scalar::percent(10, Axis::Width))),
        ];
        let first = resolve_widths(&items, Size::new(60, 10));
        let second = resolve_widths(&items, Size::new(60, 10));
        assert_eq!(first, second);
    }
}
