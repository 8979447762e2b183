#![forbid(unsafe_code)]

//! Shared fraction-unit resolution with per-item min/max clamps.

use cellflow_core::geometry::Size;
use num_traits::{One, Zero};

use crate::Axis;
use crate::scalar::{Frac, Scalar};
use crate::style::StyleSnapshot;

/// Compute the value of one fraction unit for a set of sibling styles.
///
/// Every fraction-sized sibling resolved in the same pass shares the unit
/// returned here. An item whose tentative share crosses its resolved
/// min/max bound is pinned at that bound, which removes its pinned length
/// from the space pool and its weight from the weight pool; that shifts the
/// unit for everyone else, so the candidate is re-derived until a full
/// round pins nothing. All violators in a round are judged against the same
/// candidate, so ordering never matters. Converges in at most N rounds for
/// N items.
///
/// Zero remaining space or an empty style set yields a nominal unit of 1,
/// keeping upstream arithmetic divisor-free. If every item pins to a bound
/// the pre-loop remaining space is returned; no unresolved item is left to
/// consume it.
///
/// Overlay-screen snapshots and snapshots without a scalar on `axis` do not
/// participate.
pub fn resolve_fraction_unit(
    styles: &[StyleSnapshot],
    size: Size,
    viewport: Size,
    remaining_space: Frac,
    axis: Axis,
) -> Frac {
    if remaining_space.is_zero() || styles.is_empty() {
        return Frac::one();
    }

    let initial_space = remaining_space;
    let mut remaining_space = remaining_space;

    // Bounds resolve once, with a nominal unit: min/max scalars are never
    // themselves fraction-sized in a meaningful way.
    let resolve_bound =
        |bound: Option<Scalar>| bound.map(|scalar| scalar.resolve(size, viewport, Frac::one()));

    let entries: Vec<(Scalar, Option<Frac>, Option<Frac>)> = styles
        .iter()
        .filter(|styles| !styles.overlay.is_screen())
        .filter_map(|styles| {
            styles.scalar(axis).map(|scalar| {
                (
                    scalar,
                    resolve_bound(styles.min_scalar(axis)),
                    resolve_bound(styles.max_scalar(axis)),
                )
            })
        })
        .collect();

    // Indexed slots, one per entry: None until the item is pinned.
    let mut resolved: Vec<Option<Frac>> = vec![None; entries.len()];
    let mut remaining_weight = entries
        .iter()
        .fold(Frac::zero(), |acc, (scalar, _, _)| acc + scalar.magnitude());

    #[cfg(feature = "tracing")]
    let mut rounds = 0u32;

    while remaining_weight > Frac::zero() {
        let mut pinned_any = false;
        let candidate = remaining_space / remaining_weight;

        #[cfg(feature = "tracing")]
        {
            rounds += 1;
        }

        for (index, (scalar, min_value, max_value)) in entries.iter().enumerate() {
            if resolved[index].is_some() {
                continue;
            }
            let value = scalar.resolve(size, viewport, candidate);
            if let Some(min_value) = *min_value
                && value < min_value
            {
                remaining_space -= min_value;
                remaining_weight -= scalar.magnitude();
                resolved[index] = Some(min_value);
                pinned_any = true;
            } else if let Some(max_value) = *max_value
                && value > max_value
            {
                remaining_space -= max_value;
                remaining_weight -= scalar.magnitude();
                resolved[index] = Some(max_value);
                pinned_any = true;
            }
        }

        if !pinned_any {
            break;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        rounds,
        pinned = resolved.iter().filter(|slot| slot.is_some()).count(),
        "fraction unit fixed point reached"
    );

    if remaining_weight > Frac::zero() {
        remaining_space / remaining_weight
    } else {
        initial_space
    }
}
