//! Approximate comparison functions that automatically use [`EPSILON`].

use std::cmp::Ordering;

pub use approx::AbsDiffEq;

use crate::{EPSILON, Float};

/// Compares two numbers, but considers them equal if they are separated by less
/// than `EPSILON`.
///
/// Handles infinity specially.
pub fn approx_eq<T: AbsDiffEq<Epsilon = Float>>(a: &T, b: &T) -> bool {
    // use native float equality to handle infinities
    a == b || approx::abs_diff_eq!(a, b, epsilon = EPSILON)
}

/// Compares two numbers, but considers them equal if they are separated by less
/// than `EPSILON`.
///
/// NaN compares greater than every other value, so this is a total order on
/// any set of values whose non-equal members are at least `EPSILON` apart.
pub fn approx_cmp(a: Float, b: Float) -> Ordering {
    if approx_eq(&a, &b) {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Compares two sequences of numbers lexicographically using
/// [`approx_cmp()`].
pub fn approx_cmp_iter(
    a: impl IntoIterator<Item = Float>,
    b: impl IntoIterator<Item = Float>,
) -> Ordering {
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match approx_cmp(x, y) {
                Ordering::Equal => (),
                other => return other,
            },
        }
    }
}

/// Rounds `x` to the nearest multiple of [`EPSILON`], saturating at the
/// bounds of `i64`. NaN snaps to zero.
pub fn snap_to_grid(x: Float) -> i64 {
    (x / EPSILON).round() as i64
}

/// Compares two sequences of numbers lexicographically after snapping each
/// one with [`snap_to_grid()`].
///
/// Unlike [`approx_cmp_iter()`], this is a total order: numbers within
/// `EPSILON` of each other may still compare unequal if they snap to
/// different grid points.
pub fn grid_cmp_iter(
    a: impl IntoIterator<Item = Float>,
    b: impl IntoIterator<Item = Float>,
) -> Ordering {
    Iterator::cmp(a.into_iter().map(snap_to_grid), b.into_iter().map(snap_to_grid))
}

/// Returns whether `x` is within `EPSILON` of zero.
pub fn is_approx_zero(x: Float) -> bool {
    approx_eq(&x, &0.0)
}
