//! Multidimensional vector, point, and matrix primitives.

pub use {approx, smallvec};

/// Floating-point type used for geometry.
pub type Float = f64;

/// Small floating-point value used for comparisons.
pub const EPSILON: Float = 0.000001;

/// Maximum number of dimensions.
pub const MAX_NDIM: u8 = 8;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
}

#[macro_use]
mod vector;

pub mod approx_cmp;
pub mod matrix;
pub mod point;

/// Structs, traits, and constants.
pub mod prelude {
    pub use crate::approx_cmp::*;
    pub use crate::matrix::*;
    pub use crate::point::*;
    pub use crate::vector::*;
    pub use crate::{EPSILON, Float, MAX_NDIM, point, vector};
}
pub use prelude::*;
