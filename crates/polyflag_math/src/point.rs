//! Points in Euclidean space.

use approx::AbsDiffEq;

use crate::{EPSILON, Float, Vector, VectorRef};

/// Constructs a point from its coordinates, using the same syntax as
/// [`vector!`](crate::vector!).
#[macro_export]
macro_rules! point {
    [$($tok:tt)*] => {
        $crate::Point($crate::vector![$($tok)*])
    };
}

/// Point whose missing coordinates are zero.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Point(pub Vector);

impl Point {
    /// Returns the number of stored coordinates.
    pub fn ndim(&self) -> u8 {
        self.0.ndim()
    }
    /// Returns the position vector of the point.
    pub fn as_vector(&self) -> &Vector {
        &self.0
    }

    /// Returns the point moved by `offset`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, offset: impl VectorRef) -> Self {
        Self(&self.0 + offset)
    }
    /// Returns the point scaled away from the origin.
    #[must_use]
    pub fn scale(&self, factor: Float) -> Self {
        Self(self.0.scale(factor))
    }
    /// Returns the Euclidean distance to `other`.
    pub fn distance(&self, other: &Self) -> Float {
        (&self.0 - &other.0).mag()
    }
}

impl AbsDiffEq for Point {
    type Epsilon = Float;

    fn default_epsilon() -> Float {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Float) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}
