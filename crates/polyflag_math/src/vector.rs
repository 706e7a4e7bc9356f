//! Zero-padded N-dimensional vectors.

use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use approx::AbsDiffEq;
use smallvec::SmallVec;

use crate::{EPSILON, Float};

/// Constructs a [`Vector`], using the same syntax as `vec![]`.
#[macro_export]
macro_rules! vector {
    [$($tok:tt)*] => {
        $crate::Vector($crate::smallvec::smallvec![$($tok)*])
    };
}

/// N-dimensional vector. Components past the end read as zero, so vectors of
/// different lengths can be combined freely.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Vector(pub SmallVec<[Float; 4]>);

/// Anything that can be read as a zero-padded vector.
pub trait VectorRef: fmt::Debug {
    /// Returns the number of stored components.
    fn ndim(&self) -> u8;
    /// Returns a component, or zero if `axis` is past the end.
    fn get(&self, axis: u8) -> Float;

    /// Returns an iterator over the stored components.
    fn components(&self) -> impl Iterator<Item = Float> {
        (0..self.ndim()).map(|axis| self.get(axis))
    }
    /// Copies the components into a [`Vector`].
    fn to_vector(&self) -> Vector {
        self.components().collect()
    }

    /// Returns the dot product with another vector.
    fn dot(&self, other: impl VectorRef) -> Float {
        (0..std::cmp::min(self.ndim(), other.ndim()))
            .map(|axis| self.get(axis) * other.get(axis))
            .sum()
    }
    /// Returns the squared magnitude.
    fn mag2(&self) -> Float {
        self.components().map(|x| x * x).sum()
    }
    /// Returns the magnitude.
    fn mag(&self) -> Float {
        self.mag2().sqrt()
    }

    /// Returns the vector multiplied by a scalar.
    #[must_use]
    fn scale(&self, factor: Float) -> Vector {
        self.components().map(|x| x * factor).collect()
    }
    /// Returns the unit vector in the same direction, or `None` for the zero
    /// vector.
    #[must_use]
    fn normalize(&self) -> Option<Vector> {
        let mag = self.mag();
        (mag > EPSILON).then(|| self.scale(1.0 / mag))
    }
}

impl VectorRef for Vector {
    fn ndim(&self) -> u8 {
        self.0.len() as u8
    }

    fn get(&self, axis: u8) -> Float {
        self.0.get(axis as usize).copied().unwrap_or(0.0)
    }
}

impl<V: VectorRef> VectorRef for &V {
    fn ndim(&self) -> u8 {
        V::ndim(self)
    }

    fn get(&self, axis: u8) -> Float {
        V::get(self, axis)
    }
}

impl Vector {
    /// Returns the zero vector with `ndim` stored components.
    pub fn zero(ndim: u8) -> Self {
        Self(smallvec::smallvec![0.0; ndim as usize])
    }

    /// Combines two vectors componentwise, padding the shorter one with zeros.
    fn zip_with(a: impl VectorRef, b: impl VectorRef, f: impl Fn(Float, Float) -> Float) -> Self {
        (0..std::cmp::max(a.ndim(), b.ndim()))
            .map(|axis| f(a.get(axis), b.get(axis)))
            .collect()
    }
}

impl FromIterator<Float> for Vector {
    fn from_iter<T: IntoIterator<Item = Float>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<u8> for Vector {
    type Output = Float;

    #[track_caller]
    fn index(&self, axis: u8) -> &Float {
        &self.0[axis as usize]
    }
}
impl IndexMut<u8> for Vector {
    #[track_caller]
    fn index_mut(&mut self, axis: u8) -> &mut Float {
        &mut self.0[axis as usize]
    }
}

impl<V: VectorRef> Add<V> for &Vector {
    type Output = Vector;

    fn add(self, rhs: V) -> Vector {
        Vector::zip_with(self, rhs, |a, b| a + b)
    }
}
impl<V: VectorRef> Add<V> for Vector {
    type Output = Vector;

    fn add(self, rhs: V) -> Vector {
        &self + rhs
    }
}
impl<V: VectorRef> Sub<V> for &Vector {
    type Output = Vector;

    fn sub(self, rhs: V) -> Vector {
        Vector::zip_with(self, rhs, |a, b| a - b)
    }
}
impl<V: VectorRef> Sub<V> for Vector {
    type Output = Vector;

    fn sub(self, rhs: V) -> Vector {
        &self - rhs
    }
}
impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.scale(-1.0)
    }
}
impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        -&self
    }
}
impl Mul<Float> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: Float) -> Vector {
        self.scale(rhs)
    }
}

impl AbsDiffEq for Vector {
    type Epsilon = Float;

    fn default_epsilon() -> Float {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Float) -> bool {
        (self - other).components().all(|x| x.abs() <= epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_arithmetic() {
        let a = vector![1.0, 2.0, -10.0];
        let b = vector![-5.0];
        assert_eq!(&a + &b, vector![-4.0, 2.0, -10.0]);
        assert_eq!(b.clone() - &a, vector![-6.0, -2.0, 10.0]);
        assert_eq!(-a.clone(), vector![-1.0, -2.0, 10.0]);
        assert_eq!(&b * 2.0, vector![-10.0]);
        assert_eq!(b.get(7), 0.0);
    }

    #[test]
    fn test_dot_and_mag() {
        let a = vector![1.0, 2.0, -10.0];
        let b = vector![-5.0, 16.0];
        assert_eq!(a.dot(&b), 27.0);
        assert_eq!(vector![3.0, 4.0].mag(), 5.0);
    }

    #[test]
    fn test_normalize() {
        crate::assert_approx_eq!(vector![3.0, 4.0].normalize().unwrap(), vector![0.6, 0.8]);
        assert_eq!(Vector::zero(3).normalize(), None);
    }

    #[test]
    fn test_approx_eq_pads() {
        crate::assert_approx_eq!(vector![1.0, 0.0, EPSILON / 10.0], vector![1.0]);
    }
}
