//! Square matrices acting on zero-padded vectors.

use std::cmp::Ordering;
use std::ops::Mul;

use approx::AbsDiffEq;

use crate::{EPSILON, Float, Point, Vector, VectorRef, approx_cmp_iter, grid_cmp_iter};

/// Square matrix stored in column-major order.
///
/// Entries outside the stored size read as the infinite identity matrix, so
/// matrices of different sizes can be multiplied and compared.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    ndim: u8,
    elems: Vec<Float>,
}

impl Matrix {
    /// Returns the `ndim`-by-`ndim` zero matrix.
    pub fn zero(ndim: u8) -> Self {
        Self::from_fn(ndim, |_, _| 0.0)
    }
    /// Returns the `ndim`-by-`ndim` identity matrix.
    pub fn ident(ndim: u8) -> Self {
        Self::from_fn(ndim, |col, row| if col == row { 1.0 } else { 0.0 })
    }
    /// Constructs a matrix from a function of `(col, row)`.
    pub fn from_fn(ndim: u8, mut f: impl FnMut(u8, u8) -> Float) -> Self {
        let mut elems = Vec::with_capacity(ndim as usize * ndim as usize);
        for col in 0..ndim {
            for row in 0..ndim {
                elems.push(f(col, row));
            }
        }
        Self { ndim, elems }
    }
    /// Constructs a matrix with the given columns, zero-padding each to the
    /// number of columns.
    pub fn from_cols<V: VectorRef>(cols: &[V]) -> Self {
        Self::from_fn(cols.len() as u8, |col, row| cols[col as usize].get(row))
    }
    /// Returns the reflection through the hyperplane with unit normal
    /// `normal`.
    pub fn from_reflection(normal: impl VectorRef) -> Self {
        // I - 2nnᵀ
        Self::from_fn(normal.ndim(), |col, row| {
            let ident = if col == row { 1.0 } else { 0.0 };
            ident - 2.0 * normal.get(col) * normal.get(row)
        })
    }

    /// Returns the number of stored rows and columns.
    pub fn ndim(&self) -> u8 {
        self.ndim
    }
    /// Returns an entry, reading the identity matrix outside the stored size.
    pub fn get(&self, col: u8, row: u8) -> Float {
        if col < self.ndim && row < self.ndim {
            self.elems[col as usize * self.ndim as usize + row as usize]
        } else if col == row {
            1.0
        } else {
            0.0
        }
    }
    /// Returns the matrix padded with the identity or truncated to `ndim`.
    #[must_use]
    pub fn at_ndim(&self, ndim: u8) -> Self {
        Self::from_fn(ndim, |col, row| self.get(col, row))
    }

    /// Returns the transpose.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.ndim, |col, row| self.get(row, col))
    }

    /// Compares entries in column-major order over the larger of the two
    /// sizes, treating entries within [`EPSILON`] as equal.
    pub fn approx_cmp(&self, other: &Self) -> Ordering {
        let ndim = std::cmp::max(self.ndim, other.ndim);
        approx_cmp_iter(
            self.at_ndim(ndim).elems.iter().copied(),
            other.at_ndim(ndim).elems.iter().copied(),
        )
    }

    /// Compares entries in column-major order over the larger of the two
    /// sizes, after snapping each entry to a multiple of [`EPSILON`]. This is
    /// a total order, so it is safe to sort by.
    pub fn grid_cmp(&self, other: &Self) -> Ordering {
        let ndim = std::cmp::max(self.ndim, other.ndim);
        grid_cmp_iter(
            self.at_ndim(ndim).elems.iter().copied(),
            other.at_ndim(ndim).elems.iter().copied(),
        )
    }

    /// Returns the determinant.
    pub fn determinant(&self) -> Float {
        self.gauss_jordan(0.0).map_or(0.0, |(det, _)| det)
    }
    /// Returns the inverse, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        let (_, inverse) = self.gauss_jordan(EPSILON)?;
        Some(inverse)
    }

    /// Reduces the matrix to the identity by Gauss-Jordan elimination with
    /// partial pivoting and returns its determinant and inverse, or `None` if
    /// some pivot has magnitude at most `threshold`.
    fn gauss_jordan(&self, threshold: Float) -> Option<(Float, Self)> {
        let n = self.ndim as usize;
        // Rows of the augmented matrix `[self | I]`.
        let mut rows: Vec<Vec<Float>> = (0..self.ndim)
            .map(|row| {
                let left = (0..self.ndim).map(|col| self.get(col, row));
                let right = (0..self.ndim).map(|col| if col == row { 1.0 } else { 0.0 });
                left.chain(right).collect()
            })
            .collect();

        let mut det = 1.0;
        for i in 0..n {
            let pivot = (i..n).max_by(|&a, &b| rows[a][i].abs().total_cmp(&rows[b][i].abs()))?;
            if rows[pivot][i].abs() <= threshold {
                return None;
            }
            if pivot != i {
                rows.swap(pivot, i);
                det = -det;
            }
            let p = rows[i][i];
            det *= p;
            rows[i].iter_mut().for_each(|x| *x /= p);

            let pivot_row = rows[i].clone();
            for (r, row) in rows.iter_mut().enumerate() {
                let factor = row[i];
                if r != i && factor != 0.0 {
                    for (x, y) in row.iter_mut().zip(&pivot_row) {
                        *x -= factor * y;
                    }
                }
            }
        }

        let inverse = Self::from_fn(self.ndim, |col, row| rows[row as usize][n + col as usize]);
        Some((det, inverse))
    }

    /// Applies the matrix to a point.
    pub fn transform_point(&self, p: &Point) -> Point {
        Point(self * p.as_vector())
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        let ndim = std::cmp::max(self.ndim, rhs.ndim);
        Matrix::from_fn(ndim, |col, row| {
            (0..ndim).map(|k| self.get(k, row) * rhs.get(col, k)).sum()
        })
    }
}
impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        &self * &rhs
    }
}

impl<V: VectorRef> Mul<V> for &Matrix {
    type Output = Vector;

    fn mul(self, rhs: V) -> Vector {
        let ndim = std::cmp::max(self.ndim, rhs.ndim());
        (0..ndim)
            .map(|row| (0..ndim).map(|col| self.get(col, row) * rhs.get(col)).sum())
            .collect()
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = Float;

    fn default_epsilon() -> Float {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Float) -> bool {
        let ndim = std::cmp::max(self.ndim, other.ndim);
        std::iter::zip(self.at_ndim(ndim).elems, other.at_ndim(ndim).elems)
            .all(|(a, b)| a.abs_diff_eq(&b, epsilon))
    }
}
