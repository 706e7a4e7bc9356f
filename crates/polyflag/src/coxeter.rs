//! Coxeter diagrams realized as sets of mirrors.

use std::fmt;

use itertools::Itertools;
use polyflag_math::prelude::*;

use crate::group::{GroupResult, MatrixGroup};

/// Error that can occur while constructing a Coxeter diagram.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CoxeterError {
    #[error("coxeter-dynkin diagram has too many mirrors")]
    TooHighDimensional,
    #[error("coxeter-dynkin diagram is hyperbolic")]
    HyperbolicDiagram,
    #[error("coxeter-dynkin diagram is euclidean")]
    EuclideanDiagram,
    #[error("invalid coxeter-dynkin diagram: {0}")]
    BadDiagram(&'static str),
}

/// Coxeter diagram with its mirrors computed.
#[derive(Debug, Clone)]
pub struct CoxeterDiagram {
    /// [Coxeter matrix](https://w.wiki/7SNw), whose adjacent-to-diagonal
    /// entries correspond to the numbers in a linear Schläfli symbol.
    coxeter_matrix: Vec<Vec<usize>>,
    /// Mirror normals, one per generator.
    mirrors: Vec<Mirror>,
    /// Matrix that transforms from the mirror basis (where each component of
    /// the vector gives a distance from a mirror plane) to the base space.
    mirror_basis: Matrix,
}
impl Eq for CoxeterDiagram {}
impl PartialEq for CoxeterDiagram {
    fn eq(&self, other: &Self) -> bool {
        self.coxeter_matrix == other.coxeter_matrix
    }
}
impl fmt::Display for CoxeterDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.linear_indices() {
            Some(indices) => write!(f, "{{{}}}", indices.iter().join(", ")),
            None => write!(f, "{:?}", self.coxeter_matrix),
        }
    }
}

impl CoxeterDiagram {
    /// Constructs a Coxeter diagram from a linear Schläfli symbol.
    pub fn new_linear(indices: &[usize]) -> Result<Self, CoxeterError> {
        let mirror_count = check_ndim(indices.len() + 1)?;
        let f = linear_indices_to_matrix_index_fn(indices);
        Self::from_coxeter_matrix(
            (0..mirror_count)
                .map(|i| (0..mirror_count).map(|j| f(i, j)).collect())
                .collect(),
        )
    }

    /// Constructs and validates a Coxeter diagram from a Coxeter matrix.
    pub fn from_coxeter_matrix(coxeter_matrix: Vec<Vec<usize>>) -> Result<Self, CoxeterError> {
        let mirror_count = check_ndim(coxeter_matrix.len())? as usize;

        if coxeter_matrix.iter().any(|row| row.len() != mirror_count) {
            return Err(CoxeterError::BadDiagram("matrix is not square"));
        }
        for i in 0..mirror_count {
            for j in 0..=i {
                if coxeter_matrix[i][j] != coxeter_matrix[j][i] {
                    return Err(CoxeterError::BadDiagram("matrix is not symmetric"));
                }
                if (i == j) != (coxeter_matrix[i][j] == 1) {
                    return Err(CoxeterError::BadDiagram("ones must be exactly on the diagonal"));
                }
                if coxeter_matrix[i][j] < 1 {
                    return Err(CoxeterError::BadDiagram("entries must be positive"));
                }
            }
        }

        // The mirror vectors form a lower triangular matrix `L` (one mirror
        // per row) with `L Lᵀ = A`, where `A` is the Schläfli matrix of the
        // diagram. This is a Cholesky decomposition, computed with the
        // Cholesky–Banachiewicz algorithm.
        // https://en.wikipedia.org/wiki/Cholesky_decomposition#Computation
        let mut mirrors: Vec<Vector> = vec![];
        for i in 0..mirror_count {
            mirrors.push(Vector::zero(i as u8 + 1));
            for j in 0..=i {
                let sum: Float = (0..j as u8).map(|k| mirrors[i][k] * mirrors[j][k]).sum();
                let mirror_dot = -(std::f64::consts::PI / coxeter_matrix[i][j] as Float).cos();
                if i == j {
                    let val = mirror_dot - sum;
                    if val < EPSILON {
                        return Err(match val < -EPSILON {
                            true => CoxeterError::HyperbolicDiagram,
                            false => CoxeterError::EuclideanDiagram,
                        });
                    }
                    mirrors[i][j as u8] = val.sqrt();
                } else {
                    mirrors[i][j as u8] = (mirror_dot - sum) / mirrors[j][j as u8];
                }
            }
        }

        let mirror_basis = Matrix::from_cols(&mirrors)
            .transpose()
            .inverse()
            .ok_or(CoxeterError::EuclideanDiagram)?;

        Ok(Self {
            coxeter_matrix,
            mirrors: mirrors.into_iter().map(Mirror).collect(),
            mirror_basis,
        })
    }

    /// Returns the Coxeter matrix.
    pub fn coxeter_matrix(&self) -> &[Vec<usize>] {
        &self.coxeter_matrix
    }
    /// Returns the indices of the linear Schläfli symbol, or `None` if this
    /// diagram cannot be written as one.
    pub fn linear_indices(&self) -> Option<Vec<usize>> {
        let indices = (1..self.coxeter_matrix.len())
            .map(|i| self.coxeter_matrix[i][i - 1])
            .collect_vec();
        let is_linear = {
            let f = linear_indices_to_matrix_index_fn(&indices);
            let n = self.mirror_count();
            itertools::iproduct!(0..n, 0..n)
                .all(|(i, j)| self.coxeter_matrix[i as usize][j as usize] == f(i, j))
        };
        is_linear.then_some(indices)
    }

    /// Returns the number of mirrors.
    pub fn mirror_count(&self) -> u8 {
        self.coxeter_matrix.len() as u8
    }
    /// Returns the list of mirrors.
    pub fn mirrors(&self) -> &[Mirror] {
        &self.mirrors
    }
    /// Returns a matrix that transforms from the mirror basis (where each
    /// component of the vector gives a distance from a mirror plane) to the
    /// base space.
    pub fn mirror_basis(&self) -> &Matrix {
        &self.mirror_basis
    }

    /// Returns the reflection matrix of each mirror.
    pub fn generators(&self) -> Vec<Matrix> {
        self.mirrors.iter().map(Mirror::reflection).collect()
    }
    /// Returns the group generated by the mirror reflections.
    pub fn group(&self) -> GroupResult<MatrixGroup> {
        MatrixGroup::new(self.generators())
    }

    /// Returns the point whose distances from the mirrors are given in Dynkin
    /// notation. For example, `xoo` is on every mirror except the first.
    pub fn point_from_dynkin(&self, s: &str) -> Result<Point, DynkinNotationError> {
        let v = parse_dynkin_notation(self.mirror_count(), s)?;
        Ok(Point(&self.mirror_basis * v))
    }
}

fn linear_indices_to_matrix_index_fn(indices: &[usize]) -> impl '_ + Fn(u8, u8) -> usize {
    |i, j| {
        if i == j {
            1
        } else if i == j + 1 || j == i + 1 {
            indices[std::cmp::min(i, j) as usize]
        } else {
            2
        }
    }
}

fn check_ndim(ndim: usize) -> Result<u8, CoxeterError> {
    match u8::try_from(ndim) {
        Ok(n) if n <= MAX_NDIM => Ok(n),
        _ => Err(CoxeterError::TooHighDimensional),
    }
}

/// Mirror hyperplane through the origin, defined by its unit normal vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Mirror(Vector);
impl Mirror {
    /// Returns the normal vector of the mirror.
    pub fn normal(&self) -> &Vector {
        &self.0
    }
    /// Returns the matrix that reflects through the mirror.
    pub fn reflection(&self) -> Matrix {
        Matrix::from_reflection(&self.0)
    }
}

/// Parses a single character of a vector in limited Dynkin notation, where `o`
/// represents `0` and `x` represents `1`. Returns `None` for all other
/// characters.
///
/// Source: https://bendwavy.org/klitzing/explain/dynkin-notation.htm
pub fn dynkin_char(c: char) -> Option<Float> {
    match c {
        'o' => Some(0.0),
        'x' => Some(1.0),
        _ => None,
    }
}

/// Parses a vector in Dynkin notation. For example, `oox` represents `[0, 0,
/// 1]`.
pub fn parse_dynkin_notation(ndim: u8, s: &str) -> Result<Vector, DynkinNotationError> {
    let len = s.chars().count();
    if len != ndim as usize {
        return Err(DynkinNotationError::BadLength {
            ndim,
            len,
            s: s.to_owned(),
        });
    }
    s.chars()
        .map(|c| dynkin_char(c).ok_or(DynkinNotationError::BadChar(c)))
        .collect()
}

/// Error emitted by [`parse_dynkin_notation()`].
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DynkinNotationError {
    #[error("diagram has {ndim} mirrors but string {s:?} has length {len}")]
    BadLength { ndim: u8, len: usize, s: String },
    #[error("invalid character {0:?} in dynkin notation. supported characters: [o, x]")]
    BadChar(char),
}
