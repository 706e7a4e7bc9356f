use std::cmp::Ordering;

use polyflag_math::prelude::*;
use polyflag_util::ti::TypedIndex;

use super::{GeneratorId, Group, GroupError, GroupResult};

/// Group whose elements are transformation matrices, compared entrywise after
/// snapping each entry to a multiple of [`EPSILON`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixGroup {
    ndim: u8,
    generators: Vec<Matrix>,
}

impl MatrixGroup {
    /// Constructs a matrix group from its generators. All generators are
    /// padded to the same number of dimensions.
    pub fn new(generators: Vec<Matrix>) -> GroupResult<Self> {
        if let Some(last) = generators.len().checked_sub(1) {
            GeneratorId::try_from_index(last)?;
        }
        let ndim = generators.iter().map(|m| m.ndim()).max().unwrap_or(0);
        let generators = generators.iter().map(|m| m.at_ndim(ndim)).collect();
        Ok(Self { ndim, generators })
    }

    /// Returns the number of dimensions of the matrices in the group.
    pub fn ndim(&self) -> u8 {
        self.ndim
    }
}

impl Group for MatrixGroup {
    type Element = Matrix;

    fn generators(&self) -> &[Matrix] {
        &self.generators
    }

    fn identity(&self) -> Matrix {
        Matrix::ident(self.ndim)
    }

    fn compose(&self, a: &Matrix, b: &Matrix) -> GroupResult<Matrix> {
        Ok(a * b)
    }

    fn invert(&self, a: &Matrix) -> GroupResult<Matrix> {
        a.inverse().ok_or(GroupError::SingularMatrix)
    }

    fn compare(&self, a: &Matrix, b: &Matrix) -> Ordering {
        a.grid_cmp(b)
    }
}
