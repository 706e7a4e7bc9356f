use std::cmp::Ordering;

use polyflag_math::prelude::*;

use super::{Group, GroupError, GroupResult};

/// Element of a [`ConcreteGroup`]: an abstract element paired with the
/// transformation that realizes it geometrically.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcreteElement<E> {
    /// Element of the abstract group, used for identity and ordering.
    pub abstract_elem: E,
    /// Transformation matrix, used for moving points.
    pub transform: Matrix,
}

impl<E> ConcreteElement<E> {
    /// Applies the element's transformation to a point.
    pub fn transform_point(&self, p: &Point) -> Point {
        self.transform.transform_point(p)
    }
}

/// Group whose elements pair an abstract group element with a
/// transformation matrix.
///
/// Identity and ordering come entirely from the abstract group, so the
/// representation must be faithful: equal abstract elements must have the
/// same transformation.
#[derive(Debug, Clone)]
pub struct ConcreteGroup<G: Group> {
    abstract_group: G,
    generators: Vec<ConcreteElement<G::Element>>,
    ndim: u8,
}

impl<G: Group> ConcreteGroup<G> {
    /// Constructs a concrete group from an abstract group and one
    /// transformation per abstract generator.
    pub fn new(abstract_group: G, transforms: Vec<Matrix>) -> GroupResult<Self> {
        let expected = abstract_group.generator_count();
        if transforms.len() != expected {
            return Err(GroupError::GeneratorCountMismatch {
                expected,
                actual: transforms.len(),
            });
        }
        let ndim = transforms.iter().map(|m| m.ndim()).max().unwrap_or(0);
        let generators = std::iter::zip(abstract_group.generators(), transforms)
            .map(|(abstract_elem, transform)| ConcreteElement {
                abstract_elem: abstract_elem.clone(),
                transform: transform.at_ndim(ndim),
            })
            .collect();
        Ok(Self {
            abstract_group,
            generators,
            ndim,
        })
    }

    /// Returns the underlying abstract group.
    pub fn abstract_group(&self) -> &G {
        &self.abstract_group
    }
    /// Returns the number of dimensions of the transformations.
    pub fn ndim(&self) -> u8 {
        self.ndim
    }
}

impl<G: Group> Group for ConcreteGroup<G> {
    type Element = ConcreteElement<G::Element>;

    fn generators(&self) -> &[Self::Element] {
        &self.generators
    }

    fn identity(&self) -> Self::Element {
        ConcreteElement {
            abstract_elem: self.abstract_group.identity(),
            transform: Matrix::ident(self.ndim),
        }
    }

    fn compose(&self, a: &Self::Element, b: &Self::Element) -> GroupResult<Self::Element> {
        Ok(ConcreteElement {
            abstract_elem: self
                .abstract_group
                .compose(&a.abstract_elem, &b.abstract_elem)?,
            transform: &a.transform * &b.transform,
        })
    }

    fn invert(&self, a: &Self::Element) -> GroupResult<Self::Element> {
        Ok(ConcreteElement {
            abstract_elem: self.abstract_group.invert(&a.abstract_elem)?,
            transform: a.transform.inverse().ok_or(GroupError::SingularMatrix)?,
        })
    }

    fn compare(&self, a: &Self::Element, b: &Self::Element) -> Ordering {
        self.abstract_group
            .compare(&a.abstract_elem, &b.abstract_elem)
    }

    fn equal(&self, a: &Self::Element, b: &Self::Element) -> bool {
        self.abstract_group.equal(&a.abstract_elem, &b.abstract_elem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::RewriteGroup;

    fn triangle_group() -> ConcreteGroup<RewriteGroup> {
        let normals = [
            vector![1.0, 0.0],
            vector![-0.5, (3.0 as Float).sqrt() / 2.0],
        ];
        ConcreteGroup::new(
            RewriteGroup::dihedral(3).unwrap(),
            normals.iter().map(Matrix::from_reflection).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_generator_count_mismatch() {
        let err = ConcreteGroup::new(RewriteGroup::dihedral(3).unwrap(), vec![Matrix::ident(2)])
            .unwrap_err();
        assert_eq!(
            err,
            GroupError::GeneratorCountMismatch {
                expected: 2,
                actual: 1,
            },
        );
    }

    #[test]
    fn test_faithful_representation() {
        let g = triangle_group();
        let e = g.enumerate_elements(100).unwrap();
        assert_eq!(e.elements.len(), 6);
        // Distinct abstract elements have distinct transforms.
        for (i, a) in e.elements.iter().enumerate() {
            for b in &e.elements[..i] {
                assert_ne!(a.transform.approx_cmp(&b.transform), Ordering::Equal);
            }
        }
    }

    #[test]
    fn test_compare_ignores_transform() {
        let g = triangle_group();
        let a = g.generators()[0].clone();
        let mut noisy = a.clone();
        noisy.transform = Matrix::from_fn(2, |col, row| (col + row) as Float);
        assert!(g.equal(&a, &noisy));
    }

    #[test]
    fn test_invert_both_sides() {
        let g = triangle_group();
        let ab = g.compose(&g.generators()[0], &g.generators()[1]).unwrap();
        let inv = g.invert(&ab).unwrap();
        let product = g.compose(&ab, &inv).unwrap();
        assert!(g.equal(&product, &g.identity()));
        polyflag_math::assert_approx_eq!(product.transform, Matrix::ident(2));

        let mut singular = ab;
        singular.transform = Matrix::zero(2);
        assert_eq!(g.invert(&singular), Err(GroupError::SingularMatrix));
    }
}
