//! Combinatorial polytope with realized vertices.

use polyflag_math::Point;

/// Problem found by [`PolytopeC::check_incidences()`].
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IncidenceError {
    #[error("rank {rank} element {element} has no facets")]
    NoFacets { rank: usize, element: usize },
    #[error("rank {rank} element {element} has nonexistent facet {facet}")]
    MissingFacet {
        rank: usize,
        element: usize,
        facet: usize,
    },
    #[error("rank {rank} element {element} is not a facet of any element of the next rank")]
    Orphan { rank: usize, element: usize },
}

/// Combinatorial polytope: realized vertices, plus the facets of each
/// element of every higher rank.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolytopeC {
    /// Vertex positions (rank 0).
    pub vertices: Vec<Point>,
    /// `ranks[i - 1][j]` lists the indices of the rank-`(i - 1)` facets of the
    /// `j`th rank-`i` element.
    pub ranks: Vec<Vec<Vec<usize>>>,
    /// Whether domain enumeration stopped at its cap, in which case the
    /// polytope may be missing or merging elements.
    pub truncated: bool,
    /// Number of domains that were enumerated.
    pub domain_count: usize,
}

impl PolytopeC {
    /// Returns the rank of the polytope.
    pub fn rank(&self) -> usize {
        self.ranks.len()
    }

    /// Returns the number of elements of a given rank, or `None` if the rank
    /// is greater than the polytope's rank.
    pub fn element_count(&self, rank: usize) -> Option<usize> {
        match rank {
            0 => Some(self.vertices.len()),
            _ => self.ranks.get(rank - 1).map(Vec::len),
        }
    }
    /// Returns the number of elements of each rank, starting with vertices.
    pub fn element_counts(&self) -> Vec<usize> {
        std::iter::once(self.vertices.len())
            .chain(self.ranks.iter().map(Vec::len))
            .collect()
    }

    /// Returns the facets of an element of rank at least 1.
    pub fn facets(&self, rank: usize, element: usize) -> Option<&[usize]> {
        let facets: &[usize] = self.ranks.get(rank.checked_sub(1)?)?.get(element)?;
        Some(facets)
    }

    /// Returns the vertices and the facet lists of each higher rank.
    pub fn into_ranked_lists(self) -> (Vec<Point>, Vec<Vec<Vec<usize>>>) {
        (self.vertices, self.ranks)
    }

    /// Checks that every facet index refers to an existing element, that
    /// every element above rank 0 has at least one facet, and that every
    /// element below the top rank is a facet of something. Returns every
    /// problem found.
    pub fn check_incidences(&self) -> Result<(), Vec<IncidenceError>> {
        let mut errors = vec![];
        let counts = self.element_counts();

        for (i, elements) in self.ranks.iter().enumerate() {
            let rank = i + 1;
            let facet_count = counts[i];
            let mut referenced = vec![false; facet_count];

            for (element, facets) in elements.iter().enumerate() {
                if facets.is_empty() {
                    errors.push(IncidenceError::NoFacets { rank, element });
                }
                for &facet in facets {
                    match referenced.get_mut(facet) {
                        Some(r) => *r = true,
                        None => errors.push(IncidenceError::MissingFacet {
                            rank,
                            element,
                            facet,
                        }),
                    }
                }
            }

            errors.extend(
                referenced
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| !**r)
                    .map(|(element, _)| IncidenceError::Orphan {
                        rank: i,
                        element,
                    }),
            );
        }

        match errors.is_empty() {
            true => Ok(()),
            false => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use polyflag_math::point;

    use super::*;

    fn square() -> PolytopeC {
        PolytopeC {
            vertices: vec![
                point![1.0, 1.0],
                point![-1.0, 1.0],
                point![1.0, -1.0],
                point![-1.0, -1.0],
            ],
            ranks: vec![
                vec![vec![0, 1], vec![0, 2], vec![1, 3], vec![2, 3]],
                vec![vec![0, 1, 2, 3]],
            ],
            truncated: false,
            domain_count: 8,
        }
    }

    #[test]
    fn test_accessors() {
        let p = square();
        assert_eq!(p.rank(), 2);
        assert_eq!(p.element_counts(), vec![4, 4, 1]);
        assert_eq!(p.element_count(1), Some(4));
        assert_eq!(p.element_count(3), None);
        assert_eq!(p.facets(1, 2), Some(&[1, 3][..]));
        assert_eq!(p.facets(0, 0), None);
        assert_eq!(p.facets(2, 1), None);

        let (vertices, ranks) = p.into_ranked_lists();
        assert_eq!(vertices.len(), 4);
        assert_eq!(ranks.len(), 2);
    }

    #[test]
    fn test_check_incidences() {
        assert_eq!(square().check_incidences(), Ok(()));

        let mut p = square();
        p.ranks[0][2] = vec![1, 2];
        p.ranks[0][3] = vec![2, 7];
        p.ranks[1][0] = vec![0, 1, 2];
        p.ranks[1].push(vec![]);
        assert_eq!(
            p.check_incidences(),
            Err(vec![
                IncidenceError::MissingFacet {
                    rank: 1,
                    element: 3,
                    facet: 7,
                },
                IncidenceError::Orphan {
                    rank: 0,
                    element: 3,
                },
                IncidenceError::NoFacets {
                    rank: 2,
                    element: 1,
                },
                IncidenceError::Orphan {
                    rank: 1,
                    element: 3,
                },
            ]),
        );
    }
}
