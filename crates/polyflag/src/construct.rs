//! Construction of a combinatorial polytope from a symmetry-based
//! description.

use itertools::Itertools;
use polyflag_math::prelude::*;
use polyflag_util::IndexOverflow;
use polyflag_util::ti::TypedIndex;

use crate::flag::{Flag, FlagClasses, FlagError, FlagGraph, PerFlagClass};
use crate::group::{ConcreteGroup, Enumeration, GeneratorId, Group, GroupError, GroupResult};
use crate::polytope::PolytopeC;
use crate::refiner::Refiner;

/// Default maximum number of domains to enumerate.
pub const DEFAULT_DOMAIN_CAP: usize = 500;

/// Error that can occur while constructing a polytope.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("group error: {0}")]
    Group(#[from] GroupError),
    #[error("bad flag classes: {0}")]
    Flag(#[from] FlagError),
    #[error("overflow ({0})")]
    Overflow(#[from] IndexOverflow),
    #[error("polytope must have at least one dimension")]
    NoDimensions,
    #[error("expected one base vertex per flag class ({expected}); got {actual}")]
    BadBaseVertexCount { expected: usize, actual: usize },
    #[error("change operation {change} on flag {flag} failed: {source}")]
    ChangeFailed {
        change: GeneratorId,
        flag: Flag,
        source: GroupError,
    },
    #[error("refiner did not reach a fixed point from flag {flag} within {steps} steps")]
    NonConvergentRefiner { flag: Flag, steps: usize },
    #[error("change operation {change} maps flag {flag} to {image}, which does not map back")]
    NonInvolutiveChange {
        change: GeneratorId,
        flag: Flag,
        image: Flag,
    },
}

/// Result type returned by polytope construction.
pub type ConstructionResult<T> = Result<T, ConstructionError>;

/// Number of domains found by a bounded enumeration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DomainCount {
    /// Number of domains enumerated.
    pub count: usize,
    /// Whether the enumeration stopped at the cap before the group closed.
    pub truncated: bool,
}

/// Symmetry-based description of a polytope: a symmetry group, the flag
/// classes of one fundamental domain, and a base vertex per flag class.
#[derive(Debug, Clone)]
pub struct PolytopeS<G: Group> {
    symmetries: ConcreteGroup<G>,
    flag_classes: FlagClasses,
    base_vertices: PerFlagClass<Point>,
    dimensions: usize,
}

impl<G: Group> PolytopeS<G> {
    /// Constructs and validates a polytope description.
    pub fn new(
        symmetries: ConcreteGroup<G>,
        flag_classes: FlagClasses,
        base_vertices: Vec<Point>,
        dimensions: usize,
    ) -> ConstructionResult<Self> {
        if dimensions == 0 {
            return Err(ConstructionError::NoDimensions);
        }
        if flag_classes.change_count() != dimensions {
            return Err(FlagError::WrongRowCount {
                expected: dimensions,
                actual: flag_classes.change_count(),
            }
            .into());
        }
        GeneratorId::try_from_index(dimensions - 1)?;
        flag_classes.check_generators(symmetries.generator_count())?;
        if base_vertices.len() != flag_classes.class_count() {
            return Err(ConstructionError::BadBaseVertexCount {
                expected: flag_classes.class_count(),
                actual: base_vertices.len(),
            });
        }

        Ok(Self {
            symmetries,
            flag_classes,
            base_vertices: base_vertices.try_into()?,
            dimensions,
        })
    }

    /// Returns the symmetry group.
    pub fn symmetries(&self) -> &ConcreteGroup<G> {
        &self.symmetries
    }
    /// Returns the flag class table.
    pub fn flag_classes(&self) -> &FlagClasses {
        &self.flag_classes
    }
    /// Returns the base vertex of each flag class.
    pub fn base_vertices(&self) -> &PerFlagClass<Point> {
        &self.base_vertices
    }
    /// Returns the number of dimensions (rank) of the polytope.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Enumerates domains up to `cap` and reports how many were found.
    pub fn count_domains(&self, cap: usize) -> GroupResult<DomainCount> {
        let Enumeration {
            elements,
            truncated,
        } = self.symmetries.enumerate_elements(cap)?;
        Ok(DomainCount {
            count: elements.len(),
            truncated,
        })
    }

    /// Constructs the polytope using [`DEFAULT_DOMAIN_CAP`].
    pub fn to_polytope_c_default(&self) -> ConstructionResult<PolytopeC> {
        self.to_polytope_c(DEFAULT_DOMAIN_CAP)
    }

    /// Constructs the polytope, enumerating at most `cap` domains.
    ///
    /// If the symmetry group has more than `cap` elements, the result is
    /// incomplete and [`PolytopeC::truncated`] is set.
    pub fn to_polytope_c(&self, cap: usize) -> ConstructionResult<PolytopeC> {
        let d = self.dimensions;

        let Enumeration {
            elements: domains,
            truncated,
        } = self.symmetries.enumerate_elements(cap)?;
        log::debug!("enumerated {} domains with cap {cap}", domains.len());
        if truncated {
            log::warn!(
                "domain enumeration stopped at cap {cap} before the group closed; \
                 polytope may be incomplete",
            );
        }

        let graph = FlagGraph::new(&self.symmetries, &domains, &self.flag_classes)?;
        if let Some((change, flag, image)) = graph.find_non_involution() {
            return Err(ConstructionError::NonInvolutiveChange {
                change,
                flag,
                image,
            });
        }
        log::debug!("flag graph has {} flags", graph.flag_count());

        // `ascending[i]` identifies flags connected by changes `0..i`.
        // `descending[i]` identifies flags connected by changes `d-i..d`.
        let identity = Refiner::identity(&graph);
        let ascending = identity.chain(GeneratorId::iter(d))?;
        let descending = identity.chain(GeneratorId::iter(d).rev())?;
        log::debug!(
            "ascending chain class counts: {:?}",
            ascending.iter().map(Refiner::class_count).collect_vec(),
        );

        // Classes of `elements[i]` are rank-`i` elements; classes of
        // `incidences[i]` are incident pairs of rank-`i` and rank-`i+1`
        // elements.
        let elements: Vec<Refiner<'_>> = (0..=d)
            .map(|i| match d.checked_sub(i + 1) {
                Some(j) => ascending[i].merge(&descending[j]),
                None => Ok(ascending[d].clone()),
            })
            .try_collect()?;
        let incidences: Vec<Refiner<'_>> = (0..d)
            .map(|i| match d.checked_sub(i + 2) {
                Some(j) => ascending[i].merge(&descending[j]),
                None => Ok(ascending[d - 1].clone()),
            })
            .try_collect()?;
        let ids = elements.iter().map(Refiner::class_ids).collect_vec();
        let element_counts = elements.iter().map(Refiner::class_count).collect_vec();
        log::debug!("element counts by rank: {element_counts:?}");

        let vertices = elements[0]
            .representatives()
            .map(|flag| {
                let domain = &domains[flag.domain.to_index()];
                domain.transform_point(&self.base_vertices[flag.class])
            })
            .collect();

        let mut ranks = vec![];
        for rank in 1..=d {
            let mut facets = vec![vec![]; element_counts[rank]];
            for flag in incidences[rank - 1].representatives() {
                let i = graph.index_of(flag);
                facets[ids[rank][i]].push(ids[rank - 1][i]);
            }
            ranks.push(facets);
        }

        Ok(PolytopeC {
            vertices,
            ranks,
            truncated,
            domain_count: domains.len(),
        })
    }
}
