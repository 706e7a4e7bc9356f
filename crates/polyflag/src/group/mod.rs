//! Groups with finitely many generators, and bounded enumeration of their
//! elements.

use std::cmp::Ordering;
use std::fmt;

use itertools::Itertools;
use polyflag_util::IndexOverflow;
use polyflag_util::ti::TiVec;
use smallvec::SmallVec;

mod concrete;
mod matrix_group;
mod rewrite;

pub use concrete::{ConcreteElement, ConcreteGroup};
pub use matrix_group::MatrixGroup;
pub use rewrite::{REWRITE_STEP_LIMIT, RewriteGroup, RewriteRule, Word};

polyflag_util::typed_index_struct! {
    /// ID of a group generator.
    pub struct GeneratorId(pub u8);
}

/// List containing a value per group generator.
pub type PerGenerator<T> = TiVec<GeneratorId, T>;

/// Sequence of generators, applied left to right.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenSeq(pub SmallVec<[GeneratorId; 8]>);
impl GenSeq {
    /// The empty generator sequence, which identifies the identity.
    pub const INIT: Self = Self(SmallVec::new_const());

    /// Constructs a new generator sequence.
    pub fn new(indices: impl IntoIterator<Item = GeneratorId>) -> Self {
        Self::from_iter(indices)
    }

    /// Returns the number of generators in the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Returns whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Returns an iterator over the generators in the sequence.
    pub fn iter(&self) -> impl '_ + DoubleEndedIterator<Item = GeneratorId> {
        self.0.iter().copied()
    }
}
impl FromIterator<GeneratorId> for GenSeq {
    fn from_iter<T: IntoIterator<Item = GeneratorId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl fmt::Display for GenSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().map(|g| g.0).join(", "))
    }
}

/// Error that can occur during a group operation or group construction.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("overflow ({0})")]
    Overflow(#[from] IndexOverflow),
    #[error("invalid group generator {0}")]
    InvalidGenerator(GeneratorId),
    #[error("unknown generator name {0:?}")]
    UnknownGeneratorName(char),
    #[error("duplicate generator name {0:?}")]
    DuplicateGeneratorName(char),
    #[error("rewrite rule {0} has an empty pattern")]
    EmptyRewritePattern(usize),
    #[error("rewriting {word} did not converge within {steps} steps")]
    NonConvergentRewrite { word: String, steps: usize },
    #[error("matrix is singular and has no inverse")]
    SingularMatrix,
    #[error("expected one transform per generator ({expected}); got {actual}")]
    GeneratorCountMismatch { expected: usize, actual: usize },
}

/// Result type returned by group operations.
pub type GroupResult<T> = Result<T, GroupError>;

/// Elements accepted by [`Group::enumerate_elements()`].
#[derive(Debug, Clone, PartialEq)]
pub struct Enumeration<E> {
    /// Distinct elements in breadth-first order, starting with the identity.
    pub elements: Vec<E>,
    /// Whether a new element was discovered after the cap was reached, in
    /// which case `elements` is a strict subset of the group.
    pub truncated: bool,
}

/// Group with finitely many generators.
///
/// [`Group::compare()`] must be a total order consistent with
/// [`Group::equal()`].
pub trait Group {
    /// Element of the group.
    type Element: fmt::Debug + Clone;

    /// Returns the generators of the group.
    fn generators(&self) -> &[Self::Element];
    /// Returns the number of generators of the group.
    fn generator_count(&self) -> usize {
        self.generators().len()
    }
    /// Returns a generator by its ID.
    fn generator(&self, id: GeneratorId) -> GroupResult<&Self::Element> {
        self.generators()
            .get(id.0 as usize)
            .ok_or(GroupError::InvalidGenerator(id))
    }

    /// Returns the identity element.
    fn identity(&self) -> Self::Element;
    /// Returns the product `ab` of two elements of the group.
    fn compose(&self, a: &Self::Element, b: &Self::Element) -> GroupResult<Self::Element>;
    /// Returns the inverse of an element.
    fn invert(&self, a: &Self::Element) -> GroupResult<Self::Element>;

    /// Compares two elements of the group.
    fn compare(&self, a: &Self::Element, b: &Self::Element) -> Ordering;
    /// Returns whether two elements of the group are equal.
    fn equal(&self, a: &Self::Element, b: &Self::Element) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    /// Enumerates up to `max` elements of the group by breadth-first search
    /// from the identity, right-multiplying by each generator in order.
    ///
    /// Each new element is compared against every element accepted so far,
    /// so this is only suitable for groups of moderate order.
    fn enumerate_elements(&self, max: usize) -> GroupResult<Enumeration<Self::Element>> {
        if max == 0 {
            return Ok(Enumeration {
                elements: vec![],
                truncated: true,
            });
        }

        let mut elements = vec![self.identity()];
        let mut truncated = false;
        let mut next_unprocessed_index = 0;
        'bfs: while next_unprocessed_index < elements.len() {
            for generator in self.generators() {
                let new_element = self.compose(&elements[next_unprocessed_index], generator)?;
                if elements.iter().any(|e| self.equal(e, &new_element)) {
                    continue;
                }
                if elements.len() >= max {
                    truncated = true;
                    break 'bfs;
                }
                elements.push(new_element);
            }
            next_unprocessed_index += 1;
        }

        Ok(Enumeration {
            elements,
            truncated,
        })
    }
}
