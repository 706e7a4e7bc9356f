use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::Range;

/// Error when an index does not fit in its [`TypedIndex`] type.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("too many {type_name} indices (maximum is {max_index})")]
pub struct IndexOverflow {
    /// Name of the index type.
    pub type_name: &'static str,
    /// Largest index representable by the type.
    pub max_index: usize,
}

impl IndexOverflow {
    /// Constructs an overflow error for the index type `I`.
    pub fn new<I: TypedIndex>() -> Self {
        Self {
            type_name: I::TYPE_NAME,
            max_index: I::MAX_INDEX,
        }
    }
}

/// Index newtype, usually defined using [`typed_index_struct!`].
///
/// [`typed_index_struct!`]: crate::typed_index_struct
pub trait TypedIndex:
    'static + fmt::Debug + fmt::Display + Default + Copy + Eq + Ord + Hash + Send + Sync
{
    /// Largest index representable by the type.
    const MAX_INDEX: usize;
    /// Name of the type, for error messages.
    const TYPE_NAME: &'static str;

    /// Returns the index as a `usize`.
    fn to_index(self) -> usize;
    /// Converts a `usize` to an index, or returns an error if it is too large.
    fn try_from_index(index: usize) -> Result<Self, IndexOverflow>;

    /// Returns an iterator over the first `count` indices, stopping early at
    /// [`Self::MAX_INDEX`].
    fn iter(count: usize) -> TypedIndexIter<Self> {
        TypedIndexIter {
            range: 0..count.min(Self::MAX_INDEX.saturating_add(1)),
            _marker: PhantomData,
        }
    }
}

/// Iterator returned by [`TypedIndex::iter()`].
#[derive(Debug, Clone)]
pub struct TypedIndexIter<I> {
    range: Range<usize>,
    _marker: PhantomData<fn() -> I>,
}

impl<I: TypedIndex> Iterator for TypedIndexIter<I> {
    type Item = I;

    fn next(&mut self) -> Option<I> {
        I::try_from_index(self.range.next()?).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<I: TypedIndex> DoubleEndedIterator for TypedIndexIter<I> {
    fn next_back(&mut self) -> Option<I> {
        I::try_from_index(self.range.next_back()?).ok()
    }
}

impl<I: TypedIndex> ExactSizeIterator for TypedIndexIter<I> {}
