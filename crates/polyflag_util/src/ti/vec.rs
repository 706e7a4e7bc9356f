use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use super::{IndexOverflow, TypedIndex, TypedIndexIter};

/// `Vec` indexed by a [`TypedIndex`] instead of `usize`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TiVec<I, E> {
    values: Vec<E>,
    _marker: PhantomData<fn(I)>,
}

impl<I, E: fmt::Debug> fmt::Debug for TiVec<I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.values).finish()
    }
}

impl<I: TypedIndex, E> Default for TiVec<I, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: TypedIndex, E> TiVec<I, E> {
    /// Returns an empty collection.
    pub const fn new() -> Self {
        Self {
            values: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }
    /// Returns whether there are no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Appends an element and returns its index, or an error if the index
    /// type is full.
    pub fn push(&mut self, value: E) -> Result<I, IndexOverflow> {
        let index = I::try_from_index(self.values.len())?;
        self.values.push(value);
        Ok(index)
    }

    /// Returns an iterator over the indices.
    pub fn iter_keys(&self) -> TypedIndexIter<I> {
        I::iter(self.values.len())
    }
    /// Returns an iterator over index-element pairs.
    pub fn iter(&self) -> std::iter::Zip<TypedIndexIter<I>, std::slice::Iter<'_, E>> {
        self.iter_keys().zip(&self.values)
    }
}

impl<I: TypedIndex, E> Index<I> for TiVec<I, E> {
    type Output = E;

    #[track_caller]
    fn index(&self, index: I) -> &E {
        &self.values[index.to_index()]
    }
}
impl<I: TypedIndex, E> IndexMut<I> for TiVec<I, E> {
    #[track_caller]
    fn index_mut(&mut self, index: I) -> &mut E {
        &mut self.values[index.to_index()]
    }
}

impl<'a, I: TypedIndex, E> IntoIterator for &'a TiVec<I, E> {
    type Item = (I, &'a E);
    type IntoIter = std::iter::Zip<TypedIndexIter<I>, std::slice::Iter<'a, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Elements past [`TypedIndex::MAX_INDEX`] are kept but cannot be indexed.
/// Use [`TryFrom`] to reject them instead.
impl<I: TypedIndex, E> FromIterator<E> for TiVec<I, E> {
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
            _marker: PhantomData,
        }
    }
}

impl<I: TypedIndex, E> TryFrom<Vec<E>> for TiVec<I, E> {
    type Error = IndexOverflow;

    fn try_from(values: Vec<E>) -> Result<Self, IndexOverflow> {
        if values.len() > I::MAX_INDEX.saturating_add(1) {
            return Err(IndexOverflow::new::<I>());
        }
        Ok(Self {
            values,
            _marker: PhantomData,
        })
    }
}
