//! Typed indices and collections keyed by them.

mod index;
mod vec;

pub use index::{IndexOverflow, TypedIndex, TypedIndexIter};
pub use vec::TiVec;
