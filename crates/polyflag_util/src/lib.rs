//! Typed indices and index-keyed collections for polyflag.

mod macros;
pub mod ti;

pub use ti::IndexOverflow;
