//! Symmetry-driven construction of polytope incidence structures.
//!
//! A [`PolytopeS`] describes a polytope by its symmetry group, the flag
//! classes of one fundamental domain, and a base vertex per flag class.
//! [`PolytopeS::to_polytope_c()`] enumerates the domains, refines flags into
//! equivalence classes per rank, and returns a [`PolytopeC`]: realized
//! vertices plus, for each higher rank, the facet indices of every element.

pub mod construct;
pub mod coxeter;
pub mod flag;
pub mod group;
pub mod polytope;
pub mod presets;
pub mod refiner;

pub use construct::*;
pub use flag::*;
pub use group::*;
pub use polytope::*;

/// Structs, traits, and constants.
pub mod prelude {
    pub use crate::construct::*;
    pub use crate::coxeter::{CoxeterDiagram, CoxeterError};
    pub use crate::flag::*;
    pub use crate::group::*;
    pub use crate::polytope::*;
    pub use crate::refiner::Refiner;
}

#[cfg(test)]
mod tests;
