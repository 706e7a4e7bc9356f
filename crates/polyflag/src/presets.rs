//! Ready-made Wythoffian polytope descriptions.
//!
//! Every preset uses the reflection group of a linear Coxeter diagram, with
//! change operation `g` right-multiplying the domain by the reflection
//! through mirror `g`.

use crate::construct::{ConstructionError, ConstructionResult, DomainCount, PolytopeS};
use crate::coxeter::{CoxeterDiagram, CoxeterError, DynkinNotationError};
use crate::flag::{ElementChange, FlagClasses, FlagError};
use crate::group::{ConcreteGroup, GroupError, GroupResult, MatrixGroup, RewriteGroup};
use crate::polytope::PolytopeC;

/// Syntax of each preset accepted by [`by_name()`], with a short description.
pub const PRESET_SYNTAX: &[(&str, &str)] = &[
    ("polygon:N", "regular N-gon over a rewrite presentation"),
    ("truncated_polygon:N", "truncated regular N-gon (2N vertices)"),
    ("regular:P,Q,...", "regular polytope with Schläfli symbol {P, Q, ...}"),
];

/// Error that can occur while building a preset.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    #[error("unknown preset {0:?}")]
    BadName(String),
    #[error("expected a positive integer; got {0:?}")]
    BadNumber(String),
    #[error(transparent)]
    Coxeter(#[from] CoxeterError),
    #[error(transparent)]
    DynkinNotation(#[from] DynkinNotationError),
    #[error(transparent)]
    Group(#[from] GroupError),
    #[error(transparent)]
    Flag(#[from] FlagError),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Result type returned by preset construction.
pub type PresetResult<T> = Result<T, PresetError>;

/// Polytope description over either kind of symmetry group.
#[allow(missing_docs)]
#[derive(Debug, Clone)]
pub enum Preset {
    Rewrite(PolytopeS<RewriteGroup>),
    Matrix(PolytopeS<MatrixGroup>),
}

impl Preset {
    /// Returns the number of dimensions (rank) of the polytope.
    pub fn dimensions(&self) -> usize {
        match self {
            Preset::Rewrite(p) => p.dimensions(),
            Preset::Matrix(p) => p.dimensions(),
        }
    }
    /// See [`PolytopeS::count_domains()`].
    pub fn count_domains(&self, cap: usize) -> GroupResult<DomainCount> {
        match self {
            Preset::Rewrite(p) => p.count_domains(cap),
            Preset::Matrix(p) => p.count_domains(cap),
        }
    }
    /// See [`PolytopeS::to_polytope_c()`].
    pub fn to_polytope_c(&self, cap: usize) -> ConstructionResult<PolytopeC> {
        match self {
            Preset::Rewrite(p) => p.to_polytope_c(cap),
            Preset::Matrix(p) => p.to_polytope_c(cap),
        }
    }
}

/// Parses a preset name such as `polygon:5`, `truncated_polygon:3`, or
/// `regular:4,3`.
pub fn by_name(name: &str) -> PresetResult<Preset> {
    let (kind, args) = name
        .trim()
        .split_once(':')
        .ok_or_else(|| PresetError::BadName(name.to_string()))?;
    match kind.trim() {
        "polygon" => Ok(Preset::Rewrite(polygon(parse_number(args)?)?)),
        "truncated_polygon" => Ok(Preset::Rewrite(truncated_polygon(parse_number(args)?)?)),
        "regular" => {
            let schlafli: Vec<usize> = args.split(',').map(parse_number).collect::<Result<_, _>>()?;
            Ok(Preset::Matrix(regular(&schlafli)?))
        }
        _ => Err(PresetError::BadName(name.to_string())),
    }
}

fn parse_number(s: &str) -> PresetResult<usize> {
    match s.trim().parse() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(PresetError::BadNumber(s.to_string())),
    }
}

/// Table with a single flag class, in which every change operation
/// right-multiplies by the corresponding generator.
fn single_class_table(dimensions: u8) -> PresetResult<FlagClasses> {
    let table = (0..dimensions)
        .map(|g| vec![ElementChange::new(0, [g])])
        .collect();
    Ok(FlagClasses::new(table, dimensions as usize)?)
}

/// Returns the regular polytope with a given Schläfli symbol, such as `[4, 3]`
/// for the cube.
pub fn regular(schlafli: &[usize]) -> PresetResult<PolytopeS<MatrixGroup>> {
    let diagram = CoxeterDiagram::new_linear(schlafli)?;
    let dimensions = diagram.mirror_count();
    let symmetries = ConcreteGroup::new(diagram.group()?, diagram.generators())?;
    let base_vertex = diagram.point_from_dynkin(&dynkin_first_ringed(dimensions))?;
    Ok(PolytopeS::new(
        symmetries,
        single_class_table(dimensions)?,
        vec![base_vertex],
        dimensions as usize,
    )?)
}

/// Returns the regular `n`-gon, with its symmetries given by the rewrite
/// presentation of the dihedral group.
pub fn polygon(n: usize) -> PresetResult<PolytopeS<RewriteGroup>> {
    let diagram = CoxeterDiagram::new_linear(&[n])?;
    let symmetries = ConcreteGroup::new(RewriteGroup::dihedral(n)?, diagram.generators())?;
    let base_vertex = diagram.point_from_dynkin("xo")?;
    Ok(PolytopeS::new(
        symmetries,
        single_class_table(2)?,
        vec![base_vertex],
        2,
    )?)
}

/// Returns the truncated regular `n`-gon.
///
/// The base vertex lies off both mirrors, so each domain holds two flags: one
/// on the edge cut by mirror 0 (class 0) and one on the edge from the
/// truncation (class 1).
pub fn truncated_polygon(n: usize) -> PresetResult<PolytopeS<RewriteGroup>> {
    let diagram = CoxeterDiagram::new_linear(&[n])?;
    let symmetries = ConcreteGroup::new(RewriteGroup::dihedral(n)?, diagram.generators())?;
    let base_vertex = diagram.point_from_dynkin("xx")?;
    let table = FlagClasses::new(
        vec![
            // Change the vertex.
            vec![ElementChange::new(0, [0]), ElementChange::new(1, [1])],
            // Change the edge.
            vec![ElementChange::new(1, []), ElementChange::new(0, [])],
        ],
        2,
    )?;
    Ok(PolytopeS::new(
        symmetries,
        table,
        vec![base_vertex.clone(), base_vertex],
        2,
    )?)
}

fn dynkin_first_ringed(ndim: u8) -> String {
    std::iter::once('x')
        .chain(std::iter::repeat_n('o', ndim.saturating_sub(1) as usize))
        .collect()
}
