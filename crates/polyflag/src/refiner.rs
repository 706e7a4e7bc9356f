//! Equivalence refiners over flags.
//!
//! A refiner maps every flag to a representative of its equivalence class.
//! Entries only ever point from a larger flag to a smaller one (by
//! [`FlagGraph::compare_flags()`]), so following them always reaches a fixed
//! point, and every representative is the least flag in its class.

use std::cmp::Ordering;

use crate::construct::{ConstructionError, ConstructionResult};
use crate::flag::{Flag, FlagGraph};
use crate::group::GeneratorId;

/// Map from each flag to the least flag in its equivalence class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refiner<'a> {
    graph: &'a FlagGraph,
    /// Image of each flag, indexed in enumeration order.
    map: Vec<Flag>,
}

impl<'a> Refiner<'a> {
    /// Constructs the finest refiner, in which every flag is its own class.
    pub fn identity(graph: &'a FlagGraph) -> Self {
        Self {
            graph,
            map: graph.flags().collect(),
        }
    }

    /// Returns the flag graph that this refiner partitions.
    pub fn graph(&self) -> &'a FlagGraph {
        self.graph
    }

    /// Returns a coarser refiner that also identifies every flag with its
    /// image under change operation `change`. Images outside the enumerated
    /// domains are ignored.
    pub fn extend(&self, change: GeneratorId) -> ConstructionResult<Self> {
        let graph = self.graph;
        self.coarsened(|i| Some((self.map[i], graph.move_flag(graph.flag_at(i), change)?)))
    }

    /// Returns the finest refiner that is coarser than both `self` and
    /// `other`.
    pub fn merge(&self, other: &Refiner<'_>) -> ConstructionResult<Self> {
        debug_assert!(
            std::ptr::eq(self.graph, other.graph),
            "cannot merge refiners over different flag graphs",
        );
        self.coarsened(|i| Some((self.map[i], other.map[i])))
    }

    /// Unions the classes of each pair of flags returned by `sides`, then
    /// points every entry directly at its representative.
    fn coarsened(&self, sides: impl Fn(usize) -> Option<(Flag, Flag)>) -> ConstructionResult<Self> {
        let mut ret = self.clone();
        for i in 0..self.map.len() {
            let Some((left, right)) = sides(i) else {
                continue;
            };
            let left = ret.chase(left)?;
            let right = ret.chase(right)?;
            match self.graph.compare_flags(left, right) {
                Ordering::Equal => (),
                Ordering::Less => ret.map[self.graph.index_of(right)] = left,
                Ordering::Greater => ret.map[self.graph.index_of(left)] = right,
            }
        }

        // Path compression
        for i in 0..ret.map.len() {
            let root = ret.chase(ret.map[i])?;
            ret.map[i] = root;
        }

        Ok(ret)
    }

    /// Follows the map from `flag` until reaching a flag that maps to itself.
    ///
    /// Returns an error if that takes more steps than there are flags, which
    /// can only happen if the flag order is inconsistent.
    pub fn chase(&self, flag: Flag) -> ConstructionResult<Flag> {
        let steps = self.map.len() + 1;
        let mut current = flag;
        for _ in 0..steps {
            let next = self.map[self.graph.index_of(current)];
            if next == current {
                return Ok(current);
            }
            current = next;
        }
        Err(ConstructionError::NonConvergentRefiner { flag, steps })
    }

    /// Returns the representative of a flag's class.
    pub fn representative(&self, flag: Flag) -> Flag {
        self.map[self.graph.index_of(flag)]
    }
    /// Returns whether a flag is the representative of its class.
    pub fn is_representative(&self, flag: Flag) -> bool {
        self.representative(flag) == flag
    }
    /// Returns an iterator over class representatives in enumeration order
    /// (domain-major, class-minor).
    pub fn representatives(&self) -> impl '_ + Iterator<Item = Flag> {
        self.graph.flags().filter(|&f| self.is_representative(f))
    }
    /// Returns the number of equivalence classes.
    pub fn class_count(&self) -> usize {
        self.representatives().count()
    }

    /// Numbers the classes in enumeration order of their representatives and
    /// returns the class number of every flag, in enumeration order.
    pub fn class_ids(&self) -> Vec<usize> {
        let mut representative_ids = vec![0; self.map.len()];
        for (id, rep) in self.representatives().enumerate() {
            representative_ids[self.graph.index_of(rep)] = id;
        }
        self.map
            .iter()
            .map(|&rep| representative_ids[self.graph.index_of(rep)])
            .collect()
    }

    /// Returns the refiner obtained by extending by each change operation in
    /// order.
    pub fn extend_all(
        &self,
        changes: impl IntoIterator<Item = GeneratorId>,
    ) -> ConstructionResult<Self> {
        let mut ret = self.clone();
        for change in changes {
            ret = ret.extend(change)?;
        }
        Ok(ret)
    }

    /// Returns the chain of refiners obtained by extending by each change
    /// operation in order, starting with `self`.
    pub fn chain(
        &self,
        changes: impl IntoIterator<Item = GeneratorId>,
    ) -> ConstructionResult<Vec<Self>> {
        let mut ret = vec![self.clone()];
        for change in changes {
            let next = ret[ret.len() - 1].extend(change)?;
            ret.push(next);
        }
        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use polyflag_util::ti::TypedIndex;

    use super::*;
    use crate::flag::{ElementChange, FlagClasses};
    use crate::group::{Group, RewriteGroup};

    fn graph_for(n: usize, cap: usize, table: Vec<Vec<ElementChange>>) -> FlagGraph {
        let g = RewriteGroup::dihedral(n).unwrap();
        let domains = g.enumerate_elements(cap).unwrap().elements;
        let flag_classes = FlagClasses::new(table, 2).unwrap();
        FlagGraph::new(&g, &domains, &flag_classes).unwrap()
    }

    fn regular_polygon_graph(n: usize) -> FlagGraph {
        graph_for(
            n,
            100,
            vec![
                vec![ElementChange::new(0, [0])],
                vec![ElementChange::new(0, [1])],
            ],
        )
    }

    fn truncated_polygon_graph(n: usize) -> FlagGraph {
        graph_for(
            n,
            100,
            vec![
                vec![ElementChange::new(0, [0]), ElementChange::new(1, [1])],
                vec![ElementChange::new(1, []), ElementChange::new(0, [])],
            ],
        )
    }

    fn assert_canonical(r: &Refiner<'_>) {
        let graph = r.graph();
        for flag in graph.flags() {
            let rep = r.representative(flag);
            assert!(r.is_representative(rep), "{rep} is not a fixed point");
            assert_ne!(graph.compare_flags(rep, flag), Ordering::Greater);
            assert_eq!(r.chase(flag).unwrap(), rep);
            assert_eq!(r.chase(r.chase(flag).unwrap()).unwrap(), rep);
        }
    }

    #[test]
    fn test_identity() {
        let graph = regular_polygon_graph(5);
        let r = Refiner::identity(&graph);
        assert_eq!(r.class_count(), 10);
        assert!(graph.flags().all(|f| r.is_representative(f)));
    }

    #[test]
    fn test_extend_pairs_flags() {
        let graph = regular_polygon_graph(5);
        let r = Refiner::identity(&graph).extend(GeneratorId(0)).unwrap();
        // Flipping the vertex pairs up flags sharing an edge.
        assert_eq!(r.class_count(), 5);
        assert_canonical(&r);

        let r = r.extend(GeneratorId(1)).unwrap();
        assert_eq!(r.class_count(), 1);
        assert_canonical(&r);
    }

    #[test]
    fn test_extend_is_monotonic() {
        let graph = truncated_polygon_graph(4);
        let mut r = Refiner::identity(&graph);
        for change in [0, 1, 0, 1].map(GeneratorId) {
            let next = r.extend(change).unwrap();
            assert!(next.class_count() <= r.class_count());
            assert_canonical(&next);
            r = next;
        }
    }

    #[test]
    fn test_merge() {
        let graph = regular_polygon_graph(4);
        let id = Refiner::identity(&graph);
        let a = id.extend(GeneratorId(0)).unwrap();
        let b = id.extend(GeneratorId(1)).unwrap();
        let merged = a.merge(&b).unwrap();
        assert_eq!(merged, id.extend_all([GeneratorId(0), GeneratorId(1)]).unwrap());
        assert_eq!(merged.class_count(), 1);

        assert_eq!(a.merge(&id).unwrap(), a);
        assert_eq!(a.merge(&a).unwrap(), a);
    }

    #[test]
    fn test_extension_order_commutes() {
        let graph = truncated_polygon_graph(3);
        let id = Refiner::identity(&graph);
        let forward = id
            .extend_all([GeneratorId(0), GeneratorId(1)])
            .unwrap()
            .merge(&id)
            .unwrap();
        let backward = id
            .extend_all([GeneratorId(1), GeneratorId(0)])
            .unwrap()
            .merge(&id)
            .unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_chain() {
        let graph = regular_polygon_graph(3);
        let chain = Refiner::identity(&graph).chain(GeneratorId::iter(2)).unwrap();
        assert_eq!(
            chain.iter().map(|r| r.class_count()).collect::<Vec<_>>(),
            vec![6, 3, 1],
        );
        let descending = Refiner::identity(&graph).chain(GeneratorId::iter(2).rev()).unwrap();
        assert_eq!(descending[1].class_count(), 3);
    }

    #[test]
    fn test_truncated_domains() {
        let graph = graph_for(
            3,
            2,
            vec![
                vec![ElementChange::new(0, [0])],
                vec![ElementChange::new(0, [1])],
            ],
        );
        let r = Refiner::identity(&graph)
            .extend_all([GeneratorId(0), GeneratorId(1)])
            .unwrap();
        // Only the `a` edge is complete.
        assert_eq!(r.class_count(), 1);
        let r = Refiner::identity(&graph).extend(GeneratorId(1)).unwrap();
        assert_eq!(r.class_count(), 2);
    }

    #[test]
    fn test_cycle_does_not_converge() {
        let graph = regular_polygon_graph(3);
        let (f0, f1) = (graph.flag_at(0), graph.flag_at(1));
        let mut r = Refiner::identity(&graph);
        r.map[0] = f1;
        r.map[1] = f0;

        assert_eq!(
            r.chase(f0),
            Err(ConstructionError::NonConvergentRefiner {
                flag: f0,
                steps: graph.flag_count() + 1,
            }),
        );
        assert_eq!(r.chase(graph.flag_at(2)), Ok(graph.flag_at(2)));
        assert!(matches!(
            r.extend(GeneratorId(0)),
            Err(ConstructionError::NonConvergentRefiner { .. }),
        ));
        assert!(matches!(
            r.merge(&Refiner::identity(&graph)),
            Err(ConstructionError::NonConvergentRefiner { .. }),
        ));
    }
}
