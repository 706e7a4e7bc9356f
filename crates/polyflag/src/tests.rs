use std::cmp::Ordering;

use itertools::Itertools;
use polyflag_math::prelude::*;
use polyflag_util::ti::TypedIndex;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::presets;
use crate::prelude::*;

fn flag_graph<G: Group>(p: &PolytopeS<G>, cap: usize) -> FlagGraph {
    let domains = p.symmetries().enumerate_elements(cap).unwrap().elements;
    FlagGraph::new(p.symmetries(), &domains, p.flag_classes()).unwrap()
}

/// Checks that every element above rank 0 has the expected number of
/// distinct facets.
fn assert_facet_sizes(p: &PolytopeC, rank: usize, size: usize) {
    for (i, facets) in p.ranks[rank - 1].iter().enumerate() {
        assert_eq!(
            facets.iter().unique().count(),
            size,
            "rank {rank} element {i} has facets {facets:?}",
        );
    }
}

fn assert_distinct_vertices(p: &PolytopeC) {
    for (a, b) in p.vertices.iter().tuple_combinations() {
        assert!(a.distance(b) > EPSILON, "duplicate vertex {a:?}");
    }
}

#[test]
fn test_triangle() {
    let p = presets::polygon(3).unwrap().to_polytope_c(100).unwrap();
    assert!(!p.truncated);
    assert_eq!(p.domain_count, 6);
    assert_eq!(p.element_counts(), vec![3, 3, 1]);
    assert_eq!(p.ranks[0], vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
    assert_eq!(p.ranks[1], vec![vec![0, 1, 2]]);
    assert_facet_sizes(&p, 1, 2);
    assert_facet_sizes(&p, 2, 3);
    assert_distinct_vertices(&p);
    assert_eq!(p.check_incidences(), Ok(()));
}

#[test]
fn test_truncated_triangle() {
    let p = presets::polygon(3).unwrap().to_polytope_c(2).unwrap();
    assert!(p.truncated);
    assert!(p.domain_count < 3);
    assert!(p.vertices.len() < 3);
    assert_eq!(p.element_counts(), vec![2, 1, 1]);
    assert_eq!(p.check_incidences(), Ok(()));

    let p = presets::polygon(3).unwrap().to_polytope_c(3).unwrap();
    assert!(p.truncated);
    assert_eq!(p.element_counts(), vec![2, 2, 1]);
}

#[test]
fn test_polygons() {
    for n in 3..=8 {
        let p = presets::polygon(n).unwrap().to_polytope_c_default().unwrap();
        assert_eq!(p.element_counts(), vec![n, n, 1], "{n}-gon");
        assert_facet_sizes(&p, 1, 2);
        assert_facet_sizes(&p, 2, n);
        assert_distinct_vertices(&p);
        assert_eq!(p.check_incidences(), Ok(()));
    }
}

#[test]
fn test_truncated_polygons() {
    for (n, expected) in [(3, vec![6, 6, 1]), (4, vec![8, 8, 1]), (5, vec![10, 10, 1])] {
        let p = presets::truncated_polygon(n)
            .unwrap()
            .to_polytope_c_default()
            .unwrap();
        assert_eq!(p.element_counts(), expected, "truncated {n}-gon");
        assert_facet_sizes(&p, 1, 2);
        assert_facet_sizes(&p, 2, 2 * n);
        assert_distinct_vertices(&p);
        assert_eq!(p.check_incidences(), Ok(()));
    }
}

#[test]
fn test_regular_polytopes() {
    let cases: &[(&[usize], &[usize])] = &[
        (&[3, 3], &[4, 6, 4, 1]),
        (&[4, 3], &[8, 12, 6, 1]),
        (&[3, 4], &[6, 12, 8, 1]),
        (&[5, 3], &[20, 30, 12, 1]),
        (&[3, 3, 3], &[5, 10, 10, 5, 1]),
        (&[4, 3, 3], &[16, 32, 24, 8, 1]),
    ];
    for &(schlafli, expected) in cases {
        let p = presets::regular(schlafli)
            .unwrap()
            .to_polytope_c_default()
            .unwrap();
        assert!(!p.truncated, "{schlafli:?}");
        assert_eq!(p.element_counts(), expected, "{schlafli:?}");
        assert_facet_sizes(&p, 1, 2);
        assert_facet_sizes(&p, 2, schlafli[0]);
        assert_distinct_vertices(&p);
        assert_eq!(p.check_incidences(), Ok(()));

        let radius = p.vertices[0].as_vector().mag();
        for v in &p.vertices {
            assert!((v.as_vector().mag() - radius).abs() < EPSILON);
        }
    }
}

#[test]
fn test_cube_domains() {
    let p = presets::regular(&[4, 3]).unwrap().to_polytope_c_default().unwrap();
    assert_eq!(p.domain_count, 48);
    // Every square face has four distinct vertices.
    for face in &p.ranks[1] {
        let vertices = face
            .iter()
            .flat_map(|&edge| &p.ranks[0][edge])
            .unique()
            .count();
        assert_eq!(vertices, 4);
    }
}

#[test]
fn test_compare_flags_on_representatives() {
    let p = presets::truncated_polygon(4).unwrap();
    let graph = flag_graph(&p, 100);
    let edges = Refiner::identity(&graph).extend(GeneratorId(0)).unwrap();

    for flag in graph.flags() {
        assert_eq!(graph.compare_flags(flag, flag), Ordering::Equal);
    }
    let reps = edges.representatives().collect_vec();
    assert_eq!(reps.len(), 8);
    for (&a, &b) in reps.iter().tuple_combinations() {
        let ab = graph.compare_flags(a, b);
        assert_ne!(ab, Ordering::Equal);
        assert_eq!(ab, graph.compare_flags(b, a).reverse());
    }
}

#[test]
fn test_deterministic() {
    let s = presets::regular(&[3, 4]).unwrap();
    assert_eq!(
        s.to_polytope_c_default().unwrap(),
        s.to_polytope_c_default().unwrap(),
    );
}

#[test]
fn test_rewrite_scenario() {
    let g = RewriteGroup::new("ab", &[("aa", ""), ("bb", ""), ("abab", "baba")]).unwrap();
    let composed = g
        .compose(&g.parse_word("ab").unwrap(), &g.parse_word("ba").unwrap())
        .unwrap();
    assert_eq!(g.normalize(composed.clone()).unwrap(), composed);
    assert_eq!(
        g.word_to_string(&g.invert(&g.parse_word("ab").unwrap()).unwrap()),
        "ba",
    );
}

fn word_strategy(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0..2_u8, 0..max_len)
}

proptest! {
    #[test]
    fn proptest_change_involution(n in 2..9_usize, truncated: bool) {
        let p = match truncated {
            true => presets::truncated_polygon(n).unwrap(),
            false => presets::polygon(n).unwrap(),
        };
        let graph = flag_graph(&p, 100);
        prop_assert_eq!(graph.find_non_involution(), None);
        for flag in graph.flags() {
            for g in GeneratorId::iter(2) {
                let image = graph.move_flag(flag, g).unwrap();
                prop_assert_eq!(graph.move_flag(image, g), Some(flag));
            }
        }
    }

    #[test]
    fn proptest_refiner_idempotent_and_monotonic(
        n in 2..8_usize,
        cap in 1..20_usize,
        changes in word_strategy(8),
    ) {
        let p = presets::truncated_polygon(n).unwrap();
        let graph = flag_graph(&p, cap);
        let mut r = Refiner::identity(&graph);
        for change in changes {
            let next = r.extend(GeneratorId(change)).unwrap();
            prop_assert!(next.class_count() <= r.class_count());
            for flag in graph.flags() {
                let once = next.chase(flag).unwrap();
                prop_assert_eq!(next.chase(once).unwrap(), once);
                prop_assert_eq!(once, next.representative(flag));
                prop_assert_eq!(r.representative(flag), r.representative(r.representative(flag)));
            }
            r = next;
        }
    }

    #[test]
    fn proptest_extension_order_commutes(n in 2..8_usize, truncated: bool) {
        let p = match truncated {
            true => presets::truncated_polygon(n).unwrap(),
            false => presets::polygon(n).unwrap(),
        };
        let graph = flag_graph(&p, 100);
        let id = Refiner::identity(&graph);
        let forward = id.extend(GeneratorId(0)).unwrap().extend(GeneratorId(1)).unwrap();
        let backward = id.extend(GeneratorId(1)).unwrap().extend(GeneratorId(0)).unwrap();
        prop_assert_eq!(forward.merge(&id).unwrap(), backward.merge(&id).unwrap());
    }

    #[test]
    fn proptest_rewrite_normal_forms(n in 2..7_usize, a in word_strategy(12), b in word_strategy(12)) {
        let g = RewriteGroup::dihedral(n).unwrap();
        let a: Word = a.into_iter().map(GeneratorId).collect();
        let b: Word = b.into_iter().map(GeneratorId).collect();

        let na = g.normalize(a.clone()).unwrap();
        prop_assert!(na.len() <= n);
        prop_assert_eq!(g.normalize(na.clone()).unwrap(), na.clone());
        for rule in g.rules() {
            let pattern = &rule.pattern.0[..];
            prop_assert!(!na.0.windows(pattern.len()).any(|w| w == pattern));
        }

        let ab = g.compose(&a, &b).unwrap();
        let nb = g.normalize(b).unwrap();
        prop_assert_eq!(g.compose(&na, &nb).unwrap(), ab);
        let inverse = g.invert(&na).unwrap();
        prop_assert_eq!(g.compose(&na, &inverse).unwrap(), g.identity());
    }

    #[test]
    fn proptest_enumeration_dedup(n in 2..8_usize, cap in 0..30_usize) {
        let g = RewriteGroup::dihedral(n).unwrap();
        let e = g.enumerate_elements(cap).unwrap();
        prop_assert!(e.elements.len() <= cap);
        prop_assert_eq!(e.truncated, cap < 2 * n);
        for (x, y) in e.elements.iter().tuple_combinations() {
            prop_assert!(!g.equal(x, y));
        }
    }

    #[test]
    fn proptest_truncated_output_is_consistent(n in 3..7_usize, cap in 1..16_usize) {
        let p = presets::polygon(n).unwrap().to_polytope_c(cap).unwrap();
        prop_assert_eq!(p.truncated, cap < 2 * n);
        prop_assert!(p.domain_count <= cap);
        for edge in &p.ranks[0] {
            prop_assert!(edge.len() <= 2);
            prop_assert!(edge.iter().all(|&v| v < p.vertices.len()));
        }
    }
}
