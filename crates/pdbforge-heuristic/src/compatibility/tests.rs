use pdbforge_config::CliqueStrategy;
use pdbforge_core::Pattern;
use pdbforge_test::{dice, relay, switches};

use super::*;

fn p<const N: usize>(vars: [usize; N]) -> Pattern {
    Pattern::new(vars)
}

#[test]
fn test_operator_independence_is_symmetric() {
    let independence = OperatorIndependence::new(&relay());
    let patterns = [p([0]), p([1]), p([2]), p([0, 1]), p([1, 2]), Pattern::empty()];
    for a in &patterns {
        for b in &patterns {
            assert_eq!(
                independence.are_compatible(a, b),
                independence.are_compatible(b, a),
                "{a} / {b}"
            );
        }
    }
}

#[test]
fn test_shared_affected_variable_breaks_compatibility() {
    let independence = OperatorIndependence::new(&relay());
    assert!(!independence.are_compatible(&p([0, 1]), &p([1, 2])));
    assert!(independence.are_compatible(&p([0, 1]), &p([2])));
    assert!(independence.are_compatible(&p([0]), &p([1])));
    assert!(independence.are_compatible(&Pattern::empty(), &p([0, 1, 2])));
}

#[test]
fn test_every_outcome_counts_as_affecting() {
    // roll writes the die in both outcomes, light writes the lamp only.
    let independence = OperatorIndependence::new(&dice());
    assert!(independence.are_compatible(&p([0]), &p([1])));
    assert!(!independence.are_compatible(&p([0]), &p([0, 1])));
}

#[test]
fn test_explicit_compatibility() {
    let relation = ExplicitCompatibility::new().with_pair(p([0]), p([1]));
    assert!(relation.are_compatible(&p([0]), &p([1])));
    assert!(relation.are_compatible(&p([1]), &p([0])));
    assert!(!relation.are_compatible(&p([0]), &p([2])));

    let all = ExplicitCompatibility::all_pairs(&[p([0]), p([1]), p([2])]);
    assert!(all.are_compatible(&p([2]), &p([0])));
}

#[test]
fn test_graph_construction() {
    let graph = CompatibilityGraph::new(
        OperatorIndependence::new(&relay()),
        [p([0, 1]), p([1, 2]), p([2]), p([0, 1])],
        CliqueStrategy::Incremental,
    );
    assert_eq!(graph.len(), 3);
    assert_eq!(graph.num_edges(), 1);
    assert!(graph.are_adjacent(0, 2));
    assert!(!graph.are_adjacent(0, 1));
    assert_eq!(graph.node_id(&p([2])), Some(2));
    assert_eq!(graph.maximal_cliques(), &[vec![0, 2], vec![1]]);
}

#[test]
fn test_empty_graph_has_no_cliques() {
    let graph = CompatibilityGraph::new(
        OperatorIndependence::new(&relay()),
        Vec::new(),
        CliqueStrategy::Incremental,
    );
    assert!(graph.is_empty());
    assert!(graph.maximal_cliques().is_empty());
}

#[test]
fn test_extension_keeps_existing_edges() {
    let mut graph = CompatibilityGraph::new(
        OperatorIndependence::new(&switches(4)),
        [p([0]), p([1])],
        CliqueStrategy::Incremental,
    );
    assert_eq!(graph.num_edges(), 1);

    let node = graph.extend_compatibility_graph(p([2, 3]));
    assert_eq!(node, 2);
    assert!(graph.are_adjacent(0, 1));
    assert_eq!(graph.neighbors(node).len(), 2);
    assert_eq!(graph.num_edges(), 3);
    // The old clique {0,1} is absorbed by the new one.
    assert_eq!(graph.maximal_cliques(), &[vec![0, 1, 2]]);
}

#[test]
fn test_extension_splits_cliques() {
    let mut graph = CompatibilityGraph::new(
        OperatorIndependence::new(&switches(3)),
        [p([0]), p([1])],
        CliqueStrategy::Incremental,
    );
    graph.extend_compatibility_graph(p([0, 2]));
    assert_eq!(graph.maximal_cliques(), &[vec![0, 1], vec![1, 2]]);
}

#[test]
fn test_clique_strategies_agree() {
    let order = [p([0]), p([1, 2]), p([2]), p([0, 1]), p([1]), p([0, 2])];
    let build = |strategy| {
        let mut graph =
            CompatibilityGraph::new(OperatorIndependence::new(&relay()), Vec::new(), strategy);
        let mut snapshots = Vec::new();
        for pattern in order.iter().cloned() {
            graph.extend_compatibility_graph(pattern);
            snapshots.push(graph.maximal_cliques().to_vec());
        }
        snapshots
    };
    assert_eq!(
        build(CliqueStrategy::Recompute),
        build(CliqueStrategy::Incremental)
    );
}

#[test]
fn test_cliques_are_pairwise_compatible_and_maximal() {
    let graph = CompatibilityGraph::new(
        OperatorIndependence::new(&switches(4)),
        [p([0]), p([1]), p([0, 1]), p([2, 3]), p([3]), p([1, 2])],
        CliqueStrategy::Recompute,
    );
    for clique in graph.maximal_cliques() {
        for (i, &a) in clique.iter().enumerate() {
            for &b in &clique[i + 1..] {
                assert!(graph.are_adjacent(a, b));
            }
        }
        let extensible = (0..graph.len())
            .filter(|v| !clique.contains(v))
            .any(|v| clique.iter().all(|&u| graph.are_adjacent(u, v)));
        assert!(!extensible, "{clique:?} is not maximal");
    }
}
