//! Compatibility graph over a pattern collection.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use pdbforge_config::CliqueStrategy;
use pdbforge_core::Pattern;
use tracing::debug;

use super::clique::{bron_kerbosch, extend_maximal_cliques, Clique};
use super::Compatibility;

/// Index of a pattern in the graph, assigned in insertion order.
pub type NodeId = usize;

/// Undirected graph of patterns with an edge per compatible pair.
///
/// Nodes are only ever added. Existing edges are never re-evaluated, and
/// the maximal-clique set always reflects the current graph.
pub struct CompatibilityGraph<C> {
    compatibility: C,
    nodes: Vec<Pattern>,
    index: HashMap<Pattern, NodeId>,
    neighbors: Vec<BTreeSet<NodeId>>,
    strategy: CliqueStrategy,
    maximal_cliques: Vec<Clique>,
}

impl<C: Compatibility> CompatibilityGraph<C> {
    /// Builds the graph over `patterns`, evaluating every pair once.
    ///
    /// Duplicate patterns are ignored after their first occurrence.
    pub fn new(
        compatibility: C,
        patterns: impl IntoIterator<Item = Pattern>,
        strategy: CliqueStrategy,
    ) -> Self {
        let mut graph = Self {
            compatibility,
            nodes: Vec::new(),
            index: HashMap::new(),
            neighbors: Vec::new(),
            strategy,
            maximal_cliques: Vec::new(),
        };
        for pattern in patterns {
            if !graph.index.contains_key(&pattern) {
                graph.insert_node(pattern);
            }
        }
        graph.maximal_cliques = bron_kerbosch(&graph.neighbors);
        graph
    }

    /// Adds `pattern` as a new node and updates the maximal cliques.
    ///
    /// The pattern must not be in the graph yet.
    pub fn extend_compatibility_graph(&mut self, pattern: Pattern) -> NodeId {
        debug_assert!(
            !self.index.contains_key(&pattern),
            "pattern {pattern} is already in the compatibility graph"
        );
        let node = self.insert_node(pattern);
        self.maximal_cliques = match self.strategy {
            CliqueStrategy::Recompute => bron_kerbosch(&self.neighbors),
            CliqueStrategy::Incremental => {
                extend_maximal_cliques(&self.maximal_cliques, node, &self.neighbors[node])
            }
        };
        debug!(
            event = "graph_extended",
            pattern = %self.nodes[node],
            degree = self.neighbors[node].len(),
            maximal_cliques = self.maximal_cliques.len(),
        );
        node
    }

    fn insert_node(&mut self, pattern: Pattern) -> NodeId {
        let node = self.nodes.len();
        let mut adjacent = BTreeSet::new();
        for (other, existing) in self.nodes.iter().enumerate() {
            if self.compatibility.are_compatible(&pattern, existing) {
                adjacent.insert(other);
                self.neighbors[other].insert(node);
            }
        }
        self.neighbors.push(adjacent);
        self.index.insert(pattern.clone(), node);
        self.nodes.push(pattern);
        node
    }

    /// Current maximal cliques, sorted.
    pub fn maximal_cliques(&self) -> &[Clique] {
        &self.maximal_cliques
    }

    /// Patterns in node order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.nodes
    }

    pub fn pattern(&self, node: NodeId) -> &Pattern {
        &self.nodes[node]
    }

    pub fn node_id(&self, pattern: &Pattern) -> Option<NodeId> {
        self.index.get(pattern).copied()
    }

    pub fn contains(&self, pattern: &Pattern) -> bool {
        self.index.contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors[a].contains(&b)
    }

    pub fn neighbors(&self, node: NodeId) -> &BTreeSet<NodeId> {
        &self.neighbors[node]
    }

    pub fn num_edges(&self) -> usize {
        self.neighbors.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn strategy(&self) -> CliqueStrategy {
        self.strategy
    }

    pub fn compatibility(&self) -> &C {
        &self.compatibility
    }
}

impl<C: fmt::Debug> fmt::Debug for CompatibilityGraph<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompatibilityGraph")
            .field("compatibility", &self.compatibility)
            .field("nodes", &self.nodes.len())
            .field("strategy", &self.strategy)
            .field("maximal_cliques", &self.maximal_cliques.len())
            .finish()
    }
}
