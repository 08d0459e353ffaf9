//! Compatibility analysis between patterns.
//!
//! Two patterns are compatible when their PDB values may be summed without
//! losing admissibility. The [`CompatibilityGraph`] keeps one node per
//! pattern and an edge per compatible pair, and maintains the set of
//! maximal cliques the canonical heuristic maximizes over.

mod clique;
mod graph;

use std::collections::HashSet;
use std::fmt::Debug;

use pdbforge_core::{Pattern, Problem};

pub use clique::{bron_kerbosch, extend_maximal_cliques, Clique};
pub use graph::{CompatibilityGraph, NodeId};

/// Symmetric relation deciding whether two patterns are additive.
pub trait Compatibility: Send + Sync + Debug {
    /// Returns true if the PDB values of `a` and `b` may be summed.
    ///
    /// Must be symmetric.
    fn are_compatible(&self, a: &Pattern, b: &Pattern) -> bool;
}

/// Patterns are compatible iff no operator affects a variable of both.
///
/// Every outcome of a non-deterministic operator counts as affecting.
///
/// # Example
///
/// ```
/// use pdbforge_core::{ExplicitCondition, Fact, Operator, Pattern, Problem, Variable};
/// use pdbforge_heuristic::compatibility::{Compatibility, OperatorIndependence};
///
/// let problem = Problem::new(
///     vec![Variable::boolean("a"), Variable::boolean("b"), Variable::boolean("c")],
///     vec![
///         Operator::deterministic("ab", [], [Fact::new(0, 1), Fact::new(1, 1)]),
///         Operator::deterministic("c", [], [Fact::new(2, 1)]),
///     ],
///     ExplicitCondition::trivial(),
/// )
/// .unwrap();
/// let independence = OperatorIndependence::new(&problem);
///
/// assert!(!independence.are_compatible(&Pattern::new([0]), &Pattern::new([1])));
/// assert!(independence.are_compatible(&Pattern::new([0, 1]), &Pattern::new([2])));
/// ```
#[derive(Debug, Clone)]
pub struct OperatorIndependence {
    affected: Vec<Vec<usize>>,
}

impl OperatorIndependence {
    pub fn new(problem: &Problem) -> Self {
        Self {
            affected: problem
                .operators()
                .iter()
                .map(|op| op.affected_variables())
                .filter(|vars| !vars.is_empty())
                .collect(),
        }
    }
}

impl Compatibility for OperatorIndependence {
    fn are_compatible(&self, a: &Pattern, b: &Pattern) -> bool {
        !self.affected.iter().any(|vars| {
            vars.iter().any(|&v| a.contains(v)) && vars.iter().any(|&v| b.contains(v))
        })
    }
}

/// A fixed relation given as a list of compatible pairs.
#[derive(Debug, Clone, Default)]
pub struct ExplicitCompatibility {
    pairs: HashSet<(Pattern, Pattern)>,
}

impl ExplicitCompatibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `a` and `b` as compatible (in both directions).
    pub fn with_pair(mut self, a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        self.insert(a.into(), b.into());
        self
    }

    pub fn insert(&mut self, a: Pattern, b: Pattern) {
        self.pairs.insert(ordered(a, b));
    }

    /// Marks every pair of the given patterns as compatible.
    pub fn all_pairs(patterns: &[Pattern]) -> Self {
        let mut relation = Self::new();
        for (i, a) in patterns.iter().enumerate() {
            for b in &patterns[i + 1..] {
                relation.insert(a.clone(), b.clone());
            }
        }
        relation
    }
}

impl Compatibility for ExplicitCompatibility {
    fn are_compatible(&self, a: &Pattern, b: &Pattern) -> bool {
        self.pairs.contains(&ordered(a.clone(), b.clone()))
    }
}

fn ordered(a: Pattern, b: Pattern) -> (Pattern, Pattern) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests;
