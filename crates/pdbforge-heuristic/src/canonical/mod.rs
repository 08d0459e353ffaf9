//! Canonical pattern database heuristic.
//!
//! Combines a collection of pattern databases into one admissible
//! estimate: the maximum, over all maximal cliques of pairwise compatible
//! patterns, of the sum of the clique members' values.
//!
//! Besides evaluation, the heuristic exposes the primitives a
//! pattern-selection policy drives:
//! - [`CanonicalPdbHeuristic::add_pattern_to_pattern_collection`]
//! - [`CanonicalPdbHeuristic::add_temporary_pattern_database`]
//! - [`CanonicalPdbHeuristic::remove_temporary_pattern_database`]
//! - [`CanonicalPdbHeuristic::dominance_pruning`]

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use pdbforge_config::HeuristicConfig;
use pdbforge_core::{
    is_infinite, BeliefState, Condition, ExplicitState, HeuristicValue, Pattern, PdbError, Problem,
    Result, State, INFINITE_HEURISTIC,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::aggregation::aggregate;
use crate::compatibility::{Clique, Compatibility, CompatibilityGraph, OperatorIndependence};
use crate::heuristic::Heuristic;
use crate::pdb::{PatternDatabase, PdbVariant};

/// The canonical PDB heuristic.
///
/// Owns the permanent pattern databases (those contributing to the
/// estimate), the compatibility graph over their patterns, the current
/// maximal cliques, and a pool of temporary databases a pattern-selection
/// policy may evaluate without committing them. A pattern is in at most one
/// of the two pools.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pdbforge_config::HeuristicConfig;
/// use pdbforge_core::{ExplicitCondition, ExplicitState, Fact, Operator, Pattern, Problem, State, Variable};
/// use pdbforge_heuristic::CanonicalPdbHeuristic;
///
/// let problem = Problem::new(
///     vec![Variable::boolean("a"), Variable::boolean("b")],
///     vec![
///         Operator::deterministic("set-a", [], [Fact::new(0, 1)]),
///         Operator::deterministic("set-b", [], [Fact::new(1, 1)]),
///     ],
///     ExplicitCondition::new([Fact::new(0, 1), Fact::new(1, 1)]),
/// )
/// .unwrap();
///
/// let mut heuristic = CanonicalPdbHeuristic::new(
///     Arc::new(problem),
///     [Pattern::new([0]), Pattern::new([1])],
///     HeuristicConfig::default(),
/// )
/// .unwrap();
///
/// let start = State::from(ExplicitState::new([0, 0]));
/// assert_eq!(heuristic.evaluate(&start), 2.0);
/// assert_eq!(heuristic.num_maximal_cliques(), 1);
/// ```
pub struct CanonicalPdbHeuristic<C = OperatorIndependence> {
    problem: Arc<Problem>,
    config: HeuristicConfig,
    goal: Condition,
    /// Permanent databases, indexed by compatibility-graph node.
    pdbs: Vec<PatternDatabase>,
    temporary: HashMap<Pattern, PatternDatabase>,
    graph: CompatibilityGraph<C>,
    cliques: Vec<Clique>,
    size: usize,
    temporary_size: usize,
    rng: ChaCha8Rng,
}

impl CanonicalPdbHeuristic<OperatorIndependence> {
    /// Builds the heuristic against the goal the selected PDB
    /// representation needs, with operator independence as compatibility.
    pub fn new(
        problem: Arc<Problem>,
        patterns: impl IntoIterator<Item = Pattern>,
        config: HeuristicConfig,
    ) -> Result<Self> {
        let goal = PdbVariant::select(&problem, &config).default_goal(&problem);
        Self::with_goal(problem, patterns, goal, config)
    }

    /// Builds the heuristic against an explicitly given goal.
    pub fn with_goal(
        problem: Arc<Problem>,
        patterns: impl IntoIterator<Item = Pattern>,
        goal: Condition,
        config: HeuristicConfig,
    ) -> Result<Self> {
        let compatibility = OperatorIndependence::new(&problem);
        Self::with_compatibility(problem, patterns, goal, compatibility, config)
    }
}

impl<C: Compatibility> CanonicalPdbHeuristic<C> {
    /// Builds one PDB per pattern, the compatibility graph over exactly
    /// that collection, and its maximal cliques.
    ///
    /// Duplicate patterns are ignored after their first occurrence.
    ///
    /// # Errors
    ///
    /// [`PdbError::InvalidConfig`] if `config` fails validation;
    /// [`PdbError::Unsupported`] if `goal` does not match the PDB
    /// representation `config` selects for `problem`; any error raised while
    /// building a PDB.
    pub fn with_compatibility(
        problem: Arc<Problem>,
        patterns: impl IntoIterator<Item = Pattern>,
        goal: Condition,
        compatibility: C,
        config: HeuristicConfig,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(|err| PdbError::InvalidConfig(err.to_string()))?;
        PdbVariant::select(&problem, &config).check_goal(&goal)?;

        let mut seen = HashSet::new();
        let patterns: Vec<Pattern> = patterns
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .collect();

        let pdbs = build_all(&problem, &patterns, &goal, &config)?;
        let graph = CompatibilityGraph::new(compatibility, patterns, config.clique_strategy);
        let cliques = graph.maximal_cliques().to_vec();
        let size = pdbs
            .iter()
            .fold(1usize, |acc, pdb| acc.saturating_add(pdb.num_abstract_states()));
        let rng = match config.random_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };

        info!(
            event = "heuristic_initialized",
            patterns = pdbs.len(),
            compatible_pairs = graph.num_edges(),
            maximal_cliques = cliques.len(),
            size = size,
        );

        Ok(Self {
            problem,
            config,
            goal,
            pdbs,
            temporary: HashMap::new(),
            graph,
            cliques,
            size,
            temporary_size: 0,
            rng,
        })
    }

    fn build_pdb(&self, pattern: &Pattern) -> Result<PatternDatabase> {
        let variant = PdbVariant::select(&self.problem, &self.config);
        PatternDatabase::build(&self.problem, pattern, variant, &self.goal)
    }

    /// Adds `pattern` to the permanent collection.
    ///
    /// With PDB caching enabled a temporary database for the pattern is
    /// promoted instead of rebuilt. Any temporary entry for the pattern is
    /// gone afterwards. The pattern must not already be permanent.
    pub fn add_pattern_to_pattern_collection(&mut self, pattern: Pattern) -> Result<()> {
        debug_assert!(
            !self.graph.contains(&pattern),
            "pattern {pattern} is already in the pattern collection"
        );
        info!(event = "pattern_added", pattern = %pattern);

        let cached = if self.config.cache_pdbs {
            self.take_temporary(&pattern)
        } else {
            None
        };
        let pdb = match cached {
            Some(pdb) => {
                debug!(event = "pdb_promoted", pattern = %pattern);
                pdb
            }
            None => {
                let pdb = self.build_pdb(&pattern)?;
                // A stale candidate is only evicted once its replacement exists.
                self.take_temporary(&pattern);
                pdb
            }
        };

        let states = pdb.num_abstract_states();
        let node = self.graph.extend_compatibility_graph(pattern);
        debug_assert_eq!(node, self.pdbs.len());
        self.pdbs.push(pdb);
        self.cliques = self.graph.maximal_cliques().to_vec();
        self.size = self.size.saturating_add(states);
        Ok(())
    }

    /// Builds a temporary database for `pattern`.
    ///
    /// Returns `Ok(false)` without building anything if one already exists.
    /// Temporary databases never take part in evaluation or in the clique
    /// computation. The pattern must not be permanent.
    pub fn add_temporary_pattern_database(&mut self, pattern: Pattern) -> Result<bool> {
        debug_assert!(
            !self.graph.contains(&pattern),
            "pattern {pattern} is already in the pattern collection"
        );
        if self.temporary.contains_key(&pattern) {
            return Ok(false);
        }
        let pdb = self.build_pdb(&pattern)?;
        self.temporary_size = self.temporary_size.saturating_add(pdb.num_abstract_states());
        self.temporary.insert(pattern, pdb);
        Ok(true)
    }

    /// Evicts the temporary database for `pattern`, if any.
    pub fn remove_temporary_pattern_database(&mut self, pattern: &Pattern) -> bool {
        self.take_temporary(pattern).is_some()
    }

    /// Evicts every temporary database.
    pub fn clear_temporary_pattern_databases(&mut self) {
        self.temporary.clear();
        self.temporary_size = 0;
    }

    fn take_temporary(&mut self, pattern: &Pattern) -> Option<PatternDatabase> {
        let pdb = self.temporary.remove(pattern)?;
        self.temporary_size = self.temporary_size.saturating_sub(pdb.num_abstract_states());
        Some(pdb)
    }

    /// Removes every maximal clique dominated by another one.
    ///
    /// Clique `D` dominates `C` when each pattern of `C` is a subset of some
    /// pattern of `D`. All decisions use the clique set as it was on entry.
    /// Of two cliques dominating each other the earlier one is kept.
    ///
    /// Returns the number of cliques removed.
    pub fn dominance_pruning(&mut self) -> usize {
        let before = self.cliques.len();
        info!(event = "dominance_pruning_start", maximal_cliques = before);

        let patterns = self.graph.patterns();
        let dominates = |d: &Clique, c: &Clique| {
            c.iter()
                .all(|&p| d.iter().any(|&q| patterns[p].is_subset_of(&patterns[q])))
        };
        let snapshot = &self.cliques;
        let keep: Vec<bool> = snapshot
            .iter()
            .enumerate()
            .map(|(i, c)| {
                !snapshot.iter().enumerate().any(|(j, d)| {
                    j != i && dominates(d, c) && !(j > i && dominates(c, d))
                })
            })
            .collect();

        let mut keep = keep.into_iter();
        self.cliques.retain(|_| keep.next().unwrap_or(true));

        let removed = before - self.cliques.len();
        info!(
            event = "dominance_pruning_end",
            maximal_cliques = self.cliques.len(),
            removed = removed,
        );
        removed
    }

    /// Heuristic value of `state`.
    ///
    /// Beliefs are sampled when full observability is assumed for PDBs:
    /// the configured number of worlds is drawn and their canonical values
    /// are aggregated. Everything else is evaluated directly.
    pub fn evaluate(&mut self, state: &State) -> HeuristicValue {
        match state {
            State::Belief(belief) if self.config.assume_full_observability => {
                self.sampled_heuristic(belief)
            }
            _ => self.canonical_heuristic(state),
        }
    }

    fn sampled_heuristic(&mut self, belief: &BeliefState) -> HeuristicValue {
        let sample = belief.sample_worlds(self.config.sample_size, &mut self.rng);
        let value = aggregate(
            self.config.aggregation,
            sample.iter().map(|world| self.world_heuristic(world)),
        );
        debug!(
            event = "belief_sampled",
            worlds = belief.len(),
            sampled = sample.len(),
            aggregation = %self.config.aggregation,
            value = value,
        );
        value
    }

    /// Maximum over maximal cliques of the summed PDB values.
    ///
    /// Returns `+inf` as soon as any evaluated PDB does, and 0 when the
    /// collection is empty.
    pub fn canonical_heuristic(&self, state: &State) -> HeuristicValue {
        self.max_over_cliques(|pdb| pdb.heuristic(state))
    }

    fn world_heuristic(&self, world: &ExplicitState) -> HeuristicValue {
        self.max_over_cliques(|pdb| pdb.state_heuristic(world))
    }

    #[inline]
    fn max_over_cliques(
        &self,
        value_of: impl Fn(&PatternDatabase) -> HeuristicValue,
    ) -> HeuristicValue {
        let mut best: HeuristicValue = 0.0;
        for clique in &self.cliques {
            let mut sum = 0.0;
            for &node in clique {
                let value = value_of(&self.pdbs[node]);
                if is_infinite(value) {
                    return INFINITE_HEURISTIC;
                }
                sum += value;
            }
            best = best.max(sum);
        }
        best
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Goal the databases are built against.
    pub fn goal(&self) -> &Condition {
        &self.goal
    }

    /// One plus the abstract-state counts of all permanent patterns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Abstract-state counts of the temporary databases currently held.
    pub fn temporary_size(&self) -> usize {
        self.temporary_size
    }

    /// Permanent patterns in insertion order.
    pub fn patterns(&self) -> &[Pattern] {
        self.graph.patterns()
    }

    pub fn is_permanent(&self, pattern: &Pattern) -> bool {
        self.graph.contains(pattern)
    }

    pub fn is_temporary(&self, pattern: &Pattern) -> bool {
        self.temporary.contains_key(pattern)
    }

    pub fn pattern_database(&self, pattern: &Pattern) -> Option<&PatternDatabase> {
        self.graph.node_id(pattern).map(|node| &self.pdbs[node])
    }

    pub fn temporary_pattern_database(&self, pattern: &Pattern) -> Option<&PatternDatabase> {
        self.temporary.get(pattern)
    }

    pub fn num_temporary_pattern_databases(&self) -> usize {
        self.temporary.len()
    }

    /// Current maximal cliques as pattern lists.
    pub fn maximal_cliques(&self) -> Vec<Vec<&Pattern>> {
        self.cliques
            .iter()
            .map(|clique| clique.iter().map(|&node| self.graph.pattern(node)).collect())
            .collect()
    }

    pub fn num_maximal_cliques(&self) -> usize {
        self.cliques.len()
    }

    pub fn compatibility_graph(&self) -> &CompatibilityGraph<C> {
        &self.graph
    }
}

fn build_all(
    problem: &Problem,
    patterns: &[Pattern],
    goal: &Condition,
    config: &HeuristicConfig,
) -> Result<Vec<PatternDatabase>> {
    let variant = PdbVariant::select(problem, config);
    if config.parallel_construction {
        // Built concurrently, published in collection order by the caller.
        patterns
            .par_iter()
            .map(|pattern| PatternDatabase::build(problem, pattern, variant, goal))
            .collect()
    } else {
        patterns
            .iter()
            .map(|pattern| PatternDatabase::build(problem, pattern, variant, goal))
            .collect()
    }
}

impl<C: Compatibility> Heuristic for CanonicalPdbHeuristic<C> {
    fn heuristic(&mut self, state: &State) -> HeuristicValue {
        self.evaluate(state)
    }
}

impl<C: Compatibility> fmt::Display for CanonicalPdbHeuristic<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Patterns: ")?;
        for pattern in self.patterns() {
            write!(f, "{pattern} ")?;
        }
        writeln!(f)?;
        write!(f, "Maximal cliques: [")?;
        for (i, clique) in self.maximal_cliques().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, pattern) in clique.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{pattern}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

impl<C: fmt::Debug> fmt::Debug for CanonicalPdbHeuristic<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanonicalPdbHeuristic")
            .field("patterns", &self.pdbs.len())
            .field("temporary", &self.temporary.len())
            .field("maximal_cliques", &self.cliques.len())
            .field("size", &self.size)
            .field("graph", &self.graph)
            .finish()
    }
}
