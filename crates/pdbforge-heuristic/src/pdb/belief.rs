//! Belief-state pattern database.
//!
//! Works on sets of abstract states. Starting from the projected symbolic
//! goal `L0`, layers grow as `L(i+1) = L(i) ∪ pre(L(i))`, where `pre(X)`
//! holds every abstract state with an applicable operator that has some
//! outcome in `X`. A belief is `i` steps from the goal when `i` is the
//! smallest index with `project(belief) ⊆ L(i)`.
//!
//! The layers are nested, so the database keeps only the index of the first
//! layer containing each abstract state; the subset test then reduces to a
//! maximum over the projected worlds.
//!
//! Observations are not modelled. `Variable::observable` only decides,
//! through the problem's full-observability flag, that this database is
//! used at all. With a goal that is the lift of the explicit goal the
//! values equal those of the explicit-state database.

use pdbforge_core::{
    BeliefState, ExplicitState, HeuristicValue, Pattern, Problem, Result, SymbolicCondition,
    INFINITE_HEURISTIC,
};
use smallvec::SmallVec;

use super::projection::Projection;

const OUTSIDE: u32 = u32::MAX;

/// Set of abstract states, one bit per rank.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StateSet {
    words: Vec<u64>,
}

impl StateSet {
    fn new(n: usize) -> Self {
        Self {
            words: vec![0; n.div_ceil(64)],
        }
    }

    #[inline]
    fn insert(&mut self, i: usize) {
        self.words[i / 64] |= 1u64 << (i % 64);
    }

    #[inline]
    fn contains(&self, i: usize) -> bool {
        self.words[i / 64] & (1u64 << (i % 64)) != 0
    }

    fn union_with(&mut self, other: &StateSet) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= b;
        }
    }

    fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            (0..64)
                .filter(move |bit| word & (1u64 << bit) != 0)
                .map(move |bit| wi * 64 + bit)
        })
    }
}

/// Layered goal distances over sets of abstract states.
#[derive(Debug, Clone)]
pub struct BeliefStatePdb {
    projection: Projection,
    layer_of: Vec<u32>,
    num_layers: usize,
}

impl BeliefStatePdb {
    /// Builds the database for `pattern` against a symbolic goal.
    pub fn new(problem: &Problem, pattern: &Pattern, goal: &SymbolicCondition) -> Result<Self> {
        let projection = Projection::new(problem, pattern)?;
        let n = projection.num_states();

        let mut transitions: Vec<(usize, SmallVec<[usize; 4]>)> = Vec::new();
        projection.for_each_transition(|state, _, successors| {
            transitions.push((state, SmallVec::from_slice(successors)));
        });

        let mut reached = StateSet::new(n);
        for cube in goal.cubes() {
            for state in projection.matching_states(cube.facts()) {
                reached.insert(state);
            }
        }

        let mut layer_of = vec![OUTSIDE; n];
        for state in reached.iter() {
            layer_of[state] = 0;
        }

        let mut num_layers = usize::from(!reached.is_empty());
        loop {
            let mut frontier = StateSet::new(n);
            for (state, successors) in &transitions {
                if !reached.contains(*state) && successors.iter().any(|&s| reached.contains(s)) {
                    frontier.insert(*state);
                }
            }
            if frontier.is_empty() {
                break;
            }
            for state in frontier.iter() {
                layer_of[state] = num_layers as u32;
            }
            reached.union_with(&frontier);
            num_layers += 1;
        }

        Ok(Self {
            projection,
            layer_of,
            num_layers,
        })
    }

    pub fn pattern(&self) -> &Pattern {
        self.projection.pattern()
    }

    pub fn num_abstract_states(&self) -> usize {
        self.projection.num_states()
    }

    /// Number of goal layers, counting `L0`.
    pub fn num_layers(&self) -> usize {
        self.num_layers
    }

    /// Index of the first layer containing the belief.
    pub fn belief_heuristic(&self, belief: &BeliefState) -> HeuristicValue {
        belief
            .worlds()
            .iter()
            .map(|w| self.state_heuristic(w))
            .fold(0.0, HeuristicValue::max)
    }

    /// A single world is evaluated as a singleton belief.
    #[inline]
    pub fn state_heuristic(&self, state: &ExplicitState) -> HeuristicValue {
        match self.layer_of[self.projection.rank_state(state)] {
            OUTSIDE => INFINITE_HEURISTIC,
            layer => HeuristicValue::from(layer),
        }
    }
}
