//! Explicit-state pattern database.
//!
//! One abstract state is one point of the projected variable space.
//! Non-deterministic operators are determinized: every outcome of an
//! applicable operator is a unit-cost abstract edge. Distances come from a
//! single backward breadth-first search seeded with every abstract goal
//! state.

use std::collections::VecDeque;

use pdbforge_core::{
    BeliefState, ExplicitCondition, ExplicitState, HeuristicValue, Pattern, Problem, Result,
    INFINITE_HEURISTIC,
};

use super::projection::Projection;

const UNREACHED: u32 = u32::MAX;

/// Goal distances over the projected explicit state space.
#[derive(Debug, Clone)]
pub struct ExplicitStatePdb {
    projection: Projection,
    distances: Vec<u32>,
}

impl ExplicitStatePdb {
    /// Builds the database for `pattern` against an explicit goal.
    pub fn new(problem: &Problem, pattern: &Pattern, goal: &ExplicitCondition) -> Result<Self> {
        let projection = Projection::new(problem, pattern)?;
        let n = projection.num_states();

        let mut predecessors: Vec<Vec<u32>> = vec![Vec::new(); n];
        projection.for_each_transition(|state, _, successors| {
            for &succ in successors {
                if succ != state {
                    predecessors[succ].push(state as u32);
                }
            }
        });

        let mut distances = vec![UNREACHED; n];
        let mut queue = VecDeque::new();
        for goal_state in projection.matching_states(goal.facts()) {
            distances[goal_state] = 0;
            queue.push_back(goal_state);
        }
        while let Some(state) = queue.pop_front() {
            let next = distances[state] + 1;
            for &pred in &predecessors[state] {
                let pred = pred as usize;
                if distances[pred] == UNREACHED {
                    distances[pred] = next;
                    queue.push_back(pred);
                }
            }
        }

        Ok(Self {
            projection,
            distances,
        })
    }

    pub fn pattern(&self) -> &Pattern {
        self.projection.pattern()
    }

    pub fn num_abstract_states(&self) -> usize {
        self.projection.num_states()
    }

    /// Distance of the abstract state `state` projects to.
    #[inline]
    pub fn state_heuristic(&self, state: &ExplicitState) -> HeuristicValue {
        to_value(self.distances[self.projection.rank_state(state)])
    }

    /// Largest distance over the belief's worlds.
    pub fn belief_heuristic(&self, belief: &BeliefState) -> HeuristicValue {
        belief
            .worlds()
            .iter()
            .map(|w| self.state_heuristic(w))
            .fold(0.0, HeuristicValue::max)
    }

    /// Distance table indexed by abstract state rank.
    pub fn distance(&self, rank: usize) -> HeuristicValue {
        to_value(self.distances[rank])
    }

    /// Number of abstract states from which no abstract goal is reachable.
    pub fn num_dead_ends(&self) -> usize {
        self.distances.iter().filter(|&&d| d == UNREACHED).count()
    }
}

#[inline]
fn to_value(distance: u32) -> HeuristicValue {
    if distance == UNREACHED {
        INFINITE_HEURISTIC
    } else {
        HeuristicValue::from(distance)
    }
}
