//! The heuristic evaluation trait.

use std::fmt::Debug;

use pdbforge_core::{HeuristicValue, State};

use crate::pdb::PatternDatabase;

/// Estimates the distance from a state or belief to the goal.
///
/// Values are in `[0, +inf]`; `+inf` marks a provably unsolvable state.
/// Evaluation never fails.
pub trait Heuristic: Send + Debug {
    /// Returns the heuristic value of `state`.
    fn heuristic(&mut self, state: &State) -> HeuristicValue;
}

impl Heuristic for PatternDatabase {
    fn heuristic(&mut self, state: &State) -> HeuristicValue {
        PatternDatabase::heuristic(&*self, state)
    }
}
