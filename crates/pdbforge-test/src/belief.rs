//! Belief construction helpers.

use pdbforge_core::{BeliefState, ExplicitState, Problem};

/// Every world of `problem`, in lexicographic order of values.
pub fn all_worlds(problem: &Problem) -> Vec<ExplicitState> {
    let mut worlds = vec![Vec::new()];
    for var in problem.variables() {
        worlds = worlds
            .into_iter()
            .flat_map(|prefix| {
                (0..var.domain_size).map(move |value| {
                    let mut world = prefix.clone();
                    world.push(value);
                    world
                })
            })
            .collect();
    }
    worlds.into_iter().map(ExplicitState::new).collect()
}

/// Builds a belief from raw value vectors.
pub fn belief_of(worlds: &[&[usize]]) -> BeliefState {
    BeliefState::new(worlds.iter().map(|w| ExplicitState::new(w.to_vec())))
}
