use std::collections::{HashMap, VecDeque};

use pdbforge_config::HeuristicConfig;
use pdbforge_core::{
    is_infinite, BeliefState, Condition, ExplicitCondition, ExplicitState, Pattern, PdbError,
    Problem, State, Variable,
};
use pdbforge_test::{all_worlds, belief_of, dice, hidden, relay, switches, trap};

use super::*;

fn world(values: &[usize]) -> ExplicitState {
    ExplicitState::new(values.to_vec())
}

fn explicit(problem: &Problem, pattern: &Pattern) -> PatternDatabase {
    let goal = Condition::Explicit(problem.explicit_goal().clone());
    PatternDatabase::build(problem, pattern, PdbVariant::ExplicitState, &goal).unwrap()
}

fn belief(problem: &Problem, pattern: &Pattern) -> BeliefStatePdb {
    BeliefStatePdb::new(problem, pattern, problem.symbolic_goal()).unwrap()
}

/// Goal distances in the concrete state space, every outcome one edge.
fn concrete_distances(problem: &Problem) -> HashMap<Vec<usize>, f64> {
    let worlds: Vec<Vec<usize>> = all_worlds(problem)
        .into_iter()
        .map(|w| w.values().to_vec())
        .collect();
    let mut distances: HashMap<Vec<usize>, f64> = HashMap::new();
    let mut queue = VecDeque::new();
    for w in &worlds {
        if problem.explicit_goal().is_satisfied_by(w) {
            distances.insert(w.clone(), 0.0);
            queue.push_back(w.clone());
        }
    }
    while let Some(target) = queue.pop_front() {
        let d = distances[&target];
        for w in &worlds {
            if distances.contains_key(w) {
                continue;
            }
            let reaches = problem.operators().iter().any(|op| {
                op.is_applicable(w)
                    && op.outcomes.iter().any(|effect| {
                        let mut succ = w.clone();
                        for f in effect {
                            succ[f.var] = f.value;
                        }
                        succ == target
                    })
            });
            if reaches {
                distances.insert(w.clone(), d + 1.0);
                queue.push_back(w.clone());
            }
        }
    }
    worlds
        .into_iter()
        .map(|w| {
            let d = distances.get(&w).copied().unwrap_or(f64::INFINITY);
            (w, d)
        })
        .collect()
}

#[test]
fn test_full_pattern_matches_concrete_distances() {
    for problem in [dice(), trap(), relay(), switches(3)] {
        let pattern: Pattern = (0..problem.num_variables()).collect();
        let pdb = explicit(&problem, &pattern);
        for (values, expected) in concrete_distances(&problem) {
            assert_eq!(
                pdb.state_heuristic(&ExplicitState::new(values.clone())),
                expected,
                "state {values:?}"
            );
        }
    }
}

#[test]
fn test_dice_distances() {
    let problem = dice();
    let pdb = explicit(&problem, &Pattern::new([0, 1]));
    let expected = [
        ([1, 1], 0.0),
        ([1, 0], 1.0),
        ([0, 0], 2.0),
        ([2, 0], 3.0),
        ([0, 1], 1.0),
        ([2, 1], 2.0),
    ];
    for (values, distance) in expected {
        assert_eq!(pdb.state_heuristic(&world(&values)), distance, "{values:?}");
    }

    let die = explicit(&problem, &Pattern::new([0]));
    assert_eq!(die.state_heuristic(&world(&[1, 0])), 0.0);
    assert_eq!(die.state_heuristic(&world(&[0, 0])), 1.0);
    assert_eq!(die.state_heuristic(&world(&[2, 1])), 2.0);

    let lamp = explicit(&problem, &Pattern::new([1]));
    assert_eq!(lamp.state_heuristic(&world(&[2, 0])), 1.0);
}

#[test]
fn test_projection_never_overestimates() {
    let problem = dice();
    let full = explicit(&problem, &Pattern::new([0, 1]));
    for pattern in [Pattern::new([0]), Pattern::new([1]), Pattern::empty()] {
        let pdb = explicit(&problem, &pattern);
        for w in all_worlds(&problem) {
            assert!(pdb.state_heuristic(&w) <= full.state_heuristic(&w));
        }
    }
}

#[test]
fn test_dead_ends() {
    let problem = trap();
    let PatternDatabase::Explicit(pdb) = explicit(&problem, &Pattern::new([0, 1])) else {
        panic!("expected an explicit-state PDB");
    };
    assert_eq!(pdb.num_dead_ends(), 1);
    assert!(is_infinite(pdb.state_heuristic(&world(&[0, 1]))));
    assert_eq!(pdb.state_heuristic(&world(&[0, 0])), 1.0);

    // The projection onto the door forgets the breakage.
    let door = explicit(&problem, &Pattern::new([0]));
    assert_eq!(door.state_heuristic(&world(&[0, 1])), 1.0);
    let broken = explicit(&problem, &Pattern::new([1]));
    assert_eq!(broken.state_heuristic(&world(&[0, 1])), 0.0);
}

#[test]
fn test_empty_pattern_has_one_goal_state() {
    let problem = trap();
    let PatternDatabase::Explicit(pdb) = explicit(&problem, &Pattern::empty()) else {
        panic!("expected an explicit-state PDB");
    };
    assert_eq!(pdb.num_abstract_states(), 1);
    assert_eq!(pdb.distance(0), 0.0);
}

#[test]
fn test_explicit_pdb_on_belief_takes_worst_world() {
    let problem = dice();
    let pdb = explicit(&problem, &Pattern::new([0, 1]));
    let state = State::from(belief_of(&[&[1, 1], &[0, 0], &[1, 0]]));
    assert_eq!(pdb.heuristic(&state), 2.0);
}

#[test]
fn test_belief_pdb_layers() {
    let problem = dice();
    let pdb = belief(&problem, &Pattern::new([0, 1]));
    assert_eq!(pdb.num_layers(), 4);
    assert_eq!(pdb.state_heuristic(&world(&[1, 1])), 0.0);
    assert_eq!(pdb.state_heuristic(&world(&[2, 0])), 3.0);

    let mixed = belief_of(&[&[1, 0], &[2, 1]]);
    assert_eq!(pdb.belief_heuristic(&mixed), 2.0);
}

#[test]
fn test_belief_pdb_agrees_with_explicit_on_single_cube_goal() {
    let problem = relay();
    for pattern in [Pattern::new([0, 1]), Pattern::new([1, 2]), Pattern::new([2])] {
        let e = explicit(&problem, &pattern);
        let b = belief(&problem, &pattern);
        for w in all_worlds(&problem) {
            assert_eq!(e.state_heuristic(&w), b.state_heuristic(&w), "{pattern}");
        }
    }
}

#[test]
fn test_belief_pdb_honors_disjunctive_goal() {
    let problem = hidden();
    let pdb = belief(&problem, &Pattern::new([2]));
    assert_eq!(pdb.num_layers(), 1);
    assert_eq!(pdb.state_heuristic(&world(&[0, 0, 0])), 0.0);

    let e = explicit(&problem, &Pattern::new([2]));
    assert_eq!(e.state_heuristic(&world(&[0, 0, 0])), 1.0);
}

#[test]
fn test_belief_pdb_unreachable_goal() {
    let problem = trap();
    let pdb = belief(&problem, &Pattern::new([0, 1]));
    let b = belief_of(&[&[1, 1], &[0, 1]]);
    assert!(is_infinite(pdb.belief_heuristic(&b)));
    assert_eq!(pdb.belief_heuristic(&BeliefState::new([world(&[1, 1])])), 0.0);
}

#[test]
fn test_variant_selection() {
    let default = HeuristicConfig::default();
    assert_eq!(PdbVariant::select(&dice(), &default), PdbVariant::ExplicitState);
    assert_eq!(PdbVariant::select(&hidden(), &default), PdbVariant::BeliefState);

    let assumed = HeuristicConfig::default().with_full_observability_assumed(true);
    assert_eq!(PdbVariant::select(&hidden(), &assumed), PdbVariant::ExplicitState);

    let pdb = PatternDatabase::for_config(&hidden(), &Pattern::new([2]), &default).unwrap();
    assert_eq!(pdb.variant(), PdbVariant::BeliefState);
    assert_eq!(pdb.pattern(), &Pattern::new([2]));
}

#[test]
fn test_goal_kind_mismatch_is_unsupported() {
    let problem = dice();
    let symbolic = Condition::Symbolic(problem.symbolic_goal().clone());
    let err = PatternDatabase::build(
        &problem,
        &Pattern::new([0]),
        PdbVariant::ExplicitState,
        &symbolic,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PdbError::Unsupported {
            variant: "explicit-state",
            ..
        }
    ));

    let explicit_goal = Condition::Explicit(ExplicitCondition::trivial());
    assert!(PdbVariant::BeliefState.check_goal(&explicit_goal).is_err());
    assert!(PdbVariant::ExplicitState.check_goal(&explicit_goal).is_ok());
}

#[test]
fn test_unknown_variable_is_invalid_pattern() {
    let err = PatternDatabase::for_config(
        &dice(),
        &Pattern::new([0, 7]),
        &HeuristicConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PdbError::InvalidPattern(_)));
}

#[test]
fn test_oversized_pattern_is_rejected() {
    let huge = usize::MAX / 2;
    let problem = Problem::new(
        vec![Variable::new("a", huge), Variable::new("b", huge)],
        vec![],
        ExplicitCondition::trivial(),
    )
    .unwrap();
    let err = PatternDatabase::for_config(&problem, &Pattern::new([0, 1]), &HeuristicConfig::default())
        .unwrap_err();
    assert!(matches!(err, PdbError::TooLarge { .. }));
    assert_eq!(num_abstract_states(&problem, &Pattern::new([0, 1])), usize::MAX);
}

#[test]
fn test_num_abstract_states_ignores_variable_order() {
    let problem = dice();
    assert_eq!(
        num_abstract_states(&problem, &Pattern::new([1, 0])),
        num_abstract_states(&problem, &Pattern::new([0, 1]))
    );
    assert_eq!(num_abstract_states(&problem, &Pattern::new([0])), 3);
    assert_eq!(explicit(&problem, &Pattern::new([0, 1])).num_abstract_states(), 6);
}

#[test]
fn test_rank_overflowing_u32_is_rejected() {
    let problem = Problem::new(
        vec![Variable::new("a", 70_000), Variable::new("b", 70_000)],
        vec![],
        ExplicitCondition::trivial(),
    )
    .unwrap();
    let pair = Pattern::new([0, 1]);
    assert_eq!(num_abstract_states(&problem, &pair), 4_900_000_000);
    let err = PatternDatabase::for_config(&problem, &pair, &HeuristicConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        PdbError::TooLarge {
            states: 4_900_000_000,
            ..
        }
    ));

    let single = explicit(&problem, &Pattern::new([0]));
    assert_eq!(single.num_abstract_states(), 70_000);
    assert_eq!(single.state_heuristic(&world(&[69_999, 0])), 0.0);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "does not fit pattern")]
fn test_short_state_is_caught_in_debug_builds() {
    let problem = dice();
    let pdb = explicit(&problem, &Pattern::new([0, 1]));
    pdb.state_heuristic(&world(&[1]));
}
