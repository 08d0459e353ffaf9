//! Planning problem fixtures.

use pdbforge_core::{
    ExplicitCondition, Fact, Operator, Problem, SymbolicCondition, Variable,
};

/// `n` boolean switches, all off initially in the usual test state.
///
/// Operator `on-i` requires switch `i` off and turns it on. The goal is
/// every switch on. Each switch is touched by exactly one operator, so any
/// two disjoint patterns are compatible.
pub fn switches(n: usize) -> Problem {
    let variables = (0..n).map(|i| Variable::boolean(format!("switch-{i}"))).collect();
    let operators = (0..n)
        .map(|i| Operator::deterministic(format!("on-{i}"), [Fact::new(i, 0)], [Fact::new(i, 1)]))
        .collect();
    let goal = ExplicitCondition::new((0..n).map(|i| Fact::new(i, 1)));
    Problem::new(variables, operators, goal).expect("switches fixture is valid")
}

/// Three boolean switches that must be turned on in order.
///
/// `set-0` turns switch 0 on, `set-1` needs switch 0 on, `set-2` needs
/// switch 1 on. From all-off the true distance is 3. Patterns `{0,1}` and
/// `{1,2}` both have distance 2 and interfere through `set-1`.
pub fn relay() -> Problem {
    Problem::new(
        vec![
            Variable::boolean("relay-0"),
            Variable::boolean("relay-1"),
            Variable::boolean("relay-2"),
        ],
        vec![
            Operator::deterministic("set-0", [], [Fact::new(0, 1)]),
            Operator::deterministic("set-1", [Fact::new(0, 1)], [Fact::new(1, 1)]),
            Operator::deterministic("set-2", [Fact::new(1, 1)], [Fact::new(2, 1)]),
        ],
        ExplicitCondition::new([Fact::new(0, 1), Fact::new(1, 1), Fact::new(2, 1)]),
    )
    .expect("relay fixture is valid")
}

/// One three-valued die plus a boolean lamp.
///
/// Die values: 0 = unrolled, 1 = six, 2 = other. `roll` moves an unrolled
/// die to six or other; `reset` moves other back to unrolled. `light`
/// turns the lamp on once the die shows six. Goal: die shows six and the
/// lamp is on.
pub fn dice() -> Problem {
    Problem::new(
        vec![Variable::new("die", 3), Variable::boolean("lamp")],
        vec![
            Operator::new(
                "roll",
                [Fact::new(0, 0)],
                [vec![Fact::new(0, 1)], vec![Fact::new(0, 2)]],
            ),
            Operator::deterministic("reset", [Fact::new(0, 2)], [Fact::new(0, 0)]),
            Operator::deterministic(
                "light",
                [Fact::new(0, 1), Fact::new(1, 0)],
                [Fact::new(1, 1)],
            ),
        ],
        ExplicitCondition::new([Fact::new(0, 1), Fact::new(1, 1)]),
    )
    .expect("dice fixture is valid")
}

/// Two boolean variables: `door` and `broken`.
///
/// `open` opens the door unless it is broken, `smash` breaks it. Nothing
/// repairs a broken door, so every state with `broken = 1` and the door
/// closed is a dead end.
pub fn trap() -> Problem {
    Problem::new(
        vec![Variable::boolean("door"), Variable::boolean("broken")],
        vec![
            Operator::deterministic("open", [Fact::new(0, 0), Fact::new(1, 0)], [Fact::new(0, 1)]),
            Operator::deterministic("smash", [Fact::new(1, 0)], [Fact::new(1, 1)]),
        ],
        ExplicitCondition::new([Fact::new(0, 1)]),
    )
    .expect("trap fixture is valid")
}

/// Three switches, the last one hidden from sensing.
///
/// Same operators as [`switches`]. The explicit goal asks for all three
/// on; the symbolic goal also accepts switches 0 and 1 on with switch 2
/// off.
pub fn hidden() -> Problem {
    let variables = vec![
        Variable::boolean("switch-0"),
        Variable::boolean("switch-1"),
        Variable::boolean("switch-2").hidden(),
    ];
    let operators = (0..3)
        .map(|i| Operator::deterministic(format!("on-{i}"), [Fact::new(i, 0)], [Fact::new(i, 1)]))
        .collect();
    let explicit = ExplicitCondition::new([Fact::new(0, 1), Fact::new(1, 1), Fact::new(2, 1)]);
    let symbolic = SymbolicCondition::new([
        explicit.clone(),
        ExplicitCondition::new([Fact::new(0, 1), Fact::new(1, 1), Fact::new(2, 0)]),
    ]);
    Problem::new(variables, operators, explicit)
        .and_then(|p| p.with_symbolic_goal(symbolic))
        .expect("hidden fixture is valid")
}
