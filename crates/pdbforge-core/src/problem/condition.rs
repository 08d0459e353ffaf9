//! Goal conditions.
//!
//! An [`ExplicitCondition`] is a conjunction of facts and is what
//! explicit-state pattern databases are built against. A
//! [`SymbolicCondition`] is a disjunction of such conjunctions and
//! describes a set of goal worlds for belief-state pattern databases.

use std::fmt;

use super::Fact;

/// Conjunction of facts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplicitCondition {
    facts: Vec<Fact>,
}

impl ExplicitCondition {
    pub fn new(facts: impl IntoIterator<Item = Fact>) -> Self {
        let mut facts: Vec<Fact> = facts.into_iter().collect();
        facts.sort_unstable();
        facts.dedup();
        Self { facts }
    }

    /// Condition satisfied by every state.
    pub fn trivial() -> Self {
        Self::default()
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Returns true if the assignment satisfies every fact.
    pub fn is_satisfied_by(&self, values: &[usize]) -> bool {
        self.facts.iter().all(|f| values.get(f.var) == Some(&f.value))
    }

    /// Returns true if two facts demand different values for one variable.
    pub fn is_contradictory(&self) -> bool {
        self.facts
            .windows(2)
            .any(|w| w[0].var == w[1].var && w[0].value != w[1].value)
    }
}

/// Disjunction of conjunctive cubes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolicCondition {
    cubes: Vec<ExplicitCondition>,
}

impl SymbolicCondition {
    pub fn new(cubes: impl IntoIterator<Item = ExplicitCondition>) -> Self {
        Self {
            cubes: cubes.into_iter().collect(),
        }
    }

    pub fn cubes(&self) -> &[ExplicitCondition] {
        &self.cubes
    }

    pub fn is_satisfied_by(&self, values: &[usize]) -> bool {
        self.cubes.iter().any(|c| c.is_satisfied_by(values))
    }
}

impl From<ExplicitCondition> for SymbolicCondition {
    fn from(cube: ExplicitCondition) -> Self {
        Self { cubes: vec![cube] }
    }
}

/// Which representation a [`Condition`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    Explicit,
    Symbolic,
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionKind::Explicit => write!(f, "explicit"),
            ConditionKind::Symbolic => write!(f, "symbolic"),
        }
    }
}

/// A goal condition in either representation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    Explicit(ExplicitCondition),
    Symbolic(SymbolicCondition),
}

impl Condition {
    pub fn kind(&self) -> ConditionKind {
        match self {
            Condition::Explicit(_) => ConditionKind::Explicit,
            Condition::Symbolic(_) => ConditionKind::Symbolic,
        }
    }

    pub fn is_satisfied_by(&self, values: &[usize]) -> bool {
        match self {
            Condition::Explicit(c) => c.is_satisfied_by(values),
            Condition::Symbolic(c) => c.is_satisfied_by(values),
        }
    }
}

impl From<ExplicitCondition> for Condition {
    fn from(c: ExplicitCondition) -> Self {
        Condition::Explicit(c)
    }
}

impl From<SymbolicCondition> for Condition {
    fn from(c: SymbolicCondition) -> Self {
        Condition::Symbolic(c)
    }
}
