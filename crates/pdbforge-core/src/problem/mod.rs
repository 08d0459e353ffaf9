//! Planning problem representation.
//!
//! Finite-domain variables, operators with non-deterministic outcomes, and
//! goals in both explicit and symbolic form. This is the view of the
//! planning task that pattern databases and the compatibility analysis
//! consume; parsing lives elsewhere.

mod condition;
mod operator;

pub use condition::{Condition, ConditionKind, ExplicitCondition, SymbolicCondition};
pub use operator::Operator;

use crate::error::{PdbError, Result};
use crate::pattern::Pattern;
use crate::state::ExplicitState;

/// A finite-domain state variable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    pub name: String,
    pub domain_size: usize,
    /// Whether the agent can sense this variable's value.
    pub observable: bool,
}

impl Variable {
    pub fn new(name: impl Into<String>, domain_size: usize) -> Self {
        Self {
            name: name.into(),
            domain_size,
            observable: true,
        }
    }

    /// A two-valued variable.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, 2)
    }

    pub fn hidden(mut self) -> Self {
        self.observable = false;
        self
    }
}

/// A variable/value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fact {
    pub var: usize,
    pub value: usize,
}

impl Fact {
    #[inline]
    pub const fn new(var: usize, value: usize) -> Self {
        Self { var, value }
    }
}

/// A planning problem.
///
/// # Example
///
/// ```
/// use pdbforge_core::{ExplicitCondition, Fact, Operator, Problem, Variable};
///
/// let problem = Problem::new(
///     vec![Variable::boolean("door-open")],
///     vec![Operator::deterministic("open", [Fact::new(0, 0)], [Fact::new(0, 1)])],
///     ExplicitCondition::new([Fact::new(0, 1)]),
/// )
/// .unwrap();
///
/// assert!(problem.is_full_observable());
/// assert_eq!(problem.num_variables(), 1);
/// ```
///
/// Deserialized problems go through the same validation as [`Problem::new`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawProblem"))]
pub struct Problem {
    variables: Vec<Variable>,
    operators: Vec<Operator>,
    explicit_goal: ExplicitCondition,
    symbolic_goal: SymbolicCondition,
    full_observable: bool,
}

/// Unvalidated wire form of [`Problem`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawProblem {
    variables: Vec<Variable>,
    operators: Vec<Operator>,
    explicit_goal: ExplicitCondition,
    symbolic_goal: SymbolicCondition,
    full_observable: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawProblem> for Problem {
    type Error = PdbError;

    fn try_from(raw: RawProblem) -> Result<Self> {
        let problem = Self {
            variables: raw.variables,
            operators: raw.operators,
            explicit_goal: raw.explicit_goal,
            symbolic_goal: raw.symbolic_goal,
            full_observable: raw.full_observable,
        };
        problem.validate()?;
        Ok(problem)
    }
}

impl Problem {
    /// Creates and validates a problem.
    ///
    /// The symbolic goal is the single-cube lift of `explicit_goal`; the
    /// problem is fully observable iff every variable is observable.
    pub fn new(
        variables: Vec<Variable>,
        operators: Vec<Operator>,
        explicit_goal: ExplicitCondition,
    ) -> Result<Self> {
        let full_observable = variables.iter().all(|v| v.observable);
        let problem = Self {
            symbolic_goal: SymbolicCondition::from(explicit_goal.clone()),
            variables,
            operators,
            explicit_goal,
            full_observable,
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Replaces the symbolic goal.
    pub fn with_symbolic_goal(mut self, goal: SymbolicCondition) -> Result<Self> {
        self.symbolic_goal = goal;
        self.validate()?;
        Ok(self)
    }

    /// Overrides the observability flag derived from the variables.
    pub fn with_full_observability(mut self, full_observable: bool) -> Self {
        self.full_observable = full_observable;
        self
    }

    fn validate(&self) -> Result<()> {
        if let Some(v) = self.variables.iter().find(|v| v.domain_size == 0) {
            return Err(PdbError::InvalidProblem(format!(
                "variable '{}' has an empty domain",
                v.name
            )));
        }
        for op in &self.operators {
            if op.outcomes.is_empty() {
                return Err(PdbError::InvalidProblem(format!(
                    "operator '{}' has no outcome",
                    op.name
                )));
            }
            let facts = op.precondition.iter().chain(op.outcomes.iter().flatten());
            self.check_facts(facts, &op.name)?;
        }
        self.check_facts(self.explicit_goal.facts().iter(), "explicit goal")?;
        for cube in self.symbolic_goal.cubes() {
            self.check_facts(cube.facts().iter(), "symbolic goal")?;
        }
        Ok(())
    }

    fn check_facts<'a>(&self, facts: impl Iterator<Item = &'a Fact>, owner: &str) -> Result<()> {
        for f in facts {
            match self.variables.get(f.var) {
                None => {
                    return Err(PdbError::InvalidProblem(format!(
                        "{owner} refers to unknown variable {}",
                        f.var
                    )))
                }
                Some(v) if f.value >= v.domain_size => {
                    return Err(PdbError::InvalidProblem(format!(
                        "{owner} assigns {} to '{}' with domain size {}",
                        f.value, v.name, v.domain_size
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Checks that every variable of `pattern` exists.
    pub fn check_pattern(&self, pattern: &Pattern) -> Result<()> {
        match pattern.iter().find(|&v| v >= self.variables.len()) {
            Some(v) => Err(PdbError::InvalidPattern(format!(
                "{pattern} refers to variable {v}, problem has {}",
                self.variables.len()
            ))),
            None => Ok(()),
        }
    }

    /// Checks that `state` assigns an in-domain value to every variable.
    ///
    /// Heuristic evaluation assumes this and does not check it again.
    pub fn check_state(&self, state: &ExplicitState) -> Result<()> {
        if state.values().len() != self.variables.len() {
            return Err(PdbError::InvalidState(format!(
                "state has {} values, problem has {} variables",
                state.values().len(),
                self.variables.len()
            )));
        }
        match self
            .variables
            .iter()
            .zip(state.values())
            .find(|(v, &value)| value >= v.domain_size)
        {
            Some((v, value)) => Err(PdbError::InvalidState(format!(
                "value {value} of '{}' is outside domain size {}",
                v.name, v.domain_size
            ))),
            None => Ok(()),
        }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn domain_size(&self, var: usize) -> usize {
        self.variables[var].domain_size
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn explicit_goal(&self) -> &ExplicitCondition {
        &self.explicit_goal
    }

    pub fn symbolic_goal(&self) -> &SymbolicCondition {
        &self.symbolic_goal
    }

    pub fn is_full_observable(&self) -> bool {
        self.full_observable
    }

    /// Returns true if some operator affects a variable of both patterns.
    pub fn has_interfering_operator(&self, a: &Pattern, b: &Pattern) -> bool {
        self.operators.iter().any(|op| {
            let affected = op.affected_variables();
            affected.iter().any(|&v| a.contains(v)) && affected.iter().any(|&v| b.contains(v))
        })
    }
}
