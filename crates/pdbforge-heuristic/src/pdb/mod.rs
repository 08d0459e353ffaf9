//! Pattern databases.
//!
//! A pattern database (PDB) stores the exact goal distance of every
//! abstract state of one projection. Two representations share the
//! contract:
//!
//! - [`ExplicitStatePdb`]: points of the projected space, explicit goal
//! - [`BeliefStatePdb`]: sets of abstract states, symbolic goal
//!
//! [`PatternDatabase`] is the closed union of both. PDBs are immutable
//! after construction.

mod belief;
mod explicit;
mod projection;

use std::fmt;
use std::time::Instant;

use pdbforge_config::HeuristicConfig;
use pdbforge_core::{
    Condition, ConditionKind, ExplicitState, HeuristicValue, Pattern, PdbError, Problem, Result,
    State,
};
use tracing::debug;

pub use belief::BeliefStatePdb;
pub use explicit::ExplicitStatePdb;

/// Number of abstract states of `pattern`'s projection.
///
/// Pure function of the problem and the variable set; usable before any
/// database is built. Saturates at `usize::MAX`.
///
/// # Example
///
/// ```
/// use pdbforge_core::{ExplicitCondition, Pattern, Problem, Variable};
/// use pdbforge_heuristic::pdb::num_abstract_states;
///
/// let problem = Problem::new(
///     vec![Variable::new("x", 3), Variable::boolean("y")],
///     vec![],
///     ExplicitCondition::trivial(),
/// )
/// .unwrap();
///
/// assert_eq!(num_abstract_states(&problem, &Pattern::new([0, 1])), 6);
/// assert_eq!(num_abstract_states(&problem, &Pattern::empty()), 1);
/// ```
pub fn num_abstract_states(problem: &Problem, pattern: &Pattern) -> usize {
    usize::try_from(projection::exact_count(problem, pattern)).unwrap_or(usize::MAX)
}

/// Which representation a PDB uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PdbVariant {
    ExplicitState,
    BeliefState,
}

impl PdbVariant {
    /// Selects the representation for a problem under `config`.
    pub fn select(problem: &Problem, config: &HeuristicConfig) -> Self {
        if config.builds_explicit_pdbs(problem.is_full_observable()) {
            PdbVariant::ExplicitState
        } else {
            PdbVariant::BeliefState
        }
    }

    /// The goal this representation is built against by default.
    pub fn default_goal(self, problem: &Problem) -> Condition {
        match self {
            PdbVariant::ExplicitState => Condition::Explicit(problem.explicit_goal().clone()),
            PdbVariant::BeliefState => Condition::Symbolic(problem.symbolic_goal().clone()),
        }
    }

    /// Kind of goal condition this representation is built against.
    pub fn goal_kind(self) -> ConditionKind {
        match self {
            PdbVariant::ExplicitState => ConditionKind::Explicit,
            PdbVariant::BeliefState => ConditionKind::Symbolic,
        }
    }

    /// Fails with [`PdbError::Unsupported`] unless `goal` has [`Self::goal_kind`].
    pub fn check_goal(self, goal: &Condition) -> Result<()> {
        if goal.kind() == self.goal_kind() {
            Ok(())
        } else {
            Err(PdbError::Unsupported {
                variant: self.name(),
                goal: goal.kind(),
            })
        }
    }

    fn name(self) -> &'static str {
        match self {
            PdbVariant::ExplicitState => "explicit-state",
            PdbVariant::BeliefState => "belief-state",
        }
    }
}

impl fmt::Display for PdbVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pattern database in either representation.
#[derive(Debug, Clone)]
pub enum PatternDatabase {
    Explicit(ExplicitStatePdb),
    Belief(BeliefStatePdb),
}

impl PatternDatabase {
    /// Builds a PDB of the requested representation.
    ///
    /// # Errors
    ///
    /// [`PdbError::Unsupported`] if `goal` is not the condition kind the
    /// representation is built against; pattern and size errors from the
    /// projection.
    pub fn build(
        problem: &Problem,
        pattern: &Pattern,
        variant: PdbVariant,
        goal: &Condition,
    ) -> Result<Self> {
        let start = Instant::now();
        let pdb = match (variant, goal) {
            (PdbVariant::ExplicitState, Condition::Explicit(goal)) => {
                PatternDatabase::Explicit(ExplicitStatePdb::new(problem, pattern, goal)?)
            }
            (PdbVariant::BeliefState, Condition::Symbolic(goal)) => {
                PatternDatabase::Belief(BeliefStatePdb::new(problem, pattern, goal)?)
            }
            (variant, goal) => {
                return Err(PdbError::Unsupported {
                    variant: variant.name(),
                    goal: goal.kind(),
                })
            }
        };
        debug!(
            event = "pdb_built",
            pattern = %pattern,
            variant = %variant,
            abstract_states = pdb.num_abstract_states(),
            duration_us = start.elapsed().as_micros() as u64,
        );
        Ok(pdb)
    }

    /// Builds a PDB with the representation and goal `config` selects.
    pub fn for_config(
        problem: &Problem,
        pattern: &Pattern,
        config: &HeuristicConfig,
    ) -> Result<Self> {
        let variant = PdbVariant::select(problem, config);
        Self::build(problem, pattern, variant, &variant.default_goal(problem))
    }

    pub fn variant(&self) -> PdbVariant {
        match self {
            PatternDatabase::Explicit(_) => PdbVariant::ExplicitState,
            PatternDatabase::Belief(_) => PdbVariant::BeliefState,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        match self {
            PatternDatabase::Explicit(pdb) => pdb.pattern(),
            PatternDatabase::Belief(pdb) => pdb.pattern(),
        }
    }

    pub fn num_abstract_states(&self) -> usize {
        match self {
            PatternDatabase::Explicit(pdb) => pdb.num_abstract_states(),
            PatternDatabase::Belief(pdb) => pdb.num_abstract_states(),
        }
    }

    /// Goal distance of a single world's abstraction.
    #[inline]
    pub fn state_heuristic(&self, state: &ExplicitState) -> HeuristicValue {
        match self {
            PatternDatabase::Explicit(pdb) => pdb.state_heuristic(state),
            PatternDatabase::Belief(pdb) => pdb.state_heuristic(state),
        }
    }

    /// Goal distance of the state's abstraction, `+inf` if unsolvable.
    #[inline]
    pub fn heuristic(&self, state: &State) -> HeuristicValue {
        match (self, state) {
            (PatternDatabase::Explicit(pdb), State::Explicit(s)) => pdb.state_heuristic(s),
            (PatternDatabase::Explicit(pdb), State::Belief(b)) => pdb.belief_heuristic(b),
            (PatternDatabase::Belief(pdb), State::Explicit(s)) => pdb.state_heuristic(s),
            (PatternDatabase::Belief(pdb), State::Belief(b)) => pdb.belief_heuristic(b),
        }
    }
}

#[cfg(test)]
mod tests;
