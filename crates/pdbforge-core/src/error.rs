//! Error types for PDBForge

use thiserror::Error;

use crate::pattern::Pattern;
use crate::problem::ConditionKind;

/// Main error type for PDBForge operations
#[derive(Debug, Error)]
pub enum PdbError {
    /// The selected PDB representation cannot express the goal condition
    #[error("Unsupported: {variant} pattern database cannot be built against a {goal} goal condition")]
    Unsupported {
        variant: &'static str,
        goal: ConditionKind,
    },

    /// Pattern refers to variables the problem does not define
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Problem definition is inconsistent
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// State does not assign an in-domain value to every variable
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Heuristic configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Abstract state space does not fit in memory addressing
    #[error("Pattern {pattern} is too large: {states} abstract states")]
    TooLarge { pattern: Pattern, states: u128 },
}

/// Result type alias for PDBForge operations
pub type Result<T> = std::result::Result<T, PdbError>;
