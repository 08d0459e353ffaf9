//! PDBForge Core - Core types for pattern database heuristics
//!
//! This crate provides the fundamental abstractions for PDBForge:
//! - Patterns identifying one abstraction axis each
//! - The planning problem representation (variables, operators, goals)
//! - Explicit states and belief states consumed by heuristics
//! - Heuristic value conventions

pub mod error;
pub mod pattern;
pub mod problem;
pub mod state;
pub mod value;

pub use error::{PdbError, Result};
pub use pattern::Pattern;
pub use problem::{
    Condition, ConditionKind, ExplicitCondition, Fact, Operator, Problem, SymbolicCondition,
    Variable,
};
pub use state::{BeliefState, ExplicitState, State};
pub use value::{is_infinite, HeuristicValue, INFINITE_HEURISTIC};
