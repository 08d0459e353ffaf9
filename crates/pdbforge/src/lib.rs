//! PDBForge - Canonical pattern database heuristics in Rust
//!
//! Build a [`CanonicalPdbHeuristic`] from a problem and a pattern
//! collection, then evaluate explicit states or beliefs.
//!
//! # Example
//!
//! ```rust
//! use pdbforge::prelude::*;
//!
//! let problem = Problem::new(
//!     vec![Variable::boolean("a"), Variable::boolean("b")],
//!     vec![
//!         Operator::deterministic("set-a", [], [Fact::new(0, 1)]),
//!         Operator::deterministic("set-b", [], [Fact::new(1, 1)]),
//!     ],
//!     ExplicitCondition::new([Fact::new(0, 1), Fact::new(1, 1)]),
//! )
//! .unwrap();
//!
//! let mut heuristic = canonical_heuristic(problem, [Pattern::new([0]), Pattern::new([1])]).unwrap();
//! assert_eq!(heuristic.heuristic(&ExplicitState::new([0, 1]).into()), 1.0);
//! ```

// Problem model and states
pub use pdbforge_core::{
    is_infinite, BeliefState, Condition, ConditionKind, ExplicitCondition, ExplicitState, Fact,
    HeuristicValue, Operator, Pattern, PdbError, Problem, Result, State, SymbolicCondition,
    Variable, INFINITE_HEURISTIC,
};

// Configuration
pub use pdbforge_config::{
    AggregationMethod, CliqueStrategy, ConfigError, HeuristicConfig, PatternSearchMode,
};

// Heuristics
pub use pdbforge_heuristic::{
    num_abstract_states, CanonicalPdbHeuristic, Compatibility, CompatibilityGraph,
    ExplicitCompatibility, Heuristic, OperatorIndependence, PatternDatabase, PdbVariant,
};

pub use pdbforge_heuristic::{aggregation, compatibility, pdb};

mod builder;
pub use builder::{canonical_heuristic, canonical_heuristic_with_config, CONFIG_FILE};

pub mod prelude {
    pub use super::{canonical_heuristic, canonical_heuristic_with_config};
    pub use super::{
        BeliefState, Condition, ExplicitCondition, ExplicitState, Fact, HeuristicValue, Operator,
        Pattern, Problem, State, SymbolicCondition, Variable,
    };
    pub use super::{AggregationMethod, CliqueStrategy, HeuristicConfig};
    pub use super::{CanonicalPdbHeuristic, Heuristic};
}
