//! PDBForge Heuristic Engine
//!
//! This crate provides pattern database heuristics for planning under
//! uncertainty:
//! - Pattern databases over explicit states and over belief states
//! - The compatibility graph and its maximal cliques
//! - The canonical PDB heuristic combining both
//! - Aggregation of sampled belief values
//! - Mutation primitives for pattern-selection policies

pub mod aggregation;
pub mod canonical;
pub mod compatibility;
pub mod heuristic;
pub mod pdb;

pub use aggregation::aggregate;
pub use canonical::CanonicalPdbHeuristic;
pub use compatibility::{
    Clique, Compatibility, CompatibilityGraph, ExplicitCompatibility, NodeId,
    OperatorIndependence,
};
pub use heuristic::Heuristic;
pub use pdb::{
    num_abstract_states, BeliefStatePdb, ExplicitStatePdb, PatternDatabase, PdbVariant,
};
