//! Shared test fixtures for PDBForge crates.
//!
//! Small planning problems whose abstract distances are easy to verify by
//! hand.
//!
//! - [`switches`] - independent switches, every projection additive
//! - [`relay`] - chained switches whose overlapping patterns interfere
//! - [`dice`] - a non-deterministic operator
//! - [`trap`] - a dead end no operator escapes
//! - [`hidden`] - partially observable switches with a disjunctive goal
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! pdbforge-test = { workspace = true }
//! ```

pub mod belief;
pub mod problems;

pub use belief::{all_worlds, belief_of};
pub use problems::{dice, hidden, relay, switches, trap};
