//! Heuristic entry point that hides the configuration wiring.

use std::sync::Arc;

use pdbforge_config::HeuristicConfig;
use pdbforge_core::{Pattern, Problem, Result};
use pdbforge_heuristic::CanonicalPdbHeuristic;
use tracing::warn;

/// Configuration file read by [`canonical_heuristic`].
pub const CONFIG_FILE: &str = "heuristic.toml";

/// Builds the canonical heuristic with the configuration in
/// [`CONFIG_FILE`], or the defaults if the file is missing.
///
/// A file that exists but does not parse is reported and ignored.
pub fn canonical_heuristic(
    problem: Problem,
    patterns: impl IntoIterator<Item = Pattern>,
) -> Result<CanonicalPdbHeuristic> {
    let config = match HeuristicConfig::load(CONFIG_FILE) {
        Ok(config) => config,
        Err(pdbforge_config::ConfigError::Io(_)) => HeuristicConfig::default(),
        Err(err) => {
            warn!(event = "config_ignored", file = CONFIG_FILE, error = %err);
            HeuristicConfig::default()
        }
    };
    canonical_heuristic_with_config(problem, patterns, config)
}

/// Builds the canonical heuristic with an explicit configuration.
pub fn canonical_heuristic_with_config(
    problem: Problem,
    patterns: impl IntoIterator<Item = Pattern>,
    config: HeuristicConfig,
) -> Result<CanonicalPdbHeuristic> {
    CanonicalPdbHeuristic::new(Arc::new(problem), patterns, config)
}
