//! Configuration system for PDBForge.
//!
//! Load heuristic configuration from TOML or YAML to control PDB caching,
//! the observability assumption, belief sampling and clique maintenance
//! without code changes. The configuration is a plain value handed to the
//! heuristic at construction; nothing is read from global state.
//!
//! # Examples
//!
//! ```
//! use pdbforge_config::{AggregationMethod, HeuristicConfig};
//!
//! let config = HeuristicConfig::from_toml_str(r#"
//!     cache_pdbs = true
//!     assume_full_observability = true
//!     aggregation = "average"
//!     sample_size = 4
//!     random_seed = 42
//! "#).unwrap();
//!
//! assert!(config.cache_pdbs);
//! assert_eq!(config.aggregation, AggregationMethod::Average);
//! assert_eq!(config.random_seed, Some(42));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use pdbforge_config::HeuristicConfig;
//!
//! let config = HeuristicConfig::load("heuristic.toml").unwrap_or_default();
//! assert_eq!(config.sample_size, 10);
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

const DEFAULT_SAMPLE_SIZE: usize = 10;

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

/// Canonical PDB heuristic configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HeuristicConfig {
    /// Reuse temporary PDBs when their pattern is promoted.
    #[serde(default)]
    pub cache_pdbs: bool,

    /// Build explicit-state PDBs even for partially observable problems.
    #[serde(default)]
    pub assume_full_observability: bool,

    /// Active pattern-search mode.
    #[serde(default)]
    pub pattern_search: PatternSearchMode,

    /// How per-world values of a sampled belief are combined.
    #[serde(default)]
    pub aggregation: AggregationMethod,

    /// Number of worlds drawn from a belief.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Seed for the belief sampler.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Maximal-clique maintenance strategy.
    #[serde(default)]
    pub clique_strategy: CliqueStrategy,

    /// Build the initial pattern collection's PDBs in parallel.
    #[serde(default)]
    pub parallel_construction: bool,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            cache_pdbs: false,
            assume_full_observability: false,
            pattern_search: PatternSearchMode::default(),
            aggregation: AggregationMethod::default(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            random_seed: None,
            clique_strategy: CliqueStrategy::default(),
            parallel_construction: false,
        }
    }
}

impl HeuristicConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_size == 0 {
            return Err(ConfigError::Invalid(
                "sample_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_cache_pdbs(mut self, cache: bool) -> Self {
        self.cache_pdbs = cache;
        self
    }

    pub fn with_full_observability_assumed(mut self, assume: bool) -> Self {
        self.assume_full_observability = assume;
        self
    }

    pub fn with_pattern_search(mut self, mode: PatternSearchMode) -> Self {
        self.pattern_search = mode;
        self
    }

    pub fn with_aggregation(mut self, method: AggregationMethod) -> Self {
        self.aggregation = method;
        self
    }

    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_clique_strategy(mut self, strategy: CliqueStrategy) -> Self {
        self.clique_strategy = strategy;
        self
    }

    pub fn with_parallel_construction(mut self, parallel: bool) -> Self {
        self.parallel_construction = parallel;
        self
    }

    /// Returns true if PDBs for a problem with the given observability
    /// should use the explicit-state representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdbforge_config::{HeuristicConfig, PatternSearchMode};
    ///
    /// let config = HeuristicConfig::new();
    /// assert!(config.builds_explicit_pdbs(true));
    /// assert!(!config.builds_explicit_pdbs(false));
    ///
    /// let fo = config.with_pattern_search(PatternSearchMode::FullObservable);
    /// assert!(fo.builds_explicit_pdbs(false));
    /// ```
    pub fn builds_explicit_pdbs(&self, problem_full_observable: bool) -> bool {
        problem_full_observable
            || self.assume_full_observability
            || self.pattern_search == PatternSearchMode::FullObservable
    }
}

/// Pattern-search mode of the surrounding pattern-selection policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSearchMode {
    /// No pattern search; the collection is fixed.
    #[default]
    None,

    /// Pattern search evaluated on fully observable abstractions.
    FullObservable,

    /// Pattern search evaluated on belief-state abstractions.
    PartiallyObservable,
}

/// Aggregation of per-world heuristic values over a belief sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMethod {
    /// Sum of the sampled values.
    Add,

    /// Arithmetic mean of the sampled values.
    Average,

    /// Maximum of the sampled values.
    #[default]
    Max,
}

impl fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationMethod::Add => write!(f, "add"),
            AggregationMethod::Average => write!(f, "average"),
            AggregationMethod::Max => write!(f, "max"),
        }
    }
}

/// How the maximal-clique set is maintained when the graph grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CliqueStrategy {
    /// Re-enumerate all maximal cliques from scratch.
    Recompute,

    /// Update the previous maximal cliques with the new node.
    #[default]
    Incremental,
}
