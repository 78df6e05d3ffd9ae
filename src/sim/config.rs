//! Configuration for a Monte Carlo run.
//!
//! Controls how many games each pairing plays, which strategies take part,
//! the per-game round limit, seeding, and the worker pool size. Configs can be
//! built in code or loaded from JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::war::{Strategy, MAX_ROUNDS};

/// Games per pairing when none (or zero) are requested.
pub const DEFAULT_GAME_COUNT: usize = 1_000_000;

/// Configuration for the Monte Carlo harness.
///
/// # Example
/// ```
/// use war_sim::sim::SimulationConfig;
///
/// let config = SimulationConfig::default().with_games(100).with_seed(42);
/// assert_eq!(config.num_pairings(), 81);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Games played per ordered pairing.
    ///
    /// Zero is replaced by [`DEFAULT_GAME_COUNT`] when the harness starts.
    pub games: usize,

    /// Strategy ids taking part. Every ordered pair (self-pairs included) is
    /// simulated, outer loop first.
    pub strategies: Vec<usize>,

    /// Rounds after which a game counts as a tie.
    pub max_rounds: usize,

    /// Master seed. Each pairing derives its own generator from it, so a
    /// seeded run is reproducible regardless of thread scheduling. If `None`,
    /// a random master seed is drawn.
    pub seed: Option<u64>,

    /// Worker threads. `None` uses all available cores.
    pub num_threads: Option<usize>,

    /// Show a progress bar while pairings run.
    pub progress: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: DEFAULT_GAME_COUNT,
            strategies: (0..Strategy::COUNT).collect(),
            max_rounds: MAX_ROUNDS,
            seed: None,
            num_threads: None,
            progress: false,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set games per pairing.
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    /// Builder method: restrict the strategies taking part.
    pub fn with_strategies(mut self, ids: Vec<usize>) -> Self {
        self.strategies = ids;
        self
    }

    /// Builder method: set the per-game round limit.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Builder method: set the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: toggle the progress bar.
    pub fn with_progress(mut self, enable: bool) -> Self {
        self.progress = enable;
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Games per pairing after applying the zero-means-default rule.
    pub fn effective_games(&self) -> usize {
        if self.games == 0 {
            DEFAULT_GAME_COUNT
        } else {
            self.games
        }
    }

    /// Resolve the configured strategy ids.
    pub fn resolve_strategies(&self) -> Result<Vec<Strategy>, ConfigError> {
        self.strategies
            .iter()
            .map(|&id| Strategy::from_id(id).ok_or(ConfigError::InvalidStrategy(id)))
            .collect()
    }

    /// Every ordered pairing, in report order.
    pub fn pairings(&self) -> Result<Vec<(Strategy, Strategy)>, ConfigError> {
        let strategies = self.resolve_strategies()?;
        Ok(strategies
            .iter()
            .flat_map(|&a| strategies.iter().map(move |&b| (a, b)))
            .collect())
    }

    /// Number of ordered pairings.
    pub fn num_pairings(&self) -> usize {
        self.strategies.len() * self.strategies.len()
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }
        if let Some(&id) = self.strategies.iter().find(|&&id| id >= Strategy::COUNT) {
            return Err(ConfigError::InvalidStrategy(id));
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::InvalidMaxRounds);
        }
        if self.num_threads == Some(0) {
            return Err(ConfigError::InvalidThreads);
        }
        Ok(())
    }
}

/// Errors that can occur when loading or validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file could not be read.
    IoError(String),
    /// Config file is not valid JSON for this schema.
    ParseError(String),
    /// Strategy id outside the strategy table.
    InvalidStrategy(usize),
    /// Empty strategy list.
    NoStrategies,
    /// Round limit of zero.
    InvalidMaxRounds,
    /// Thread count of zero.
    InvalidThreads,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {}", e),
            Self::ParseError(e) => write!(f, "Parse error: {}", e),
            Self::InvalidStrategy(id) => write!(
                f,
                "Invalid strategy index {} (max allowed {})",
                id,
                Strategy::COUNT - 1
            ),
            Self::NoStrategies => write!(f, "At least one strategy must be selected"),
            Self::InvalidMaxRounds => write!(f, "Round limit must be at least 1"),
            Self::InvalidThreads => write!(f, "Thread count must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
