//! Monte Carlo evaluation of reshuffle strategies.
//!
//! # Overview
//!
//! For every ordered pair of configured strategies the harness plays a large
//! number of independent games and aggregates:
//! 1. Wins for each seat and ties (games cut off by the round limit)
//! 2. The mean rank of the face-down cards each seat lost in wars
//! 3. Total comparisons played
//!
//! Pairings share nothing but the read-only configuration, so they run in
//! parallel, each with its own seeded generator.
//!
//! # Example
//!
//! ```
//! use war_sim::sim::{SimulationConfig, Simulator};
//!
//! let config = SimulationConfig::default()
//!     .with_games(10)
//!     .with_strategies(vec![1, 2])
//!     .with_seed(3);
//! let report = Simulator::new(config).unwrap().run().unwrap();
//!
//! // Header plus one line per pairing.
//! assert_eq!(report.to_string().lines().count(), 5);
//! ```

pub mod config;
pub mod harness;
pub mod report;

pub use config::{ConfigError, SimulationConfig, DEFAULT_GAME_COUNT};
pub use harness::{pairing_seed, simulate_strategy, SimulationError, Simulator};
pub use report::{PairingTally, Report, Results};
