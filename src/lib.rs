//! # War Simulator
//!
//! Monte Carlo evaluation of reshuffle strategies in the card game War.
//!
//! In War nobody makes choices about which card to play, but players do
//! choose *when* to fold their won cards back into the draw pile and whether
//! to shuffle them. This crate measures how much those choices matter.
//!
//! ## Modules
//!
//! - [`war`]: Cards, players, strategies, war resolution and the game loop
//! - [`sim`]: Parallel pairing harness, configuration and reporting
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Simulator (sim::harness)                │
//! │  - Enumerates strategy pairings   - rayon worker pool    │
//! │  - Per-pairing seeded RNG         - Ordered collection   │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              │ one task per pairing
//!                              ▼
//!   ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!   │  play_game   │───►│  play_hand   │───►│   Strategy   │
//!   │ (game loop)  │    │ (war engine) │    │  (reshuffle) │
//!   └──────────────┘    └──────────────┘    └──────────────┘
//!                              │
//!                              ▼
//!                    PairingTally → Results → Report
//! ```

#![warn(missing_docs)]

/// Card game model and rules.
///
/// Everything needed to play a single game of War between two strategies.
pub mod war;

/// Monte Carlo harness.
///
/// Runs and aggregates many games per strategy pairing.
pub mod sim;

// Re-export commonly used types at crate root for convenience
pub use sim::{Report, Results, SimulationConfig, Simulator};
pub use war::{Card, GameResult, Player, PlayerId, Strategy};
