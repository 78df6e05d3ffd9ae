//! The card game War.
//!
//! # Rules
//!
//! - A 52-card deck (ranks 2 through Ace, suits ignored) is shuffled and
//!   split evenly between two players.
//! - Each round both players flip the front card of their hand; the higher
//!   rank takes both cards onto its pile.
//! - Equal ranks start a war: each player lays down up to three face-down
//!   cards and one face-up card, and the face-up cards decide the war. Wars
//!   can nest.
//! - Won cards go to a pile that only becomes playable once the player's
//!   strategy combines it into the hand, optionally shuffling.
//! - A player who runs out of cards loses.
//!
//! # Usage
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use war_sim::war::{play_game, Strategy, MAX_ROUNDS};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let result = play_game(Strategy::CombineOnly, Strategy::AlwaysShuffle, MAX_ROUNDS, &mut rng);
//! assert!(result.nhands > 0);
//! ```

pub mod card;
pub mod engine;
pub mod game;
pub mod player;
pub mod strategy;

pub use card::{make_deck, shuffle, Card, DECK_SIZE, MAX_RANK, MIN_RANK};
pub use engine::{play_hand, GameResult, PlayerId, WarHand, WAR_SIZE};
pub use game::{make_players, play_game, simulate, MAX_ROUNDS};
pub use player::Player;
pub use strategy::{Enrichment, Strategy};
