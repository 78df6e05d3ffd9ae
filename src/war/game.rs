//! A single game of War, from the deal to a winner or the round limit.

use rand::Rng;

use super::card::{self, DECK_SIZE};
use super::engine::{play_hand, GameResult, PlayerId};
use super::player::{reshuffle_event, Player};
use super::strategy::Strategy;

/// Rounds after which a game is abandoned as a no-decision.
///
/// Some strategy pairings can cycle forever; this bounds every game.
pub const MAX_ROUNDS: usize = 100_000;

/// Deal a freshly shuffled deck into two 26-card hands.
pub fn make_players<R: Rng + ?Sized>(s1: Strategy, s2: Strategy, rng: &mut R) -> (Player, Player) {
    let mut deck = card::make_deck();
    card::shuffle(&mut deck, rng);
    let (first, second) = deck.split_at(DECK_SIZE / 2);
    let p1 = Player::new(first.iter().copied(), s1);
    let p2 = Player::new(second.iter().copied(), s2);
    (p1, p2)
}

/// Play until one player owns every card or `max_rounds` rounds have passed.
///
/// # Panics
/// Panics if the two players do not own exactly [`DECK_SIZE`] cards between
/// them at the start of any round.
pub fn simulate<R: Rng + ?Sized>(
    p1: &mut Player,
    p2: &mut Player,
    max_rounds: usize,
    rng: &mut R,
) -> GameResult {
    let mut result = GameResult::new();

    for round in 0..max_rounds {
        let (size1, size2) = (p1.total(), p2.total());

        if size1 == 0 {
            result.winner = Some(PlayerId::Two);
            break;
        }
        if size2 == 0 {
            result.winner = Some(PlayerId::One);
            break;
        }

        assert_eq!(
            size1 + size2,
            DECK_SIZE,
            "card count violated in round {}: p1 owns {}, p2 owns {}",
            round,
            size1,
            size2
        );

        reshuffle_event(p1, p2, 1, rng);

        let (Some(c1), Some(c2)) = (p1.draw(), p2.draw()) else {
            panic!(
                "player with cards has an empty hand after reshuffle: p1 hand={} pile={}, p2 hand={} pile={}",
                p1.hand_size(),
                p1.pile_size(),
                p2.hand_size(),
                p2.pile_size()
            );
        };

        play_hand(c1, c2, p1, p2, &mut result, rng);
    }

    result
}

/// Deal and play one complete game between two strategies.
pub fn play_game<R: Rng + ?Sized>(s1: Strategy, s2: Strategy, max_rounds: usize, rng: &mut R) -> GameResult {
    let (mut p1, mut p2) = make_players(s1, s2, rng);
    simulate(&mut p1, &mut p2, max_rounds, rng)
}
