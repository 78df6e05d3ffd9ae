//! A War player: a draw queue, a pile of won cards, and a fixed strategy.

use rand::Rng;
use std::collections::VecDeque;

use super::card::{self, Card, DECK_SIZE};
use super::strategy::Strategy;

/// One side of a War game.
///
/// Cards live in exactly one of two places:
/// - `hand`: FIFO draw queue, drawn from the front.
/// - `pile`: cards won but not yet playable until combined into the hand.
#[derive(Debug, Clone)]
pub struct Player {
    hand: VecDeque<Card>,
    pile: Vec<Card>,
    strategy: Strategy,
}

impl Player {
    /// Create a player holding `hand` and an empty pile.
    ///
    /// # Panics
    /// Panics if any card has a rank outside `2..=14`.
    pub fn new<I>(hand: I, strategy: Strategy) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        let player = Self {
            hand: hand.into_iter().collect(),
            pile: Vec::with_capacity(DECK_SIZE),
            strategy,
        };
        assert!(
            player.is_valid(),
            "player constructed with out-of-range card: hand={:?}",
            player.hand
        );
        player
    }

    /// Create a player from raw ranks. Mostly useful for scripted scenarios.
    pub fn from_ranks(hand: &[u8], strategy: Strategy) -> Self {
        Self::new(hand.iter().copied().map(Card::new), strategy)
    }

    /// Cards available to draw.
    #[inline]
    pub fn hand(&self) -> &VecDeque<Card> {
        &self.hand
    }

    /// Cards won but not yet combined into the hand.
    #[inline]
    pub fn pile(&self) -> &[Card] {
        &self.pile
    }

    /// Cards in the hand.
    #[inline]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    /// Cards in the pile.
    #[inline]
    pub fn pile_size(&self) -> usize {
        self.pile.len()
    }

    /// Total cards owned (hand + pile).
    #[inline]
    pub fn total(&self) -> usize {
        self.hand.len() + self.pile.len()
    }

    /// The strategy this player uses for the whole game.
    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Draw the front card of the hand, if any.
    #[inline]
    pub fn draw(&mut self) -> Option<Card> {
        self.hand.pop_front()
    }

    /// Put a won card on the pile.
    #[inline]
    pub fn take(&mut self, card: Card) {
        self.pile.push(card);
    }

    /// Move the whole pile to the back of the hand.
    pub fn combine_pile(&mut self) {
        self.hand.extend(self.pile.drain(..));
    }

    /// Uniformly permute the hand.
    pub fn shuffle_hand<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        card::shuffle(self.hand.make_contiguous(), rng);
    }

    /// Let the bound strategy reorganize hand and pile before a draw of `needed` cards.
    pub fn apply_strategy<R: Rng + ?Sized>(&mut self, needed: usize, rng: &mut R) {
        let strategy = self.strategy;
        strategy.apply(self, needed, rng);
    }

    /// Every owned card has rank in `2..=14`.
    pub fn is_valid(&self) -> bool {
        self.hand.iter().chain(self.pile.iter()).all(Card::is_valid)
    }

    /// Test helper: build a player with both a hand and a pile.
    #[cfg(test)]
    pub(crate) fn with_pile(hand: &[u8], pile: &[u8], strategy: Strategy) -> Self {
        let mut player = Self::from_ranks(hand, strategy);
        for &rank in pile {
            player.take(Card::new(rank));
        }
        assert!(player.is_valid());
        player
    }
}

/// Give each player the opportunity to reorganize before a draw of `needed` cards.
///
/// Strategies only fire when at least one hand is short; both players then
/// get a turn, so a reshuffle event is shared by the table.
pub fn reshuffle_event<R: Rng + ?Sized>(p1: &mut Player, p2: &mut Player, needed: usize, rng: &mut R) {
    if p1.hand_size() < needed || p2.hand_size() < needed {
        p1.apply_strategy(needed, rng);
        p2.apply_strategy(needed, rng);
    }
    debug_assert!(p1.hand_size() >= needed || p1.pile_size() == 0);
    debug_assert!(p2.hand_size() >= needed || p2.pile_size() == 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_draw_is_fifo() {
        let mut p = Player::from_ranks(&[3, 9, 14], Strategy::CombineOnly);
        assert_eq!(p.draw(), Some(Card::new(3)));
        assert_eq!(p.draw(), Some(Card::new(9)));
        assert_eq!(p.draw(), Some(Card::new(14)));
        assert_eq!(p.draw(), None);
    }

    #[test]
    fn test_take_goes_to_pile() {
        let mut p = Player::from_ranks(&[5], Strategy::CombineOnly);
        p.take(Card::new(7));
        p.take(Card::new(8));
        assert_eq!(p.hand_size(), 1);
        assert_eq!(p.pile_size(), 2);
        assert_eq!(p.total(), 3);
    }

    #[test]
    fn test_combine_appends_pile_to_hand() {
        let mut p = Player::with_pile(&[5], &[7, 8], Strategy::CombineOnly);
        p.combine_pile();
        assert_eq!(p.pile_size(), 0);
        let hand: Vec<u8> = p.hand().iter().map(Card::rank).collect();
        assert_eq!(hand, vec![5, 7, 8]);
    }

    #[test]
    fn test_shuffle_hand_preserves_cards() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = Player::from_ranks(&[2, 3, 4, 5, 6, 7, 8, 9, 10], Strategy::CombineOnly);
        p.shuffle_hand(&mut rng);
        let mut hand: Vec<u8> = p.hand().iter().map(Card::rank).collect();
        hand.sort();
        assert_eq!(hand, vec![2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    #[should_panic(expected = "out-of-range")]
    fn test_invalid_card_panics() {
        Player::from_ranks(&[5, 15], Strategy::CombineOnly);
    }

    #[test]
    fn test_reshuffle_event_skips_when_hands_full() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut p1 = Player::with_pile(&[5, 6], &[9], Strategy::AlwaysShuffle);
        let mut p2 = Player::with_pile(&[7], &[10], Strategy::AlwaysShuffle);
        reshuffle_event(&mut p1, &mut p2, 1, &mut rng);
        assert_eq!(p1.pile_size(), 1);
        assert_eq!(p2.pile_size(), 1);
    }

    #[test]
    fn test_reshuffle_event_fires_for_both() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut p1 = Player::with_pile(&[], &[9, 4], Strategy::CombineOnly);
        let mut p2 = Player::with_pile(&[7], &[10], Strategy::AlwaysShuffle);
        reshuffle_event(&mut p1, &mut p2, 1, &mut rng);
        assert_eq!(p1.hand_size(), 2);
        assert_eq!(p2.hand_size(), 2);
        assert_eq!(p2.pile_size(), 0);
    }
}
