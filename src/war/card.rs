//! Card representation for War.
//!
//! War only cares about rank, so a card is just its rank in `2..=14`
//! (Ace high). Suits are not modeled.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Lowest rank in the deck (the deuce).
pub const MIN_RANK: u8 = 2;

/// Highest rank in the deck (the Ace).
pub const MAX_RANK: u8 = 14;

/// Lowest face card rank (Jack).
pub const FACE_CARD_RANK: u8 = 11;

/// Number of distinct ranks.
pub const NUM_RANKS: usize = (MAX_RANK - MIN_RANK + 1) as usize;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Rank characters for display, indexed by `rank - MIN_RANK`.
const RANK_CHARS: [char; NUM_RANKS] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// A single playing card, identified only by rank.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(u8);

impl Card {
    /// Create a card of the given rank (2-14).
    ///
    /// Out-of-range ranks are representable so that [`Player`](super::Player)
    /// validation can catch them; use [`Card::is_valid`] to check.
    #[inline]
    pub const fn new(rank: u8) -> Self {
        Self(rank)
    }

    /// Get the card's rank (2-14, Ace = 14).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.0
    }

    /// Whether the rank lies in `2..=14`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (MIN_RANK..=MAX_RANK).contains(&self.0)
    }

    /// Rank 14.
    #[inline]
    pub fn is_ace(&self) -> bool {
        self.0 == MAX_RANK
    }

    /// Jack, Queen, King or Ace.
    #[inline]
    pub fn is_face(&self) -> bool {
        self.0 >= FACE_CARD_RANK
    }
}

impl From<u8> for Card {
    fn from(rank: u8) -> Self {
        Self::new(rank)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", RANK_CHARS[(self.0 - MIN_RANK) as usize])
        } else {
            write!(f, "?{}", self.0)
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Build the canonical, unshuffled 52-card deck: four of each rank.
pub fn make_deck() -> [Card; DECK_SIZE] {
    let mut deck = [Card::new(MIN_RANK); DECK_SIZE];
    for (i, card) in deck.iter_mut().enumerate() {
        *card = Card::new(MIN_RANK + (i % NUM_RANKS) as u8);
    }
    deck
}

/// Uniformly permute `cards` in place using the supplied generator.
#[inline]
pub fn shuffle<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    cards.shuffle(rng);
}

/// Mean rank of a collection of cards, `None` when empty.
pub fn mean_rank<'a, I>(cards: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Card>,
{
    let (sum, count) = cards
        .into_iter()
        .fold((0u64, 0usize), |(s, n), c| (s + c.rank() as u64, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}
