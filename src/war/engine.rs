//! War resolution.
//!
//! A comparison of two face-up cards either resolves immediately or, on a tie,
//! starts a war: each side reveals up to three face-down cards (the dump) and
//! one face-up card (the flip), and the flips are compared recursively. Wars
//! can nest arbitrarily deep; recursion ends because every war draws from
//! finite hands and an empty hand forfeits.
//!
//! ```text
//! Compare ──(c1 != c2)──────────────────────────────► Resolved
//!    │
//!  (tie)
//!    ▼
//!   War ──(a side owns no cards / reveals nothing)──► ForfeitResolved
//!    │
//!  (both reveal a WarHand)
//!    ▼
//! Compare(flip1, flip2) ... ────────────────────────► Resolved
//! ```
//!
//! Cards are never created or destroyed: every card drawn for a comparison
//! ends up on the winner's pile.

use rand::Rng;
use std::fmt;

use super::card::{self, Card};
use super::player::{reshuffle_event, Player};

/// Cards each side commits to a war: three face down plus one flip.
pub const WAR_SIZE: usize = 4;

/// Identifies one of the two seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    /// Player one.
    One,
    /// Player two.
    Two,
}

impl PlayerId {
    /// The opposing seat.
    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::One => write!(f, "P1"),
            PlayerId::Two => write!(f, "P2"),
        }
    }
}

/// Outcome of a single game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameResult {
    /// Winner, or `None` when the round limit was reached.
    pub winner: Option<PlayerId>,
    /// Dump cards player one gave up in lost wars.
    pub p1_war_lost: Vec<Card>,
    /// Dump cards player two gave up in lost wars.
    pub p2_war_lost: Vec<Card>,
    /// Comparisons played, nested war comparisons included.
    pub nhands: usize,
}

impl GameResult {
    /// Empty result: no winner yet, no hands played.
    pub fn new() -> Self {
        Self::default()
    }

    fn record_war_loss(&mut self, loser: PlayerId, dump: &[Card]) {
        match loser {
            PlayerId::One => self.p1_war_lost.extend_from_slice(dump),
            PlayerId::Two => self.p2_war_lost.extend_from_slice(dump),
        }
    }
}

/// The cards one side reveals in a war.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarHand {
    /// Face-down cards, in draw order.
    pub dump: Vec<Card>,
    /// Face-up card compared against the opponent's, absent if nothing was drawn.
    pub flip: Option<Card>,
}

impl WarHand {
    /// Draw up to [`WAR_SIZE`] cards from the player's hand.
    ///
    /// The last card drawn is the flip. A short (but non-empty) hand still
    /// produces a valid war hand with a smaller dump.
    pub fn draw(player: &mut Player) -> Self {
        let mut dump: Vec<Card> = Vec::with_capacity(WAR_SIZE);
        while dump.len() < WAR_SIZE {
            match player.draw() {
                Some(card) => dump.push(card),
                None => break,
            }
        }
        let flip = dump.pop();
        Self { dump, flip }
    }

    /// Every card in this war hand, dump first.
    fn into_cards(self) -> impl Iterator<Item = Card> {
        self.dump.into_iter().chain(self.flip)
    }
}

/// Resolve one comparison between `c1` (player one) and `c2` (player two).
///
/// Both cards must already be out of the players' hands. The winner receives
/// them, plus everything committed to any war the comparison triggers.
pub fn play_hand<R: Rng + ?Sized>(
    c1: Card,
    c2: Card,
    p1: &mut Player,
    p2: &mut Player,
    result: &mut GameResult,
    rng: &mut R,
) -> PlayerId {
    debug_assert!(c1.is_valid() && c2.is_valid());

    result.nhands += 1;

    let winner = if c1 > c2 {
        PlayerId::One
    } else if c1 < c2 {
        PlayerId::Two
    } else {
        war(p1, p2, result, rng)
    };

    // Randomize the order the disputed cards land on the pile.
    let (first, second) = if rng.gen_bool(0.5) { (c2, c1) } else { (c1, c2) };
    let receiver = seat(winner, p1, p2);
    receiver.take(first);
    receiver.take(second);

    winner
}

/// Play out a war after a tie. The caller awards the two tied cards.
fn war<R: Rng + ?Sized>(p1: &mut Player, p2: &mut Player, result: &mut GameResult, rng: &mut R) -> PlayerId {
    // A player whose tied card was their last loses the war outright.
    if p1.total() == 0 {
        return PlayerId::Two;
    }
    if p2.total() == 0 {
        return PlayerId::One;
    }

    reshuffle_event(p1, p2, WAR_SIZE, rng);

    let wh1 = WarHand::draw(p1);
    let Some(flip1) = wh1.flip else {
        return PlayerId::Two;
    };
    let wh2 = WarHand::draw(p2);
    let Some(flip2) = wh2.flip else {
        // Player one already revealed; those cards go back to their owner.
        for card in wh1.into_cards() {
            p1.take(card);
        }
        return PlayerId::One;
    };

    let winner = play_hand(flip1, flip2, p1, p2, result, rng);

    let loser_dump = match winner {
        PlayerId::One => &wh2.dump,
        PlayerId::Two => &wh1.dump,
    };
    result.record_war_loss(winner.other(), loser_dump);

    let mut spoils: Vec<Card> = wh1.dump.iter().chain(wh2.dump.iter()).copied().collect();
    card::shuffle(&mut spoils, rng);
    let receiver = seat(winner, p1, p2);
    for card in spoils {
        receiver.take(card);
    }

    winner
}

#[inline]
fn seat<'a>(id: PlayerId, p1: &'a mut Player, p2: &'a mut Player) -> &'a mut Player {
    match id {
        PlayerId::One => p1,
        PlayerId::Two => p2,
    }
}
