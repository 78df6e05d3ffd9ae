//! Reshuffle strategies.
//!
//! A strategy decides, right before a draw that needs more cards than the hand
//! holds, whether to combine the pile into the hand and whether to shuffle the
//! result. Strategies are stateless: the decision depends only on the player's
//! current hand and pile.
//!
//! ## Strategy table
//!
//! | id | strategy                                  |
//! |----|-------------------------------------------|
//! | 0  | combine and shuffle                       |
//! | 1  | always shuffle                            |
//! | 2  | combine only                              |
//! | 3  | mean rank, shuffle when enriched          |
//! | 4  | mean rank, shuffle when not enriched      |
//! | 5  | aces, shuffle when enriched               |
//! | 6  | aces, shuffle when not enriched           |
//! | 7  | face cards, shuffle when enriched         |
//! | 8  | face cards, shuffle when not enriched     |

use rand::Rng;
use std::fmt;

use super::card::{self, Card};
use super::player::Player;

/// Metric used to judge whether a hand is "enriched" relative to the pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Enrichment {
    /// Hand mean rank exceeds pile mean rank.
    MeanRank,
    /// Hand holds a larger proportion of Aces.
    Aces,
    /// Hand holds a larger proportion of face cards (J, Q, K, A).
    FaceCards,
}

impl Enrichment {
    /// Whether the player's hand is enriched relative to its pile.
    ///
    /// An empty side has mean rank 0. The proportion metrics have no value
    /// for an empty side, so an empty hand or pile is never enriched under them.
    pub fn enriched(&self, player: &Player) -> bool {
        match self {
            Enrichment::MeanRank => {
                let hand = card::mean_rank(player.hand()).unwrap_or(0.0);
                let pile = card::mean_rank(player.pile()).unwrap_or(0.0);
                hand > pile
            }
            Enrichment::Aces => richer(player, Card::is_ace),
            Enrichment::FaceCards => richer(player, Card::is_face),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Enrichment::MeanRank => "mean rank",
            Enrichment::Aces => "aces",
            Enrichment::FaceCards => "face cards",
        }
    }
}

fn richer(player: &Player, pred: fn(&Card) -> bool) -> bool {
    match (proportion(player.hand(), pred), proportion(player.pile(), pred)) {
        (Some(h), Some(p)) => h > p,
        _ => false,
    }
}

/// Fraction of `cards` matching `pred`, `None` when empty.
fn proportion<'a, I, F>(cards: I, pred: F) -> Option<f64>
where
    I: IntoIterator<Item = &'a Card>,
    F: Fn(&Card) -> bool,
{
    let (hits, count) = cards
        .into_iter()
        .fold((0usize, 0usize), |(h, n), c| (h + pred(c) as usize, n + 1));
    if count == 0 {
        None
    } else {
        Some(hits as f64 / count as f64)
    }
}

/// A reshuffle policy bound to a player for a whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Combine when short, then always shuffle the hand.
    CombineAndShuffle,
    /// Combine and shuffle every time the strategy is consulted.
    AlwaysShuffle,
    /// Combine when short, never shuffle.
    CombineOnly,
    /// Combine when short; additionally combine and shuffle when the
    /// enrichment test agrees with `shuffle_when_enriched`.
    Enriched {
        /// How hand and pile are compared.
        metric: Enrichment,
        /// Shuffle when the hand is enriched (`true`) or when it is not (`false`).
        shuffle_when_enriched: bool,
    },
}

impl Strategy {
    /// Every defined strategy, indexed by id.
    pub const ALL: [Strategy; 9] = [
        Strategy::CombineAndShuffle,
        Strategy::AlwaysShuffle,
        Strategy::CombineOnly,
        Strategy::Enriched { metric: Enrichment::MeanRank, shuffle_when_enriched: true },
        Strategy::Enriched { metric: Enrichment::MeanRank, shuffle_when_enriched: false },
        Strategy::Enriched { metric: Enrichment::Aces, shuffle_when_enriched: true },
        Strategy::Enriched { metric: Enrichment::Aces, shuffle_when_enriched: false },
        Strategy::Enriched { metric: Enrichment::FaceCards, shuffle_when_enriched: true },
        Strategy::Enriched { metric: Enrichment::FaceCards, shuffle_when_enriched: false },
    ];

    /// Number of defined strategies.
    pub const COUNT: usize = Self::ALL.len();

    /// Look up a strategy by its table id.
    pub fn from_id(id: usize) -> Option<Strategy> {
        Self::ALL.get(id).copied()
    }

    /// Stable table id of this strategy.
    pub fn id(&self) -> usize {
        match self {
            Strategy::CombineAndShuffle => 0,
            Strategy::AlwaysShuffle => 1,
            Strategy::CombineOnly => 2,
            Strategy::Enriched { metric, shuffle_when_enriched } => {
                let base = match metric {
                    Enrichment::MeanRank => 3,
                    Enrichment::Aces => 5,
                    Enrichment::FaceCards => 7,
                };
                if *shuffle_when_enriched {
                    base
                } else {
                    base + 1
                }
            }
        }
    }

    /// Reorganize `player` before a draw of `needed` cards.
    pub fn apply<R: Rng + ?Sized>(&self, player: &mut Player, needed: usize, rng: &mut R) {
        match *self {
            Strategy::CombineOnly => combine_if_short(player, needed),
            Strategy::AlwaysShuffle => {
                player.combine_pile();
                player.shuffle_hand(rng);
            }
            Strategy::CombineAndShuffle => {
                combine_if_short(player, needed);
                player.shuffle_hand(rng);
            }
            Strategy::Enriched { metric, shuffle_when_enriched } => {
                let enriched = metric.enriched(player);
                let shuffle = enriched == shuffle_when_enriched;
                let short = player.hand_size() < needed && player.pile_size() > 0;
                if short || shuffle {
                    player.combine_pile();
                    if shuffle {
                        player.shuffle_hand(rng);
                    }
                }
            }
        }
    }
}

fn combine_if_short(player: &mut Player, needed: usize) {
    if player.hand_size() < needed && player.pile_size() > 0 {
        player.combine_pile();
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::CombineAndShuffle => write!(f, "combine and shuffle"),
            Strategy::AlwaysShuffle => write!(f, "always shuffle"),
            Strategy::CombineOnly => write!(f, "combine only"),
            Strategy::Enriched { metric, shuffle_when_enriched: true } => {
                write!(f, "{}, shuffle when enriched", metric.label())
            }
            Strategy::Enriched { metric, shuffle_when_enriched: false } => {
                write!(f, "{}, shuffle when not enriched", metric.label())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ranks(player: &Player) -> (Vec<u8>, Vec<u8>) {
        (
            player.hand().iter().map(Card::rank).collect(),
            player.pile().iter().map(Card::rank).collect(),
        )
    }

    #[test]
    fn test_ids_round_trip_table() {
        for (i, strategy) in Strategy::ALL.iter().enumerate() {
            assert_eq!(strategy.id(), i, "{} has wrong id", strategy);
            assert_eq!(Strategy::from_id(i), Some(*strategy));
        }
        assert_eq!(Strategy::from_id(Strategy::COUNT), None);
    }

    #[test]
    fn test_mean_rank_enrichment() {
        let p = Player::with_pile(&[10, 12], &[2, 2], Strategy::CombineOnly);
        assert!(Enrichment::MeanRank.enriched(&p));

        let p = Player::with_pile(&[2, 2], &[12, 12], Strategy::CombineOnly);
        assert!(!Enrichment::MeanRank.enriched(&p));
    }

    #[test]
    fn test_aces_enrichment() {
        let p = Player::with_pile(&[14, 5], &[7, 8], Strategy::CombineOnly);
        assert!(Enrichment::Aces.enriched(&p));

        let p = Player::with_pile(&[2, 3], &[14, 14], Strategy::CombineOnly);
        assert!(!Enrichment::Aces.enriched(&p));
    }

    #[test]
    fn test_face_card_enrichment() {
        let p = Player::with_pile(&[11, 12, 13], &[2, 3, 4], Strategy::CombineOnly);
        assert!(Enrichment::FaceCards.enriched(&p));

        let p = Player::with_pile(&[2, 3, 4], &[11, 12, 13], Strategy::CombineOnly);
        assert!(!Enrichment::FaceCards.enriched(&p));
    }

    #[test]
    fn test_empty_container_proportions_not_enriched() {
        let no_pile = Player::with_pile(&[14, 14], &[], Strategy::CombineOnly);
        let no_hand = Player::with_pile(&[], &[14, 14], Strategy::CombineOnly);
        for metric in [Enrichment::Aces, Enrichment::FaceCards] {
            assert!(!metric.enriched(&no_pile), "{:?} with empty pile", metric);
            assert!(!metric.enriched(&no_hand), "{:?} with empty hand", metric);
        }
    }

    #[test]
    fn test_mean_rank_empty_side_counts_as_zero() {
        let no_pile = Player::with_pile(&[10, 12], &[], Strategy::CombineOnly);
        assert!(Enrichment::MeanRank.enriched(&no_pile));

        let no_hand = Player::with_pile(&[], &[2, 2], Strategy::CombineOnly);
        assert!(!Enrichment::MeanRank.enriched(&no_hand));

        let nothing = Player::with_pile(&[], &[], Strategy::CombineOnly);
        assert!(!Enrichment::MeanRank.enriched(&nothing));
    }

    #[test]
    fn test_mean_rank_shuffles_hand_with_empty_pile() {
        let strategy = Strategy::from_id(3).unwrap();
        let ordered: Vec<u8> = (2..=14).collect();

        let mut reordered = 0;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut p = Player::with_pile(&ordered, &[], strategy);
            strategy.apply(&mut p, 1, &mut rng);

            let (mut hand, pile) = ranks(&p);
            assert!(pile.is_empty());
            if hand != ordered {
                reordered += 1;
            }
            hand.sort();
            assert_eq!(hand, ordered);
        }
        assert!(reordered > 0, "a rich hand over an empty pile should be shuffled");

        // The opposite polarity leaves the hand alone.
        let mut rng = StdRng::seed_from_u64(0);
        let strategy = Strategy::from_id(4).unwrap();
        let mut p = Player::with_pile(&ordered, &[], strategy);
        strategy.apply(&mut p, 1, &mut rng);
        assert_eq!(ranks(&p).0, ordered);
    }

    #[test]
    fn test_combine_only() {
        let mut rng = StdRng::seed_from_u64(1);

        let mut p = Player::with_pile(&[4, 5], &[9], Strategy::CombineOnly);
        Strategy::CombineOnly.apply(&mut p, 1, &mut rng);
        assert_eq!(ranks(&p), (vec![4, 5], vec![9]));

        Strategy::CombineOnly.apply(&mut p, 4, &mut rng);
        assert_eq!(ranks(&p), (vec![4, 5, 9], vec![]));
    }

    #[test]
    fn test_always_shuffle_combines_unconditionally() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Player::with_pile(&[4, 5, 6], &[9, 10], Strategy::AlwaysShuffle);
        Strategy::AlwaysShuffle.apply(&mut p, 1, &mut rng);
        assert_eq!(p.pile_size(), 0);
        assert_eq!(p.hand_size(), 5);
    }

    #[test]
    fn test_combine_and_shuffle_keeps_pile_when_not_short() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Player::with_pile(&[4, 5, 6], &[9, 10], Strategy::CombineAndShuffle);
        Strategy::CombineAndShuffle.apply(&mut p, 1, &mut rng);
        assert_eq!(p.pile_size(), 2);

        let mut hand = ranks(&p).0;
        hand.sort();
        assert_eq!(hand, vec![4, 5, 6]);
    }

    #[test]
    fn test_enriched_strategy_polarity() {
        let mut rng = StdRng::seed_from_u64(1);
        let shuffle_rich = Strategy::Enriched { metric: Enrichment::MeanRank, shuffle_when_enriched: true };
        let shuffle_poor = Strategy::Enriched { metric: Enrichment::MeanRank, shuffle_when_enriched: false };

        // Rich hand, not short: only the "shuffle when enriched" variant combines.
        let mut p = Player::with_pile(&[12, 13], &[2, 3], shuffle_rich);
        shuffle_rich.apply(&mut p, 1, &mut rng);
        assert_eq!(p.pile_size(), 0);

        let mut p = Player::with_pile(&[12, 13], &[2, 3], shuffle_poor);
        shuffle_poor.apply(&mut p, 1, &mut rng);
        assert_eq!(ranks(&p), (vec![12, 13], vec![2, 3]));
    }

    #[test]
    fn test_enriched_strategy_combines_when_short() {
        let mut rng = StdRng::seed_from_u64(1);
        let strategy = Strategy::Enriched { metric: Enrichment::Aces, shuffle_when_enriched: true };
        let mut p = Player::with_pile(&[], &[3, 14], strategy);
        strategy.apply(&mut p, 1, &mut rng);
        // Empty hand is never enriched, so the pile is combined in order.
        assert_eq!(ranks(&p), (vec![3, 14], vec![]));
    }
}
