//! Per-pairing statistics and the final report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::war::{GameResult, PlayerId, Strategy};

/// Column headers of the comma-separated report.
pub const HEADER: [&str; 7] = [
    "S1",
    "S2",
    "P1",
    "P2",
    "Tie",
    "P1 War Loss Average",
    "P2 War Loss Average",
];

/// Finalized statistics for one ordered strategy pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Results {
    /// Strategy id of player one.
    pub s1: usize,
    /// Strategy id of player two.
    pub s2: usize,
    /// Games won by player one.
    pub p1: u64,
    /// Games won by player two.
    pub p2: u64,
    /// Games that hit the round limit.
    pub tie: u64,
    /// Mean rank of dump cards player one lost in wars (0 if none).
    pub average_p1_war_lost: f64,
    /// Mean rank of dump cards player two lost in wars (0 if none).
    pub average_p2_war_lost: f64,
    /// Games played.
    pub games: u64,
    /// Comparisons played across all games, wars included.
    pub hands: u64,
}

impl Results {
    /// Mean comparisons per game.
    pub fn hands_per_game(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.hands as f64 / self.games as f64
        }
    }
}

impl fmt::Display for Results {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}, {}",
            self.s1, self.s2, self.p1, self.p2, self.tie, self.average_p1_war_lost, self.average_p2_war_lost
        )
    }
}

/// Running totals for one pairing, folded one game at a time.
#[derive(Debug, Clone)]
pub struct PairingTally {
    s1: Strategy,
    s2: Strategy,
    p1: u64,
    p2: u64,
    tie: u64,
    games: u64,
    hands: u64,
    p1_war_rank_sum: u64,
    p1_war_cards: u64,
    p2_war_rank_sum: u64,
    p2_war_cards: u64,
}

impl PairingTally {
    /// Empty totals for `s1` (player one) against `s2` (player two).
    pub fn new(s1: Strategy, s2: Strategy) -> Self {
        Self {
            s1,
            s2,
            p1: 0,
            p2: 0,
            tie: 0,
            games: 0,
            hands: 0,
            p1_war_rank_sum: 0,
            p1_war_cards: 0,
            p2_war_rank_sum: 0,
            p2_war_cards: 0,
        }
    }

    /// Fold one finished game into the totals.
    pub fn record(&mut self, game: &GameResult) {
        self.games += 1;
        self.hands += game.nhands as u64;

        for card in &game.p1_war_lost {
            self.p1_war_rank_sum += card.rank() as u64;
            self.p1_war_cards += 1;
        }
        for card in &game.p2_war_lost {
            self.p2_war_rank_sum += card.rank() as u64;
            self.p2_war_cards += 1;
        }

        match game.winner {
            Some(PlayerId::One) => self.p1 += 1,
            Some(PlayerId::Two) => self.p2 += 1,
            None => self.tie += 1,
        }
    }

    /// Compute averages and freeze the totals.
    pub fn finish(self) -> Results {
        Results {
            s1: self.s1.id(),
            s2: self.s2.id(),
            p1: self.p1,
            p2: self.p2,
            tie: self.tie,
            average_p1_war_lost: mean(self.p1_war_rank_sum, self.p1_war_cards),
            average_p2_war_lost: mean(self.p2_war_rank_sum, self.p2_war_cards),
            games: self.games,
            hands: self.hands,
        }
    }
}

/// Mean that reports 0 for an empty sample.
fn mean(sum: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// All pairing results of a run, in pairing enumeration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    /// Master seed the run was derived from.
    pub seed: u64,
    /// Games per pairing.
    pub games_per_pairing: usize,
    /// Wall-clock time of the run, in seconds.
    pub elapsed_seconds: f64,
    /// One row per ordered pairing.
    pub rows: Vec<Results>,
}

impl Report {
    /// Create a report from finished rows.
    pub fn new(seed: u64, games_per_pairing: usize, rows: Vec<Results>) -> Self {
        Self {
            seed,
            games_per_pairing,
            elapsed_seconds: 0.0,
            rows,
        }
    }

    /// Render as an aligned Markdown table.
    ///
    /// Floats are rounded to three decimals. With `sort`, rows are ordered by
    /// player two's strategy, then player two's wins.
    pub fn to_markdown(&self, sort: bool) -> String {
        let mut rows: Vec<&Results> = self.rows.iter().collect();
        if sort {
            rows.sort_by_key(|r| (r.s2, r.p2));
        }

        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                vec![
                    r.s1.to_string(),
                    r.s2.to_string(),
                    r.p1.to_string(),
                    r.p2.to_string(),
                    r.tie.to_string(),
                    round3(r.average_p1_war_lost),
                    round3(r.average_p2_war_lost),
                ]
            })
            .collect();

        let widths: Vec<usize> = HEADER
            .iter()
            .enumerate()
            .map(|(i, h)| cells.iter().map(|row| row[i].len()).fold(h.len(), usize::max))
            .collect();

        let fmt_row = |row: &[String]| -> String {
            let padded: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
                .collect();
            format!("| {} |", padded.join(" | "))
        };

        let header: Vec<String> = HEADER.iter().map(|h| h.to_string()).collect();
        let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();

        let mut lines = vec![fmt_row(&header), fmt_row(&separator)];
        lines.extend(cells.iter().map(|row| fmt_row(row)));
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Save to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())
    }
}

/// Comma-separated table: one header line, one line per pairing.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEADER.join(", "))?;
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

fn round3(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{}", rounded)
}
