//! Round labels and the per-bracket round schedule.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Elimination tier. Declaration order is play order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    First,
    RoundOf64,
    RoundOf32,
    RoundOf16,
    Quarter,
    Semi,
    Final,
}

/// Labels that may follow `First`, latest last.
const LATER_ROUNDS: [Round; 6] = [
    Round::RoundOf64,
    Round::RoundOf32,
    Round::RoundOf16,
    Round::Quarter,
    Round::Semi,
    Round::Final,
];

/// Largest field the label ordering can describe (First + six later rounds).
pub const MAX_BRACKET_SIZE: usize = 128;

impl Round {
    /// Rounds played by a bracket of `competitors` entrants: `First` followed by the
    /// last `ceil(log2 n) - 1` labels. None when fewer than 2 or more than 128 entrants.
    ///
    /// Each round halves the field rounding up (one bye for an odd count), so
    /// `ceil(log2 n)` rounds always leave exactly one winner.
    pub fn schedule(competitors: usize) -> Option<Vec<Round>> {
        if !(2..=MAX_BRACKET_SIZE).contains(&competitors) {
            return None;
        }
        let rounds = ((competitors - 1).ilog2() + 1) as usize;
        let later = rounds - 1;
        let mut schedule = Vec::with_capacity(rounds);
        schedule.push(Round::First);
        schedule.extend_from_slice(&LATER_ROUNDS[LATER_ROUNDS.len() - later..]);
        Some(schedule)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Round::First => "first",
            Round::RoundOf64 => "round_of_64",
            Round::RoundOf32 => "round_of_32",
            Round::RoundOf16 => "round_of_16",
            Round::Quarter => "quarter",
            Round::Semi => "semi",
            Round::Final => "final",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
