//! Bracket: the single-elimination structure for one tournament.

use crate::models::competitor::Competitor;
use crate::models::game::GameMatch;
use crate::models::round::Round;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a bracket.
pub type BracketId = Uuid;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketStatus {
    #[default]
    Pending,
    Active,
    Completed,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: BracketId,
    pub tournament_id: TournamentId,
    /// Participants in seeding order.
    pub competitors: Vec<Competitor>,
    /// Rounds this bracket plays, first to final.
    pub rounds: Vec<Round>,
    pub status: BracketStatus,
    pub winner: Option<Competitor>,
    pub created_at: DateTime<Utc>,
}

impl Bracket {
    pub fn new(tournament_id: TournamentId, competitors: Vec<Competitor>, rounds: Vec<Round>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            competitors,
            rounds,
            status: BracketStatus::Active,
            winner: None,
            created_at: Utc::now(),
        }
    }

    /// The round after `round`, or None if `round` is the last one (or not in this bracket).
    pub fn next_round(&self, round: Round) -> Option<Round> {
        let idx = self.rounds.iter().position(|r| *r == round)?;
        self.rounds.get(idx + 1).copied()
    }

    pub fn final_round(&self) -> Option<Round> {
        self.rounds.last().copied()
    }

    pub fn is_final_round(&self, round: Round) -> bool {
        self.final_round() == Some(round)
    }

    pub fn plays(&self, round: Round) -> bool {
        self.rounds.contains(&round)
    }
}

/// Pair `entrants` in order (0 v 1, 2 v 3, ...); an unpaired trailing entrant gets a bye.
pub fn pair_round(bracket_id: BracketId, round: Round, entrants: &[Competitor]) -> Vec<GameMatch> {
    entrants
        .chunks(2)
        .enumerate()
        .filter_map(|(slot, pair)| {
            let (&one, rest) = pair.split_first()?;
            Some(match rest.first() {
                Some(&two) => GameMatch::new(bracket_id, round, slot as u32, one, two),
                None => GameMatch::bye(bracket_id, round, slot as u32, one),
            })
        })
        .collect()
}
