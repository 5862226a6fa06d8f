//! Tournament completion: record the champion exactly once.

use crate::logic::Engine;
use crate::models::{BracketId, BracketStatus, Competitor, Precondition, TournamentError};
use crate::store::Store;
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Completion {
    /// This call wrote the result.
    Crowned {
        winner: Competitor,
        runner_up: Option<Competitor>,
    },
    /// An earlier call already completed the tournament; the stored winner is returned.
    AlreadyCompleted { winner: Option<Competitor> },
}

impl<S: Store> Engine<S> {
    /// Finalize the tournament from the bracket's completed final match.
    ///
    /// The tournament write is guarded by its status inside the store's update boundary,
    /// so repeated or concurrent calls never overwrite the winner.
    pub fn complete_tournament(&self, bracket_id: BracketId) -> Result<Completion, TournamentError> {
        let bracket = self.bracket(bracket_id)?;
        let final_round = bracket.final_round().ok_or(Precondition::NoSingleWinner)?;
        let finals = self
            .store
            .find_matches_by_bracket_and_round(bracket_id, final_round)?;

        let (winner, runner_up) = match finals.as_slice() {
            [m] if m.is_completed() => (m.winner.ok_or(Precondition::NoSingleWinner)?, m.loser),
            _ => return Err(Precondition::NoSingleWinner.into()),
        };

        let (written, stored_winner) = self.store.update_tournament(bracket.tournament_id, |t| {
            let written = t.complete(winner, runner_up);
            Ok((written, t.winner))
        })?;

        self.store.update_bracket(bracket_id, |b| {
            if b.winner.is_none() {
                b.winner = stored_winner;
                b.status = BracketStatus::Completed;
            }
            Ok(())
        })?;

        if written {
            log::info!(
                "Tournament {} completed: winner {}, runner-up {}",
                bracket.tournament_id,
                winner,
                runner_up.map_or_else(|| "none".to_string(), |c| c.to_string())
            );
            Ok(Completion::Crowned { winner, runner_up })
        } else {
            log::debug!(
                "Tournament {} already completed; completion skipped",
                bracket.tournament_id
            );
            Ok(Completion::AlreadyCompleted {
                winner: stored_winner,
            })
        }
    }
}
