//! Round advancement: when a round is fully completed, pair its winners into the next round.
//!
//! Advancement is keyed on "is this round complete" rather than on which match just
//! finished, so it can be invoked any number of times, in any order, from concurrent
//! completions. The store's insert-if-absent on (bracket, round) makes creation happen once.

use crate::logic::{Completion, Engine};
use crate::models::{pair_round, BracketId, Competitor, Precondition, Round, TournamentError};
use crate::store::Store;
use serde::Serialize;

/// What `advance_round` did.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advancement {
    /// Some matches in the round are not completed yet.
    RoundIncomplete { round: Round, remaining: usize },
    /// The next round was created by this call.
    NextRoundCreated { round: Round, matches: usize },
    /// The next round already existed; nothing written.
    AlreadyAdvanced { round: Round },
    /// The final round finished; the completion detector ran.
    TournamentCompleted(Completion),
}

impl<S: Store> Engine<S> {
    /// Advance `bracket_id` past `round` if every match of that round is completed.
    pub fn advance_round(
        &self,
        bracket_id: BracketId,
        round: Round,
    ) -> Result<Advancement, TournamentError> {
        let bracket = self.bracket(bracket_id)?;
        if !bracket.plays(round) {
            return Err(Precondition::UnknownRound(round).into());
        }

        let matches = self
            .store
            .find_matches_by_bracket_and_round(bracket_id, round)?;
        if matches.is_empty() {
            return Err(Precondition::EmptyRound(round).into());
        }

        let remaining = matches.iter().filter(|m| !m.is_completed()).count();
        if remaining > 0 {
            log::debug!(
                "Bracket {} round {}: {} match(es) still open",
                bracket_id,
                round,
                remaining
            );
            return Ok(Advancement::RoundIncomplete { round, remaining });
        }

        // Slot order; a completed match always has a winner.
        let winners: Vec<Competitor> = matches.iter().filter_map(|m| m.winner).collect();

        let next = match bracket.next_round(round) {
            Some(next) => next,
            None => {
                if winners.len() != 1 {
                    return Err(Precondition::NoSingleWinner.into());
                }
                let completion = self.complete_tournament(bracket_id)?;
                return Ok(Advancement::TournamentCompleted(completion));
            }
        };

        let pairings = pair_round(bracket_id, next, &winners);
        let count = pairings.len();
        if self.store.insert_round(bracket_id, next, pairings)? {
            log::info!(
                "Bracket {}: round {} complete, created {} match(es) for round {}",
                bracket_id,
                round,
                count,
                next
            );
            Ok(Advancement::NextRoundCreated {
                round: next,
                matches: count,
            })
        } else {
            log::debug!(
                "Bracket {}: round {} already exists, skipping advancement",
                bracket_id,
                next
            );
            Ok(Advancement::AlreadyAdvanced { round: next })
        }
    }
}
