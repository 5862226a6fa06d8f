//! Bracket generation: one-time seeding of the first round.

use crate::config::Seeding;
use crate::logic::Engine;
use crate::models::{
    pair_round, Bracket, Competitor, Precondition, Round, TournamentError, TournamentId,
    MAX_BRACKET_SIZE,
};
use crate::store::Store;
use rand::seq::SliceRandom;
use std::collections::HashSet;

impl<S: Store> Engine<S> {
    /// Create the tournament's bracket and its first round.
    ///
    /// Competitors are paired in the given order (or shuffled under `Seeding::Random`);
    /// a trailing odd competitor gets a bye that is already completed. The tournament's
    /// bracket reference is claimed atomically first, so only one of several concurrent
    /// calls can succeed. If the bracket or its first round cannot be stored the claim
    /// is released and generation can be retried. A bracket record written before a
    /// failed round insert stays behind unreferenced.
    pub fn generate_bracket(
        &self,
        tournament_id: TournamentId,
        competitors: Vec<Competitor>,
    ) -> Result<Bracket, TournamentError> {
        let got = competitors.len();
        let min = self.config.min_competitors.max(2);
        if got < min {
            return Err(Precondition::NotEnoughCompetitors { required: min, got }.into());
        }
        let max = self.config.max_competitors.min(MAX_BRACKET_SIZE);
        if got > max {
            return Err(Precondition::TooManyCompetitors { max, got }.into());
        }
        let mut seen = HashSet::with_capacity(got);
        if let Some(dup) = competitors.iter().find(|c| !seen.insert(**c)) {
            return Err(Precondition::DuplicateCompetitor(*dup).into());
        }

        let tournament = self.tournament(tournament_id)?;
        let capacity = tournament.capacity as usize;
        if got > capacity {
            return Err(Precondition::TooManyCompetitors { max: capacity, got }.into());
        }

        let mut seeded = competitors;
        if self.config.seeding == Seeding::Random {
            seeded.shuffle(&mut rand::thread_rng());
        }
        let rounds =
            Round::schedule(got).ok_or(Precondition::TooManyCompetitors { max, got })?;
        let bracket = Bracket::new(tournament_id, seeded, rounds);

        self.store
            .update_tournament(tournament_id, |t| t.attach_bracket(bracket.id))?;

        let first = pair_round(bracket.id, Round::First, &bracket.competitors);
        let byes = first.iter().filter(|m| m.is_bye()).count();
        let count = first.len();
        let stored = self
            .store
            .insert_bracket(bracket.clone())
            .and_then(|()| self.store.insert_round(bracket.id, Round::First, first));
        if let Err(e) = stored {
            log::warn!(
                "Storing bracket {} for tournament {} failed: {}; releasing claim",
                bracket.id,
                tournament_id,
                e
            );
            self.store.update_tournament(tournament_id, |t| {
                t.release_bracket(bracket.id);
                Ok(())
            })?;
            return Err(e.into());
        }

        log::info!(
            "Generated bracket {} for tournament {}: {} competitors, {} first-round matches ({} bye), rounds {:?}",
            bracket.id,
            tournament_id,
            got,
            count,
            byes,
            bracket.rounds
        );
        Ok(bracket)
    }
}
