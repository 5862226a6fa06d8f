//! Entity store access.
//!
//! The engine only needs find/update-by-id, a few filtered queries and one
//! conditional insert. Updates take a closure that runs inside the store's
//! write boundary for that record, so read-check-write sequences are atomic.

mod memory;

pub use memory::MemoryStore;

use crate::models::{
    Bracket, BracketId, GameMatch, MatchId, Round, StoreError, Tournament, TournamentError,
    TournamentId,
};
use std::sync::Arc;

/// Document store backing the engine.
///
/// `update_*` contract: the closure sees the current record and runs serialized
/// against every other update of the same record. The mutated record is written
/// back only if the closure returns `Ok`. A missing record yields
/// `TournamentError::NotFound`.
pub trait Store: Send + Sync {
    fn find_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError>;

    fn insert_tournament(&self, tournament: Tournament) -> Result<(), StoreError>;

    fn update_tournament<T, F>(&self, id: TournamentId, f: F) -> Result<T, TournamentError>
    where
        F: FnOnce(&mut Tournament) -> Result<T, TournamentError>;

    fn find_bracket(&self, id: BracketId) -> Result<Option<Bracket>, StoreError>;

    fn insert_bracket(&self, bracket: Bracket) -> Result<(), StoreError>;

    fn update_bracket<T, F>(&self, id: BracketId, f: F) -> Result<T, TournamentError>
    where
        F: FnOnce(&mut Bracket) -> Result<T, TournamentError>;

    fn find_match(&self, id: MatchId) -> Result<Option<GameMatch>, StoreError>;

    fn update_match<T, F>(&self, id: MatchId, f: F) -> Result<T, TournamentError>
    where
        F: FnOnce(&mut GameMatch) -> Result<T, TournamentError>;

    /// Matches of one round, ordered by slot.
    fn find_matches_by_bracket_and_round(
        &self,
        bracket_id: BracketId,
        round: Round,
    ) -> Result<Vec<GameMatch>, StoreError>;

    /// Every match of a bracket, ordered by round then slot.
    fn find_matches_by_bracket(&self, bracket_id: BracketId) -> Result<Vec<GameMatch>, StoreError>;

    /// Insert a whole round unless the bracket already has matches at `round`.
    /// Returns false (and inserts nothing) when the round exists. Atomic.
    fn insert_round(
        &self,
        bracket_id: BracketId,
        round: Round,
        matches: Vec<GameMatch>,
    ) -> Result<bool, StoreError>;
}

// Shared handles: Arc<S> is a store whenever S is.
impl<S: Store> Store for Arc<S> {
    fn find_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError> {
        (**self).find_tournament(id)
    }

    fn insert_tournament(&self, tournament: Tournament) -> Result<(), StoreError> {
        (**self).insert_tournament(tournament)
    }

    fn update_tournament<T, F>(&self, id: TournamentId, f: F) -> Result<T, TournamentError>
    where
        F: FnOnce(&mut Tournament) -> Result<T, TournamentError>,
    {
        (**self).update_tournament(id, f)
    }

    fn find_bracket(&self, id: BracketId) -> Result<Option<Bracket>, StoreError> {
        (**self).find_bracket(id)
    }

    fn insert_bracket(&self, bracket: Bracket) -> Result<(), StoreError> {
        (**self).insert_bracket(bracket)
    }

    fn update_bracket<T, F>(&self, id: BracketId, f: F) -> Result<T, TournamentError>
    where
        F: FnOnce(&mut Bracket) -> Result<T, TournamentError>,
    {
        (**self).update_bracket(id, f)
    }

    fn find_match(&self, id: MatchId) -> Result<Option<GameMatch>, StoreError> {
        (**self).find_match(id)
    }

    fn update_match<T, F>(&self, id: MatchId, f: F) -> Result<T, TournamentError>
    where
        F: FnOnce(&mut GameMatch) -> Result<T, TournamentError>,
    {
        (**self).update_match(id, f)
    }

    fn find_matches_by_bracket_and_round(
        &self,
        bracket_id: BracketId,
        round: Round,
    ) -> Result<Vec<GameMatch>, StoreError> {
        (**self).find_matches_by_bracket_and_round(bracket_id, round)
    }

    fn find_matches_by_bracket(&self, bracket_id: BracketId) -> Result<Vec<GameMatch>, StoreError> {
        (**self).find_matches_by_bracket(bracket_id)
    }

    fn insert_round(
        &self,
        bracket_id: BracketId,
        round: Round,
        matches: Vec<GameMatch>,
    ) -> Result<bool, StoreError> {
        (**self).insert_round(bracket_id, round, matches)
    }
}
