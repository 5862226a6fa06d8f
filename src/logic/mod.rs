//! Bracket business logic: registration, bracket generation, result consensus,
//! round advancement and tournament completion.
//!
//! Every operation is a short, independent unit of work against the store. Nothing
//! runs in the background and nothing blocks on another operation.

mod advancement;
mod bracket;
mod completion;
mod consensus;
mod registration;

pub use advancement::Advancement;
pub use completion::Completion;
pub use consensus::SubmissionOutcome;
pub use registration::parse_competitors_csv;

use crate::config::EngineConfig;
use crate::directory::ReporterDirectory;
use crate::models::{
    Bracket, BracketId, EntityRef, GameMatch, MatchId, Tournament, TournamentError, TournamentId,
};
use crate::store::Store;
use std::sync::Arc;

/// Handles to the collaborators every operation needs. Cheap to share across threads
/// when `S` is an `Arc`.
pub struct Engine<S> {
    store: S,
    directory: Arc<dyn ReporterDirectory>,
    config: EngineConfig,
}

impl<S: Store> Engine<S> {
    pub fn new(store: S, directory: Arc<dyn ReporterDirectory>, config: EngineConfig) -> Self {
        Self {
            store,
            directory,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.store
            .find_tournament(id)?
            .ok_or(TournamentError::NotFound(EntityRef::Tournament(id)))
    }

    pub fn bracket(&self, id: BracketId) -> Result<Bracket, TournamentError> {
        self.store
            .find_bracket(id)?
            .ok_or(TournamentError::NotFound(EntityRef::Bracket(id)))
    }

    pub fn game_match(&self, id: MatchId) -> Result<GameMatch, TournamentError> {
        self.store
            .find_match(id)?
            .ok_or(TournamentError::NotFound(EntityRef::Match(id)))
    }

    /// All matches of a bracket, round by round.
    pub fn bracket_matches(&self, id: BracketId) -> Result<Vec<GameMatch>, TournamentError> {
        self.bracket(id)?;
        Ok(self.store.find_matches_by_bracket(id)?)
    }
}
