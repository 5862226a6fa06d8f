//! Tournament and TournamentStatus.

use crate::models::bracket::BracketId;
use crate::models::competitor::Competitor;
use crate::models::error::{Precondition, TournamentError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Accepting registrations.
    #[default]
    Open,
    /// Registration reached capacity.
    Full,
    /// Bracket generated; matches in progress.
    Active,
    /// Champion decided. Terminal.
    Completed,
}

/// Tournament record: registration roster, bracket reference and final placings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub game_id: String,
    /// Maximum number of competitors.
    pub capacity: u32,
    pub registered_count: u32,
    /// Registered competitors in registration order.
    pub entrants: Vec<Competitor>,
    pub status: TournamentStatus,
    pub bracket_id: Option<BracketId>,
    pub winner: Option<Competitor>,
    pub runner_up: Option<Competitor>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Create a new tournament open for registration.
    pub fn new(game_id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_id: game_id.into(),
            capacity,
            registered_count: 0,
            entrants: Vec::new(),
            status: TournamentStatus::Open,
            bracket_id: None,
            winner: None,
            runner_up: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Add a competitor (only while Open). Becomes Full at capacity.
    pub fn register(&mut self, competitor: Competitor) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Open {
            return Err(Precondition::RegistrationClosed.into());
        }
        if self.entrants.contains(&competitor) {
            return Err(Precondition::DuplicateCompetitor(competitor).into());
        }
        self.entrants.push(competitor);
        self.registered_count += 1;
        if self.registered_count >= self.capacity {
            self.status = TournamentStatus::Full;
        }
        Ok(())
    }

    /// Claim the tournament for `bracket_id`. Fails if a bracket exists or the tournament is over.
    pub fn attach_bracket(&mut self, bracket_id: BracketId) -> Result<(), TournamentError> {
        if self.status == TournamentStatus::Completed {
            return Err(Precondition::TournamentCompleted.into());
        }
        if self.bracket_id.is_some() {
            return Err(Precondition::BracketExists.into());
        }
        self.bracket_id = Some(bracket_id);
        self.status = TournamentStatus::Active;
        Ok(())
    }

    /// Undo `attach_bracket` when the bracket could not be stored. No-op unless
    /// `bracket_id` is the current claim.
    pub fn release_bracket(&mut self, bracket_id: BracketId) {
        if self.bracket_id != Some(bracket_id) || self.status != TournamentStatus::Active {
            return;
        }
        self.bracket_id = None;
        self.status = if self.registered_count >= self.capacity {
            TournamentStatus::Full
        } else {
            TournamentStatus::Open
        };
    }

    /// Record the champion. Returns false without writing if already completed.
    pub fn complete(&mut self, winner: Competitor, runner_up: Option<Competitor>) -> bool {
        if self.status == TournamentStatus::Completed {
            return false;
        }
        self.winner = Some(winner);
        self.runner_up = runner_up;
        self.status = TournamentStatus::Completed;
        self.completed_at = Some(Utc::now());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Competitor {
        Competitor::Team(Uuid::new_v4())
    }

    #[test]
    fn register_fills_to_capacity() {
        let mut t = Tournament::new("chess", 2);
        t.register(team()).unwrap();
        assert_eq!(t.status, TournamentStatus::Open);
        t.register(team()).unwrap();
        assert_eq!(t.status, TournamentStatus::Full);
        assert_eq!(t.registered_count, 2);
        assert_eq!(
            t.register(team()),
            Err(TournamentError::PreconditionFailed(Precondition::RegistrationClosed))
        );
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut t = Tournament::new("chess", 8);
        let c = team();
        t.register(c).unwrap();
        assert_eq!(
            t.register(c),
            Err(TournamentError::PreconditionFailed(Precondition::DuplicateCompetitor(c)))
        );
        assert_eq!(t.registered_count, 1);
    }

    #[test]
    fn bracket_attaches_once() {
        let mut t = Tournament::new("chess", 8);
        t.attach_bracket(Uuid::new_v4()).unwrap();
        assert_eq!(t.status, TournamentStatus::Active);
        assert_eq!(
            t.attach_bracket(Uuid::new_v4()),
            Err(TournamentError::PreconditionFailed(Precondition::BracketExists))
        );
    }

    #[test]
    fn winner_is_immutable() {
        let mut t = Tournament::new("chess", 8);
        let (a, b) = (team(), team());
        assert!(t.complete(a, Some(b)));
        assert!(!t.complete(b, Some(a)));
        assert_eq!(t.winner, Some(a));
        assert_eq!(t.runner_up, Some(b));
    }

    #[test]
    fn release_bracket_reopens_only_the_matching_claim() {
        let mut t = Tournament::new("chess", 2);
        t.register(team()).unwrap();
        let claimed = Uuid::new_v4();
        t.attach_bracket(claimed).unwrap();

        t.release_bracket(Uuid::new_v4());
        assert_eq!(t.bracket_id, Some(claimed));

        t.release_bracket(claimed);
        assert_eq!(t.bracket_id, None);
        assert_eq!(t.status, TournamentStatus::Open);
        t.attach_bracket(claimed).unwrap();
    }
}
