//! Errors surfaced by engine operations. All are recoverable; none abort the process.

use crate::models::competitor::{Competitor, ReportingParty, SubmitterId};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Which record a lookup failed on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityRef {
    Tournament(Uuid),
    Bracket(Uuid),
    Match(Uuid),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Tournament(id) => write!(f, "tournament {}", id),
            EntityRef::Bracket(id) => write!(f, "bracket {}", id),
            EntityRef::Match(id) => write!(f, "match {}", id),
        }
    }
}

/// Why an operation's precondition did not hold.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Precondition {
    #[error("need at least {required} competitors (got {got})")]
    NotEnoughCompetitors { required: usize, got: usize },
    #[error("at most {max} competitors are supported (got {got})")]
    TooManyCompetitors { max: usize, got: usize },
    #[error("competitor {0} is listed more than once")]
    DuplicateCompetitor(Competitor),
    #[error("a bracket already exists for this tournament")]
    BracketExists,
    #[error("tournament is already completed")]
    TournamentCompleted,
    #[error("registration is closed")]
    RegistrationClosed,
    #[error("capacity must be at least 2")]
    InvalidCapacity,
    #[error("match is not in results conflict")]
    NotInConflict,
    #[error("results have already been submitted for this match")]
    ResultsLocked,
    #[error("round {0} has no matches in this bracket")]
    EmptyRound(crate::models::round::Round),
    #[error("round {0} is not part of this bracket's schedule")]
    UnknownRound(crate::models::round::Round),
    #[error("final round did not produce exactly one winner")]
    NoSingleWinner,
}

/// Storage collaborator failures.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum StoreError {
    #[error("record {0} already exists")]
    DuplicateKey(Uuid),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    #[error("{0} not found")]
    NotFound(EntityRef),
    #[error("{0} is not a reporter for this match")]
    Unauthorized(SubmitterId),
    #[error("claimed winner {0} is not a competitor in this match")]
    InvalidWinner(Competitor),
    #[error("{0} has already submitted a result for this match")]
    DuplicateSubmission(ReportingParty),
    #[error("match result is already final")]
    AlreadyFinalized,
    #[error("precondition failed: {0}")]
    PreconditionFailed(#[from] Precondition),
    #[error("invalid registration import: {0}")]
    InvalidImport(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
