//! Data structures for the bracket engine: tournaments, brackets, matches and submissions.

mod bracket;
mod competitor;
mod error;
mod game;
mod round;
mod tournament;

pub use bracket::{pair_round, Bracket, BracketId, BracketStatus};
pub use competitor::{Competitor, ReportingParty, SubmitterId};
pub use error::{EntityRef, Precondition, StoreError, TournamentError};
pub use game::{
    Adjudication, ConflictRecord, GameMatch, MatchId, MatchStatus, ResultSubmission,
    ScheduleConfirmation, Verdict,
};
pub use round::{Round, MAX_BRACKET_SIZE};
pub use tournament::{Tournament, TournamentId, TournamentStatus};
