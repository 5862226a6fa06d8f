//! Bracket engine: single-elimination progression and match-result consensus.

pub mod config;
pub mod directory;
pub mod logic;
pub mod models;
pub mod store;

pub use config::{EngineConfig, ReportingMode, Seeding};
pub use directory::{CaptainDirectory, RegionalHostDirectory, ReporterDirectory};
pub use logic::{parse_competitors_csv, Advancement, Completion, Engine, SubmissionOutcome};
pub use models::{
    pair_round, Adjudication, Bracket, BracketId, BracketStatus, Competitor, ConflictRecord,
    EntityRef, GameMatch, MatchId, MatchStatus, Precondition, ReportingParty, ResultSubmission,
    Round, ScheduleConfirmation, StoreError, SubmitterId, Tournament, TournamentError,
    TournamentId, TournamentStatus, Verdict, MAX_BRACKET_SIZE,
};
pub use store::{MemoryStore, Store};
