//! Match (game) lifecycle: pairing, byes, result submissions and consensus.

use crate::config::ReportingMode;
use crate::models::competitor::{Competitor, ReportingParty, SubmitterId};
use crate::models::error::{Precondition, TournamentError};
use crate::models::round::Round;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Where a match is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Created, no agreed start time yet.
    #[default]
    Pending,
    /// Start time confirmed by every reporting party.
    Scheduled,
    /// Played or playable; at least one host attestation recorded.
    AwaitingResults,
    /// One side has reported; waiting for the other.
    ResultsPending,
    Completed,
    /// Reporters disagree; needs manual adjudication.
    ResultsConflict,
}

/// One party's claim about who won.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResultSubmission {
    pub submitter: SubmitterId,
    pub party: ReportingParty,
    pub claimed_winner: Competitor,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

/// Disagreeing submissions, kept verbatim for the adjudicator.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub submissions: Vec<ResultSubmission>,
    pub flagged_at: DateTime<Utc>,
}

/// Manual override of a conflicted result.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Adjudication {
    pub adjudicator: SubmitterId,
    pub winner: Competitor,
    pub resolved_at: DateTime<Utc>,
}

/// A reporting party's proposed start time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfirmation {
    pub party: ReportingParty,
    pub submitter: SubmitterId,
    pub start_at: DateTime<Utc>,
    pub confirmed_at: DateTime<Utc>,
}

/// What a recorded submission did to the match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    /// Recorded; more reporters still have to attest.
    Pending,
    /// Unanimous: the match is now completed with this winner.
    Agreed(Competitor),
    /// Reporters disagree; the match is flagged.
    Conflict,
}

/// A single bracket match between two competitor slots.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub bracket_id: Uuid,
    pub round: Round,
    /// Position within the round; winners advance in slot order.
    pub slot: u32,
    pub competitor_1: Option<Competitor>,
    /// None for a bye.
    pub competitor_2: Option<Competitor>,
    pub status: MatchStatus,
    pub winner: Option<Competitor>,
    pub loser: Option<Competitor>,
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub schedule_confirmations: Vec<ScheduleConfirmation>,
    #[serde(default)]
    pub submissions: Vec<ResultSubmission>,
    pub conflict: Option<ConflictRecord>,
    pub adjudication: Option<Adjudication>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl GameMatch {
    pub fn new(bracket_id: Uuid, round: Round, slot: u32, one: Competitor, two: Competitor) -> Self {
        Self {
            id: Uuid::new_v4(),
            bracket_id,
            round,
            slot,
            competitor_1: Some(one),
            competitor_2: Some(two),
            status: MatchStatus::Pending,
            winner: None,
            loser: None,
            scheduled_at: None,
            schedule_confirmations: Vec::new(),
            submissions: Vec::new(),
            conflict: None,
            adjudication: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// A match with a single competitor, completed on creation.
    pub fn bye(bracket_id: Uuid, round: Round, slot: u32, competitor: Competitor) -> Self {
        let now = Utc::now();
        Self {
            competitor_2: None,
            status: MatchStatus::Completed,
            winner: Some(competitor),
            completed_at: Some(now),
            created_at: now,
            ..Self::new(bracket_id, round, slot, competitor, competitor)
        }
    }

    pub fn is_bye(&self) -> bool {
        self.competitor_1.is_some() != self.competitor_2.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn is_competitor(&self, competitor: Competitor) -> bool {
        self.competitor_1 == Some(competitor) || self.competitor_2 == Some(competitor)
    }

    /// The other slot, if `competitor` is in this match.
    pub fn opponent_of(&self, competitor: Competitor) -> Option<Competitor> {
        if self.competitor_1 == Some(competitor) {
            self.competitor_2
        } else if self.competitor_2 == Some(competitor) {
            self.competitor_1
        } else {
            None
        }
    }

    /// Record one party's claimed winner and evaluate consensus.
    ///
    /// The caller resolves `submission.party` from the submitter beforehand and must hold
    /// the match's write boundary for the whole call. Checks, in order: already final,
    /// claimed winner is a competitor, party has not submitted yet.
    pub fn record_submission(
        &mut self,
        submission: ResultSubmission,
        required_reporters: usize,
        mode: ReportingMode,
    ) -> Result<Verdict, TournamentError> {
        if self.is_completed() {
            return Err(TournamentError::AlreadyFinalized);
        }
        if !self.is_competitor(submission.claimed_winner) || self.is_bye() {
            return Err(TournamentError::InvalidWinner(submission.claimed_winner));
        }
        if self.submissions.iter().any(|s| s.party == submission.party) {
            return Err(TournamentError::DuplicateSubmission(submission.party));
        }

        let claimed = submission.claimed_winner;
        self.submissions.push(submission);

        if self.submissions.iter().any(|s| s.claimed_winner != claimed) {
            self.status = MatchStatus::ResultsConflict;
            self.conflict = Some(ConflictRecord {
                submissions: self.submissions.clone(),
                flagged_at: Utc::now(),
            });
            return Ok(Verdict::Conflict);
        }

        if self.submissions.len() >= required_reporters.max(1) {
            self.finish(claimed);
            return Ok(Verdict::Agreed(claimed));
        }

        self.status = match mode {
            ReportingMode::SelfReport => MatchStatus::ResultsPending,
            ReportingMode::HostConfirmation => MatchStatus::AwaitingResults,
        };
        Ok(Verdict::Pending)
    }

    /// Manually settle a conflicted match. The conflict record is kept.
    pub fn adjudicate(
        &mut self,
        adjudicator: SubmitterId,
        winner: Competitor,
    ) -> Result<(), TournamentError> {
        match self.status {
            MatchStatus::Completed => return Err(TournamentError::AlreadyFinalized),
            MatchStatus::ResultsConflict => {}
            _ => return Err(Precondition::NotInConflict.into()),
        }
        if !self.is_competitor(winner) {
            return Err(TournamentError::InvalidWinner(winner));
        }
        self.adjudication = Some(Adjudication {
            adjudicator,
            winner,
            resolved_at: Utc::now(),
        });
        self.finish(winner);
        Ok(())
    }

    /// Record a party's proposed start time. Returns true once every required party
    /// has confirmed the same time and the match became `Scheduled`.
    pub fn confirm_schedule(
        &mut self,
        confirmation: ScheduleConfirmation,
        required_reporters: usize,
    ) -> Result<bool, TournamentError> {
        match self.status {
            MatchStatus::Completed => return Err(TournamentError::AlreadyFinalized),
            MatchStatus::Pending | MatchStatus::Scheduled if self.submissions.is_empty() => {}
            _ => return Err(Precondition::ResultsLocked.into()),
        }

        self.schedule_confirmations
            .retain(|c| c.party != confirmation.party);
        let start_at = confirmation.start_at;
        self.schedule_confirmations.push(confirmation);

        let agreeing = self
            .schedule_confirmations
            .iter()
            .filter(|c| c.start_at == start_at)
            .count();
        if agreeing >= required_reporters.max(1) {
            self.status = MatchStatus::Scheduled;
            self.scheduled_at = Some(start_at);
            Ok(true)
        } else {
            self.status = MatchStatus::Pending;
            self.scheduled_at = None;
            Ok(false)
        }
    }

    fn finish(&mut self, winner: Competitor) {
        self.loser = self.opponent_of(winner);
        self.winner = Some(winner);
        self.status = MatchStatus::Completed;
        self.completed_at = Some(Utc::now());
    }
}
