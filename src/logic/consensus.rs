//! Result consensus: independent submissions reconciled into one authoritative result.

use crate::logic::{Advancement, Engine};
use crate::models::{
    Competitor, MatchId, ResultSubmission, ScheduleConfirmation, SubmitterId, TournamentError,
    Verdict,
};
use crate::store::Store;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Accepted submission outcome. Rejections come back as `Err(TournamentError)`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Recorded; waiting for the remaining reporters.
    Pending,
    /// Reporters agreed. `advancement` is what the round did in response.
    Completed {
        winner: Competitor,
        advancement: Advancement,
    },
    /// Reporters disagree; the match needs manual adjudication.
    Conflict,
}

impl<S: Store> Engine<S> {
    /// Record `submitter`'s claimed winner for a match.
    ///
    /// Rejected with `AlreadyFinalized` (match completed), `Unauthorized` (not a reporter
    /// of this match), `InvalidWinner` (not one of the two competitors) or
    /// `DuplicateSubmission` (this reporting party already submitted). The whole
    /// read-check-write runs inside the store's update boundary for the match.
    pub fn submit_result(
        &self,
        match_id: MatchId,
        submitter: SubmitterId,
        claimed_winner: Competitor,
        notes: impl Into<String>,
    ) -> Result<SubmissionOutcome, TournamentError> {
        let notes = notes.into();
        let required = self.config.required_reporters;
        let mode = self.config.reporting_mode;
        let directory = &self.directory;

        let (verdict, bracket_id, round) = self.store.update_match(match_id, |m| {
            if m.is_completed() {
                return Err(TournamentError::AlreadyFinalized);
            }
            let party = directory
                .reporting_party(m, &submitter)
                .ok_or_else(|| TournamentError::Unauthorized(submitter.clone()))?;
            let submission = ResultSubmission {
                submitter: submitter.clone(),
                party,
                claimed_winner,
                submitted_at: Utc::now(),
                notes,
            };
            let verdict = m.record_submission(submission, required, mode)?;
            Ok((verdict, m.bracket_id, m.round))
        })?;

        match verdict {
            Verdict::Pending => {
                log::info!(
                    "Match {}: {} reported {} as winner; waiting for other reporters",
                    match_id,
                    submitter,
                    claimed_winner
                );
                Ok(SubmissionOutcome::Pending)
            }
            Verdict::Conflict => {
                log::warn!(
                    "Match {}: conflicting results ({} claims {}); flagged for adjudication",
                    match_id,
                    submitter,
                    claimed_winner
                );
                Ok(SubmissionOutcome::Conflict)
            }
            Verdict::Agreed(winner) => {
                log::info!("Match {} completed by consensus: winner {}", match_id, winner);
                let advancement = self.advance_round(bracket_id, round)?;
                Ok(SubmissionOutcome::Completed {
                    winner,
                    advancement,
                })
            }
        }
    }

    /// Settle a `results_conflict` match by decree and re-run round advancement.
    /// Whether `adjudicator` may do this is decided outside the engine.
    pub fn resolve_conflict(
        &self,
        match_id: MatchId,
        adjudicator: SubmitterId,
        winner: Competitor,
    ) -> Result<Advancement, TournamentError> {
        let (bracket_id, round) = self.store.update_match(match_id, |m| {
            m.adjudicate(adjudicator.clone(), winner)?;
            Ok((m.bracket_id, m.round))
        })?;
        log::info!(
            "Match {}: conflict resolved by {} with winner {}",
            match_id,
            adjudicator,
            winner
        );
        self.advance_round(bracket_id, round)
    }

    /// Record a reporting party's proposed start time. Returns true when the match
    /// became `Scheduled`.
    pub fn confirm_schedule(
        &self,
        match_id: MatchId,
        submitter: SubmitterId,
        start_at: DateTime<Utc>,
    ) -> Result<bool, TournamentError> {
        let required = self.config.required_reporters;
        let directory = &self.directory;
        let scheduled = self.store.update_match(match_id, |m| {
            if m.is_completed() {
                return Err(TournamentError::AlreadyFinalized);
            }
            let party = directory
                .reporting_party(m, &submitter)
                .ok_or_else(|| TournamentError::Unauthorized(submitter.clone()))?;
            m.confirm_schedule(
                ScheduleConfirmation {
                    party,
                    submitter: submitter.clone(),
                    start_at,
                    confirmed_at: Utc::now(),
                },
                required,
            )
        })?;
        if scheduled {
            log::info!("Match {} scheduled for {}", match_id, start_at);
        }
        Ok(scheduled)
    }
}
