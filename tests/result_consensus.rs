//! Integration tests for result submission, conflicts, adjudication and scheduling.

mod common;

use bracket_engine::{
    Advancement, Competitor, Completion, Engine, EngineConfig, EntityRef, MatchStatus,
    MemoryStore, Precondition, RegionalHostDirectory, ReportingMode, ReportingParty, Round,
    SubmissionOutcome, SubmitterId, TournamentError, TournamentStatus,
};
use chrono::{Duration, Utc};
use common::{bracket_of, captain, teams};
use std::sync::Arc;
use uuid::Uuid;

#[test]
fn disagreement_flags_conflict_and_tournament_stays_active() {
    let f = bracket_of(4);
    let m = &f.round(Round::First)[0];
    let (a, b) = (m.competitor_1.unwrap(), m.competitor_2.unwrap());

    assert_eq!(
        f.engine.submit_result(m.id, captain(a), a, "we won 2-1"),
        Ok(SubmissionOutcome::Pending)
    );
    assert_eq!(
        f.engine.game_match(m.id).unwrap().status,
        MatchStatus::ResultsPending
    );
    assert_eq!(
        f.engine.submit_result(m.id, captain(b), b, "no, we did"),
        Ok(SubmissionOutcome::Conflict)
    );

    let stored = f.engine.game_match(m.id).unwrap();
    assert_eq!(stored.status, MatchStatus::ResultsConflict);
    assert_eq!(stored.winner, None);
    let conflict = stored.conflict.unwrap();
    assert_eq!(conflict.submissions.len(), 2);
    assert_eq!(conflict.submissions[0].claimed_winner, a);
    assert_eq!(conflict.submissions[0].notes, "we won 2-1");
    assert_eq!(conflict.submissions[1].submitter, captain(b));

    let t = f.engine.tournament(f.bracket.tournament_id).unwrap();
    assert_eq!(t.status, TournamentStatus::Active);
    assert!(f.round(Round::Final).is_empty());
}

#[test]
fn submission_list_never_exceeds_two() {
    let f = bracket_of(4);
    let m = &f.round(Round::First)[0];
    let (a, b) = (m.competitor_1.unwrap(), m.competitor_2.unwrap());
    f.engine.submit_result(m.id, captain(a), a, "").unwrap();
    f.engine.submit_result(m.id, captain(b), b, "").unwrap();

    let outsider = captain(f.teams[2]);
    assert_eq!(
        f.engine.submit_result(m.id, outsider.clone(), a, ""),
        Err(TournamentError::Unauthorized(outsider))
    );
    assert_eq!(
        f.engine.submit_result(m.id, captain(a), b, "changed my mind"),
        Err(TournamentError::DuplicateSubmission(ReportingParty::for_competitor(a)))
    );
    assert_eq!(f.engine.game_match(m.id).unwrap().submissions.len(), 2);
}

#[test]
fn completed_match_rejects_late_submissions() {
    let f = bracket_of(4);
    let m = &f.round(Round::First)[0];
    let a = m.competitor_1.unwrap();
    f.play(m, a);
    assert_eq!(
        f.engine.submit_result(m.id, captain(a), a, ""),
        Err(TournamentError::AlreadyFinalized)
    );
}

#[test]
fn rejects_unknown_match_and_foreign_winner() {
    let f = bracket_of(4);
    let missing = Uuid::new_v4();
    let a = f.teams[0];
    assert_eq!(
        f.engine.submit_result(missing, captain(a), a, ""),
        Err(TournamentError::NotFound(EntityRef::Match(missing)))
    );

    let m = &f.round(Round::First)[0];
    let foreign = f.teams[3];
    assert_eq!(
        f.engine.submit_result(m.id, captain(a), foreign, ""),
        Err(TournamentError::InvalidWinner(foreign))
    );
    assert!(f.engine.game_match(m.id).unwrap().submissions.is_empty());
}

#[test]
fn second_captain_of_same_team_is_a_duplicate() {
    let f = bracket_of(2);
    let m = &f.round(Round::First)[0];
    let a = m.competitor_1.unwrap();
    let vice = SubmitterId::new("vice-captain");
    f.directory.assign(a, vice.clone());

    f.engine.submit_result(m.id, captain(a), a, "").unwrap();
    assert_eq!(
        f.engine.submit_result(m.id, vice, a, ""),
        Err(TournamentError::DuplicateSubmission(ReportingParty::for_competitor(a)))
    );
}

#[test]
fn adjudication_settles_conflict_and_advances() {
    let f = bracket_of(2);
    let m = &f.round(Round::First)[0];
    let (a, b) = (m.competitor_1.unwrap(), m.competitor_2.unwrap());
    let admin = SubmitterId::new("admin");

    assert_eq!(
        f.engine.resolve_conflict(m.id, admin.clone(), a),
        Err(TournamentError::PreconditionFailed(Precondition::NotInConflict))
    );

    f.engine.submit_result(m.id, captain(a), a, "").unwrap();
    f.engine.submit_result(m.id, captain(b), b, "").unwrap();
    let outsider = teams(1)[0];
    assert_eq!(
        f.engine.resolve_conflict(m.id, admin.clone(), outsider),
        Err(TournamentError::InvalidWinner(outsider))
    );

    assert_eq!(
        f.engine.resolve_conflict(m.id, admin.clone(), b),
        Ok(Advancement::TournamentCompleted(Completion::Crowned {
            winner: b,
            runner_up: Some(a),
        }))
    );
    let stored = f.engine.game_match(m.id).unwrap();
    assert_eq!(stored.status, MatchStatus::Completed);
    assert_eq!(stored.adjudication.unwrap().adjudicator, admin);
    assert!(stored.conflict.is_some());
    assert_eq!(
        f.engine.resolve_conflict(m.id, SubmitterId::new("admin"), a),
        Err(TournamentError::AlreadyFinalized)
    );
}

#[test]
fn host_confirmation_uses_regions_as_parties() {
    let directory = Arc::new(RegionalHostDirectory::new());
    let (a, b) = (Competitor::Clan(Uuid::new_v4()), Competitor::Clan(Uuid::new_v4()));
    directory.set_region(a, "eu");
    directory.set_region(b, "na");
    directory.add_host("eu", SubmitterId::new("eu-host-1"));
    directory.add_host("eu", SubmitterId::new("eu-host-2"));
    directory.add_host("na", SubmitterId::new("na-host"));

    let config = EngineConfig::default().with_reporting_mode(ReportingMode::HostConfirmation);
    let engine = Engine::new(MemoryStore::new(), directory, config);
    let t = engine.open_tournament("clash", 2).unwrap();
    let bracket = engine.generate_bracket(t.id, vec![a, b]).unwrap();
    let m = engine.bracket_matches(bracket.id).unwrap().remove(0);

    assert_eq!(
        engine.submit_result(m.id, SubmitterId::new("eu-host-1"), b, ""),
        Ok(SubmissionOutcome::Pending)
    );
    assert_eq!(
        engine.game_match(m.id).unwrap().status,
        MatchStatus::AwaitingResults
    );
    assert_eq!(
        engine.submit_result(m.id, SubmitterId::new("eu-host-2"), b, ""),
        Err(TournamentError::DuplicateSubmission(ReportingParty::new("eu")))
    );
    let outcome = engine
        .submit_result(m.id, SubmitterId::new("na-host"), b, "")
        .unwrap();
    assert!(matches!(outcome, SubmissionOutcome::Completed { winner, .. } if winner == b));
    assert_eq!(engine.tournament(t.id).unwrap().winner, Some(b));
}

#[test]
fn schedule_is_agreed_by_both_captains() {
    let f = bracket_of(4);
    let m = &f.round(Round::First)[0];
    let (a, b) = (m.competitor_1.unwrap(), m.competitor_2.unwrap());
    let at = Utc::now() + Duration::days(1);

    assert_eq!(f.engine.confirm_schedule(m.id, captain(a), at), Ok(false));
    let outsider = captain(f.teams[3]);
    assert_eq!(
        f.engine.confirm_schedule(m.id, outsider.clone(), at),
        Err(TournamentError::Unauthorized(outsider))
    );
    assert_eq!(f.engine.confirm_schedule(m.id, captain(b), at), Ok(true));

    let stored = f.engine.game_match(m.id).unwrap();
    assert_eq!(stored.status, MatchStatus::Scheduled);
    assert_eq!(stored.scheduled_at, Some(at));

    f.engine.submit_result(m.id, captain(a), a, "").unwrap();
    assert_eq!(
        f.engine.confirm_schedule(m.id, captain(b), at),
        Err(TournamentError::PreconditionFailed(Precondition::ResultsLocked))
    );
}
