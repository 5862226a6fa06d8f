//! Shared fixtures for integration tests.
#![allow(dead_code)]

use bracket_engine::{
    Bracket, CaptainDirectory, Competitor, Engine, EngineConfig, GameMatch, MatchId,
    MemoryStore, ReportingMode, ReportingParty, ResultSubmission, Round, Store,
    SubmissionOutcome, SubmitterId,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct Fixture {
    pub engine: Engine<MemoryStore>,
    pub directory: Arc<CaptainDirectory>,
    pub teams: Vec<Competitor>,
    pub bracket: Bracket,
}

pub fn captain(c: Competitor) -> SubmitterId {
    SubmitterId::new(format!("captain-{}", c.id()))
}

pub fn teams(n: usize) -> Vec<Competitor> {
    (0..n).map(|_| Competitor::Team(Uuid::new_v4())).collect()
}

/// Open a tournament, register `n` teams with one captain each and generate the bracket.
pub fn bracket_of(n: usize) -> Fixture {
    let directory = Arc::new(CaptainDirectory::new());
    let teams = teams(n);
    for &t in &teams {
        directory.assign(t, captain(t));
    }
    let engine = Engine::new(MemoryStore::new(), directory.clone(), EngineConfig::default());
    let tournament = engine.open_tournament("valorant", n as u32).unwrap();
    for &t in &teams {
        engine.register_competitor(tournament.id, t).unwrap();
    }
    let bracket = engine.generate_bracket(tournament.id, teams.clone()).unwrap();
    Fixture {
        engine,
        directory,
        teams,
        bracket,
    }
}

impl Fixture {
    pub fn round(&self, round: Round) -> Vec<GameMatch> {
        self.engine
            .store()
            .find_matches_by_bracket_and_round(self.bracket.id, round)
            .unwrap()
    }

    /// Both captains report `winner`. Returns the second (deciding) outcome.
    pub fn play(&self, game: &GameMatch, winner: Competitor) -> SubmissionOutcome {
        let one = game.competitor_1.unwrap();
        let two = game.competitor_2.unwrap();
        let first = self
            .engine
            .submit_result(game.id, captain(one), winner, "gg")
            .unwrap();
        assert_eq!(first, SubmissionOutcome::Pending);
        self.engine
            .submit_result(game.id, captain(two), winner, "")
            .unwrap()
    }

    /// Complete a match through the consensus rules without triggering advancement.
    pub fn settle_quietly(&self, id: MatchId, winner: Competitor) {
        self.engine
            .store()
            .update_match(id, |m| {
                for party in ["left", "right"] {
                    m.record_submission(
                        ResultSubmission {
                            submitter: SubmitterId::new(party),
                            party: ReportingParty::new(party),
                            claimed_winner: winner,
                            submitted_at: Utc::now(),
                            notes: String::new(),
                        },
                        2,
                        ReportingMode::SelfReport,
                    )?;
                }
                Ok(())
            })
            .unwrap();
    }
}
