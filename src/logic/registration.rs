//! Registration phase: open a tournament, register competitors, import rosters.

use crate::logic::Engine;
use crate::models::{Competitor, Precondition, Tournament, TournamentError, TournamentId};
use crate::store::Store;
use serde::Deserialize;
use std::io;
use uuid::Uuid;

impl<S: Store> Engine<S> {
    /// Create a tournament in Open state.
    pub fn open_tournament(
        &self,
        game_id: impl Into<String>,
        capacity: u32,
    ) -> Result<Tournament, TournamentError> {
        if capacity < 2 {
            return Err(Precondition::InvalidCapacity.into());
        }
        let tournament = Tournament::new(game_id, capacity);
        self.store.insert_tournament(tournament.clone())?;
        log::info!(
            "Opened tournament {} for game {} (capacity {})",
            tournament.id,
            tournament.game_id,
            tournament.capacity
        );
        Ok(tournament)
    }

    /// Register a competitor while the tournament is Open.
    pub fn register_competitor(
        &self,
        tournament_id: TournamentId,
        competitor: Competitor,
    ) -> Result<Tournament, TournamentError> {
        let tournament = self.store.update_tournament(tournament_id, |t| {
            t.register(competitor)?;
            Ok(t.clone())
        })?;
        log::debug!(
            "Registered {} in tournament {} ({}/{})",
            competitor,
            tournament_id,
            tournament.registered_count,
            tournament.capacity
        );
        Ok(tournament)
    }
}

#[derive(Deserialize)]
struct RosterRow {
    kind: String,
    id: Uuid,
}

/// Read a `kind,id` CSV roster (header row required), e.g.
///
/// ```text
/// kind,id
/// team,6f1c...
/// clan,0b9e...
/// ```
pub fn parse_competitors_csv<R: io::Read>(reader: R) -> Result<Vec<Competitor>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut competitors = Vec::new();
    for (idx, row) in rdr.deserialize::<RosterRow>().enumerate() {
        // Line 1 is the header.
        let line = idx + 2;
        let row = row.map_err(|e| TournamentError::InvalidImport(format!("line {}: {}", line, e)))?;
        let competitor = Competitor::from_parts(&row.kind, row.id).ok_or_else(|| {
            TournamentError::InvalidImport(format!("line {}: unknown kind '{}'", line, row.kind))
        })?;
        competitors.push(competitor);
    }
    Ok(competitors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roster_in_order() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let csv = format!("kind,id\nteam,{a}\n clan , {b}\n");
        let parsed = parse_competitors_csv(csv.as_bytes()).unwrap();
        assert_eq!(parsed, vec![Competitor::Team(a), Competitor::Clan(b)]);
    }

    #[test]
    fn reports_bad_line() {
        let csv = format!("kind,id\nteam,{}\nsquad,{}\n", Uuid::new_v4(), Uuid::new_v4());
        match parse_competitors_csv(csv.as_bytes()) {
            Err(TournamentError::InvalidImport(msg)) => assert!(msg.starts_with("line 3")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn reports_bad_uuid() {
        let csv = "kind,id\nteam,not-a-uuid\n";
        assert!(matches!(
            parse_competitors_csv(csv.as_bytes()),
            Err(TournamentError::InvalidImport(_))
        ));
    }
}
