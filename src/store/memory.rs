//! In-memory store: one lock per collection.

use crate::models::{
    Bracket, BracketId, EntityRef, GameMatch, MatchId, Round, StoreError, Tournament,
    TournamentError, TournamentId,
};
use crate::store::Store;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Default)]
pub struct MemoryStore {
    tournaments: RwLock<HashMap<TournamentId, Tournament>>,
    brackets: RwLock<HashMap<BracketId, Bracket>>,
    matches: RwLock<HashMap<MatchId, GameMatch>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn match_count(&self) -> usize {
        self.matches.read().len()
    }
}

fn insert_new<K: Eq + Hash + Copy + Into<uuid::Uuid>, V>(
    map: &RwLock<HashMap<K, V>>,
    id: K,
    value: V,
) -> Result<(), StoreError> {
    let mut g = map.write();
    if g.contains_key(&id) {
        return Err(StoreError::DuplicateKey(id.into()));
    }
    g.insert(id, value);
    Ok(())
}

/// Apply `f` to a copy under the collection's write lock; keep it only on success.
fn update_in<K, V, T, F>(
    map: &RwLock<HashMap<K, V>>,
    id: K,
    missing: EntityRef,
    f: F,
) -> Result<T, TournamentError>
where
    K: Eq + Hash,
    V: Clone,
    F: FnOnce(&mut V) -> Result<T, TournamentError>,
{
    let mut g = map.write();
    let current = g.get_mut(&id).ok_or(TournamentError::NotFound(missing))?;
    let mut draft = current.clone();
    let out = f(&mut draft)?;
    *current = draft;
    Ok(out)
}

impl Store for MemoryStore {
    fn find_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError> {
        Ok(self.tournaments.read().get(&id).cloned())
    }

    fn insert_tournament(&self, tournament: Tournament) -> Result<(), StoreError> {
        insert_new(&self.tournaments, tournament.id, tournament)
    }

    fn update_tournament<T, F>(&self, id: TournamentId, f: F) -> Result<T, TournamentError>
    where
        F: FnOnce(&mut Tournament) -> Result<T, TournamentError>,
    {
        update_in(&self.tournaments, id, EntityRef::Tournament(id), f)
    }

    fn find_bracket(&self, id: BracketId) -> Result<Option<Bracket>, StoreError> {
        Ok(self.brackets.read().get(&id).cloned())
    }

    fn insert_bracket(&self, bracket: Bracket) -> Result<(), StoreError> {
        insert_new(&self.brackets, bracket.id, bracket)
    }

    fn update_bracket<T, F>(&self, id: BracketId, f: F) -> Result<T, TournamentError>
    where
        F: FnOnce(&mut Bracket) -> Result<T, TournamentError>,
    {
        update_in(&self.brackets, id, EntityRef::Bracket(id), f)
    }

    fn find_match(&self, id: MatchId) -> Result<Option<GameMatch>, StoreError> {
        Ok(self.matches.read().get(&id).cloned())
    }

    fn update_match<T, F>(&self, id: MatchId, f: F) -> Result<T, TournamentError>
    where
        F: FnOnce(&mut GameMatch) -> Result<T, TournamentError>,
    {
        update_in(&self.matches, id, EntityRef::Match(id), f)
    }

    fn find_matches_by_bracket_and_round(
        &self,
        bracket_id: BracketId,
        round: Round,
    ) -> Result<Vec<GameMatch>, StoreError> {
        let mut found: Vec<GameMatch> = self
            .matches
            .read()
            .values()
            .filter(|m| m.bracket_id == bracket_id && m.round == round)
            .cloned()
            .collect();
        found.sort_by_key(|m| m.slot);
        Ok(found)
    }

    fn find_matches_by_bracket(&self, bracket_id: BracketId) -> Result<Vec<GameMatch>, StoreError> {
        let mut found: Vec<GameMatch> = self
            .matches
            .read()
            .values()
            .filter(|m| m.bracket_id == bracket_id)
            .cloned()
            .collect();
        found.sort_by_key(|m| (m.round, m.slot));
        Ok(found)
    }

    fn insert_round(
        &self,
        bracket_id: BracketId,
        round: Round,
        matches: Vec<GameMatch>,
    ) -> Result<bool, StoreError> {
        let mut g = self.matches.write();
        if g
            .values()
            .any(|m| m.bracket_id == bracket_id && m.round == round)
        {
            return Ok(false);
        }
        if let Some(dup) = matches.iter().find(|m| g.contains_key(&m.id)) {
            return Err(StoreError::DuplicateKey(dup.id));
        }
        for m in matches {
            g.insert(m.id, m);
        }
        Ok(true)
    }
}
