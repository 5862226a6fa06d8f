//! Reporter directories: who may attest results for a match, and which party they speak for.
//!
//! Identity and roster management live outside the engine; these in-memory directories
//! hold the snapshot the engine needs. Both variants map a submitter to a
//! [`ReportingParty`], so the consensus rules never branch on the variant.

use crate::models::{Competitor, GameMatch, ReportingParty, SubmitterId};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

/// Authorization collaborator for result and schedule submissions.
pub trait ReporterDirectory: Send + Sync {
    /// The party `submitter` attests for in `game`, or None if they are not a reporter.
    fn reporting_party(&self, game: &GameMatch, submitter: &SubmitterId) -> Option<ReportingParty>;
}

fn slots(game: &GameMatch) -> impl Iterator<Item = Competitor> + '_ {
    game.competitor_1.iter().chain(game.competitor_2.iter()).copied()
}

/// Self-report: each competitor's captains (wallets) report for that competitor.
#[derive(Debug, Default)]
pub struct CaptainDirectory {
    captains: RwLock<HashMap<Competitor, HashSet<SubmitterId>>>,
}

impl CaptainDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&self, competitor: Competitor, captain: SubmitterId) {
        self.captains
            .write()
            .entry(competitor)
            .or_default()
            .insert(captain);
    }

    pub fn revoke(&self, competitor: Competitor, captain: &SubmitterId) -> bool {
        self.captains
            .write()
            .get_mut(&competitor)
            .is_some_and(|set| set.remove(captain))
    }
}

impl ReporterDirectory for CaptainDirectory {
    fn reporting_party(&self, game: &GameMatch, submitter: &SubmitterId) -> Option<ReportingParty> {
        let captains = self.captains.read();
        slots(game)
            .find(|c| captains.get(c).is_some_and(|set| set.contains(submitter)))
            .map(ReportingParty::for_competitor)
    }
}

/// Host confirmation: each competitor belongs to a region; the region's hosts report.
#[derive(Debug, Default)]
pub struct RegionalHostDirectory {
    regions: RwLock<HashMap<Competitor, String>>,
    hosts: RwLock<HashMap<String, HashSet<SubmitterId>>>,
}

impl RegionalHostDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_region(&self, competitor: Competitor, region: impl Into<String>) {
        self.regions.write().insert(competitor, region.into());
    }

    pub fn add_host(&self, region: impl Into<String>, host: SubmitterId) {
        self.hosts
            .write()
            .entry(region.into())
            .or_default()
            .insert(host);
    }
}

impl ReporterDirectory for RegionalHostDirectory {
    fn reporting_party(&self, game: &GameMatch, submitter: &SubmitterId) -> Option<ReportingParty> {
        let regions = self.regions.read();
        let hosts = self.hosts.read();
        slots(game)
            .filter_map(|c| regions.get(&c))
            .find(|region| hosts.get(*region).is_some_and(|set| set.contains(submitter)))
            .map(|region| ReportingParty::new(region.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Round;
    use uuid::Uuid;

    fn game() -> (GameMatch, Competitor, Competitor) {
        let (a, b) = (Competitor::Team(Uuid::new_v4()), Competitor::Clan(Uuid::new_v4()));
        (GameMatch::new(Uuid::new_v4(), Round::First, 0, a, b), a, b)
    }

    #[test]
    fn captains_report_for_their_competitor() {
        let (m, a, b) = game();
        let dir = CaptainDirectory::new();
        dir.assign(a, SubmitterId::new("0xaaa"));
        dir.assign(b, SubmitterId::new("0xbbb"));
        dir.assign(Competitor::Team(Uuid::new_v4()), SubmitterId::new("0xccc"));

        assert_eq!(
            dir.reporting_party(&m, &SubmitterId::new("0xbbb")),
            Some(ReportingParty::for_competitor(b))
        );
        assert_eq!(dir.reporting_party(&m, &SubmitterId::new("0xccc")), None);
        assert!(dir.revoke(a, &SubmitterId::new("0xaaa")));
        assert_eq!(dir.reporting_party(&m, &SubmitterId::new("0xaaa")), None);
    }

    #[test]
    fn hosts_report_for_their_region() {
        let (m, a, b) = game();
        let dir = RegionalHostDirectory::new();
        dir.set_region(a, "eu");
        dir.set_region(b, "na");
        dir.add_host("eu", SubmitterId::new("host-eu-1"));
        dir.add_host("eu", SubmitterId::new("host-eu-2"));
        dir.add_host("apac", SubmitterId::new("host-apac"));

        assert_eq!(
            dir.reporting_party(&m, &SubmitterId::new("host-eu-2")),
            Some(ReportingParty::new("eu"))
        );
        assert_eq!(dir.reporting_party(&m, &SubmitterId::new("host-apac")), None);
    }
}
