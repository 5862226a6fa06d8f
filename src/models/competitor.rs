//! Competitor reference: a team or a clan, in one canonical shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Who plays in a match slot. Resolved once at ingestion; the rest of the engine
/// never branches on team-vs-clan payloads.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Competitor {
    Team(Uuid),
    Clan(Uuid),
}

impl Competitor {
    pub fn id(&self) -> Uuid {
        match self {
            Competitor::Team(id) | Competitor::Clan(id) => *id,
        }
    }

    /// Parse a `kind` column value (`team` / `clan`) plus an id.
    pub fn from_parts(kind: &str, id: Uuid) -> Option<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "team" => Some(Competitor::Team(id)),
            "clan" => Some(Competitor::Clan(id)),
            _ => None,
        }
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Competitor::Team(id) => write!(f, "team:{}", id),
            Competitor::Clan(id) => write!(f, "clan:{}", id),
        }
    }
}

/// Identity of whoever sends a submission (wallet address, host account, ...).
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmitterId(pub String);

impl SubmitterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The party an attestation counts for: a competitor in self-report mode,
/// a region in host-confirmation mode. At most one submission per party per match.
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportingParty(pub String);

impl ReportingParty {
    pub fn new(party: impl Into<String>) -> Self {
        Self(party.into())
    }

    pub fn for_competitor(competitor: Competitor) -> Self {
        Self(competitor.to_string())
    }
}

impl fmt::Display for ReportingParty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
