//! Engine configuration: reporter policy, seeding and bracket size limits.
//! Read from env with defaults (BRACKET_* variables).

use crate::models::MAX_BRACKET_SIZE;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Who attests match results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingMode {
    /// Each competitor reports for itself.
    #[default]
    SelfReport,
    /// Each competitor's regional host reports.
    HostConfirmation,
}

impl FromStr for ReportingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "self_report" => Ok(ReportingMode::SelfReport),
            "host_confirmation" => Ok(ReportingMode::HostConfirmation),
            other => Err(format!("unknown reporting mode '{}'", other)),
        }
    }
}

/// How the first round is ordered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seeding {
    /// Registration order as given.
    #[default]
    Registration,
    /// Random shuffle.
    Random,
}

impl FromStr for Seeding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "registration" => Ok(Seeding::Registration),
            "random" => Ok(Seeding::Random),
            other => Err(format!("unknown seeding '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_min_competitors")]
    pub min_competitors: usize,
    #[serde(default = "default_max_competitors")]
    pub max_competitors: usize,
    /// Distinct reporting parties that must agree before a result is final.
    #[serde(default = "default_required_reporters")]
    pub required_reporters: usize,
    #[serde(default)]
    pub reporting_mode: ReportingMode,
    #[serde(default)]
    pub seeding: Seeding,
}

fn default_min_competitors() -> usize {
    2
}

fn default_max_competitors() -> usize {
    MAX_BRACKET_SIZE
}

fn default_required_reporters() -> usize {
    2
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_competitors: default_min_competitors(),
            max_competitors: default_max_competitors(),
            required_reporters: default_required_reporters(),
            reporting_mode: ReportingMode::default(),
            seeding: Seeding::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `BRACKET_MIN_COMPETITORS`, `BRACKET_MAX_COMPETITORS`,
    /// `BRACKET_REQUIRED_REPORTERS`, `BRACKET_REPORTING_MODE` and `BRACKET_SEEDING`.
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with variables read through `lookup`.
    ///
    /// Sizes end up with `2 <= min_competitors <= max_competitors <= MAX_BRACKET_SIZE`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let min_competitors = parse_or(&lookup, "BRACKET_MIN_COMPETITORS", default_min_competitors())
            .clamp(2, MAX_BRACKET_SIZE);
        let max_competitors = parse_or(&lookup, "BRACKET_MAX_COMPETITORS", default_max_competitors())
            .clamp(min_competitors, MAX_BRACKET_SIZE);
        Self {
            min_competitors,
            max_competitors,
            required_reporters: parse_or(
                &lookup,
                "BRACKET_REQUIRED_REPORTERS",
                default_required_reporters(),
            )
            .max(1),
            reporting_mode: parse_or(&lookup, "BRACKET_REPORTING_MODE", ReportingMode::default()),
            seeding: parse_or(&lookup, "BRACKET_SEEDING", Seeding::default()),
        }
    }

    pub fn with_reporting_mode(mut self, mode: ReportingMode) -> Self {
        self.reporting_mode = mode;
        self
    }

    pub fn with_seeding(mut self, seeding: Seeding) -> Self {
        self.seeding = seeding;
        self
    }

    pub fn with_required_reporters(mut self, required: usize) -> Self {
        self.required_reporters = required.max(1);
        self
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}; using default", key, raw);
            default
        }),
        None => default,
    }
}
