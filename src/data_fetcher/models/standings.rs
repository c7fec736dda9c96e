use serde::{Deserialize, Serialize};

use super::fixtures::RawTeam;

/// One entry of the `/standings` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStandingsEntry {
    pub league: RawStandingsLeague,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStandingsLeague {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub season: Option<i32>,
    /// One table per group; single-table leagues have exactly one. Rows stay
    /// untyped so a malformed row can be dropped on its own.
    #[serde(default)]
    pub standings: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStandingRow {
    pub rank: u32,
    pub team: RawTeam,
    #[serde(default)]
    pub points: u32,
    #[serde(rename = "goalsDiff", default)]
    pub goals_diff: i32,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub all: RawStandingRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawStandingRecord {
    #[serde(default)]
    pub played: Option<u32>,
    #[serde(default)]
    pub win: Option<u32>,
    #[serde(default)]
    pub draw: Option<u32>,
    #[serde(default)]
    pub lose: Option<u32>,
    #[serde(default)]
    pub goals: RawStandingGoals,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawStandingGoals {
    #[serde(rename = "for", default)]
    pub goals_for: Option<u32>,
    #[serde(default)]
    pub against: Option<u32>,
}
