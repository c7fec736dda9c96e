use serde::{Deserialize, Serialize};

/// Envelope every provider endpoint wraps its payload in.
///
/// `errors` is an empty array on success and an object keyed by error kind
/// otherwise, so it stays untyped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub errors: serde_json::Value,
    #[serde(default)]
    pub results: Option<u32>,
    #[serde(default = "Vec::new")]
    pub response: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawStatus {
    #[serde(default)]
    pub long: Option<String>,
    #[serde(default)]
    pub short: Option<String>,
    #[serde(default)]
    pub elapsed: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFixtureInfo {
    pub id: i64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub status: RawStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLeague {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub season: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTeam {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTeams {
    pub home: RawTeam,
    pub away: RawTeam,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawGoals {
    #[serde(default)]
    pub home: Option<u32>,
    #[serde(default)]
    pub away: Option<u32>,
}

/// One fixture record as returned by `/fixtures`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFixture {
    pub fixture: RawFixtureInfo,
    pub league: RawLeague,
    pub teams: RawTeams,
    #[serde(default)]
    pub goals: RawGoals,
}
