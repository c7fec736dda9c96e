use serde::{Deserialize, Serialize};

use super::fixtures::RawTeam;

/// One entry of the `/teams` response (league roster or search result).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTeamEntry {
    pub team: RawTeamDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTeamDetail {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

impl From<RawTeamDetail> for RawTeam {
    fn from(detail: RawTeamDetail) -> Self {
        RawTeam {
            id: detail.id,
            name: detail.name,
            logo: detail.logo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_entry_ignores_venue() {
        let json = r#"{
            "team": {"id": 42, "name": "Arsenal", "code": "ARS", "country": "England",
                     "logo": "https://media.example.com/teams/42.png"},
            "venue": {"id": 494, "name": "Emirates Stadium"}
        }"#;
        let entry: RawTeamEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.team.id, 42);
        assert_eq!(entry.team.code.as_deref(), Some("ARS"));

        let raw: RawTeam = entry.team.into();
        assert_eq!(raw.name, "Arsenal");
    }
}
