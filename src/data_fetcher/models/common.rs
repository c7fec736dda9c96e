use serde::{Deserialize, Serialize};

/// Status class derived from the provider's short status code.
///
/// `Unknown` covers every code outside the three fixed sets; it is a real
/// state that sorts after everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    Live,
    Upcoming,
    Finished,
    Unknown,
}

impl MatchStatus {
    /// Rank used as the primary key of the priority sort.
    pub fn sort_rank(self) -> u8 {
        match self {
            MatchStatus::Live => 0,
            MatchStatus::Upcoming => 1,
            MatchStatus::Finished => 2,
            MatchStatus::Unknown => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
    /// First three characters of the name, uppercased. A display fallback only.
    pub short_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct League {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub country: Option<String>,
}

/// Canonical match value produced by the fixture normalizer.
///
/// Two matches are the same entity iff their `id`s are equal (see
/// [`Match::same_entity`]); `PartialEq` compares every field and answers
/// whether a re-render is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub home_team: Team,
    pub away_team: Team,
    pub home_score: u32,
    pub away_score: u32,
    pub league: League,
    /// Raw provider timestamp, timezone-qualified.
    pub kickoff_time: Option<String>,
    /// Local "HH:MM"; `None` when the raw timestamp did not parse.
    pub kickoff_time_formatted: Option<String>,
    pub match_minute: String,
    /// Long human-readable status from the provider, e.g. "Half Time".
    pub match_status: String,
    /// Provider short code the status class was derived from.
    pub status_code: String,
    pub status: MatchStatus,
}

impl Match {
    pub fn same_entity(&self, other: &Match) -> bool {
        self.id == other.id
    }

    pub fn is_live(&self) -> bool {
        self.status == MatchStatus::Live
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    pub fn is_upcoming(&self) -> bool {
        self.status == MatchStatus::Upcoming
    }

    pub fn involves_team(&self, team_id: i64) -> bool {
        self.home_team.id == team_id || self.away_team.id == team_id
    }

    /// Kickoff shown to the user, falling back to "TBD".
    pub fn display_kickoff(&self) -> &str {
        self.kickoff_time_formatted.as_deref().unwrap_or("TBD")
    }

    pub fn score_line(&self) -> String {
        format!("{}-{}", self.home_score, self.away_score)
    }
}

/// One row of a league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub rank: u32,
    pub team: Team,
    pub played: u32,
    pub win: u32,
    pub draw: u32,
    pub lose: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
    /// Chronological W/D/L sequence.
    pub form: String,
}

impl TeamStanding {
    /// The last five results, the only part of the form string that is displayed.
    pub fn recent_form(&self) -> &str {
        let count = self.form.chars().count();
        match self.form.char_indices().nth(count.saturating_sub(5)) {
            Some((start, _)) => &self.form[start..],
            None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_status_flags_are_exclusive() {
        for (status, live, finished, upcoming) in [
            (MatchStatus::Live, true, false, false),
            (MatchStatus::Finished, false, true, false),
            (MatchStatus::Upcoming, false, false, true),
            (MatchStatus::Unknown, false, false, false),
        ] {
            let mut m = TestDataBuilder::create_match(1, status);
            m.status = status;
            assert_eq!(m.is_live(), live);
            assert_eq!(m.is_finished(), finished);
            assert_eq!(m.is_upcoming(), upcoming);
        }
    }

    #[test]
    fn test_identity_versus_content_equality() {
        let first = TestDataBuilder::create_match(7, MatchStatus::Live);
        let mut second = first.clone();
        second.home_score = 3;

        assert!(first.same_entity(&second));
        assert_ne!(first, second);
        assert_eq!(first, first.clone());
    }

    #[test]
    fn test_display_kickoff_falls_back_to_tbd() {
        let mut m = TestDataBuilder::create_match(1, MatchStatus::Upcoming);
        m.kickoff_time_formatted = None;
        assert_eq!(m.display_kickoff(), "TBD");
        m.kickoff_time_formatted = Some("18:45".to_string());
        assert_eq!(m.display_kickoff(), "18:45");
    }

    #[test]
    fn test_recent_form_keeps_last_five() {
        let mut standing = TestDataBuilder::create_standing(1, "Arsenal", 30);
        standing.form = "WWDLWLLW".to_string();
        assert_eq!(standing.recent_form(), "LWLLW");
        standing.form = "WD".to_string();
        assert_eq!(standing.recent_form(), "WD");
        standing.form = String::new();
        assert_eq!(standing.recent_form(), "");
    }

    #[test]
    fn test_involves_team() {
        let m = TestDataBuilder::create_match(1, MatchStatus::Finished);
        assert!(m.involves_team(m.home_team.id));
        assert!(m.involves_team(m.away_team.id));
        assert!(!m.involves_team(-1));
    }
}
