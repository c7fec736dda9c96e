use chrono::Utc;
use serde_json::{Value, json};

use crate::data_fetcher::models::{League, Match, MatchStatus, Team, TeamStanding};
use crate::data_fetcher::processors::{format_kickoff_in, short_name};

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

fn league_name(league_id: i64) -> String {
    match league_id {
        2 => "UEFA Champions League",
        3 => "UEFA Europa League",
        39 => "Premier League",
        61 => "Ligue 1",
        78 => "Bundesliga",
        135 => "Serie A",
        140 => "La Liga",
        203 => "Süper Lig",
        419 => "Premyer Liqa",
        _ => "Test League",
    }
    .to_string()
}

fn long_status(short: &str) -> &'static str {
    match short {
        "NS" => "Not Started",
        "TBD" => "Time To Be Defined",
        "1H" => "First Half",
        "HT" => "Halftime",
        "2H" => "Second Half",
        "FT" => "Match Finished",
        "PEN" => "Match Finished After Penalty",
        _ => "Other",
    }
}

fn status_code(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Live => "2H",
        MatchStatus::Upcoming => "NS",
        MatchStatus::Finished => "FT",
        MatchStatus::Unknown => "SUSP",
    }
}

impl TestDataBuilder {
    pub fn create_team(id: i64, name: &str) -> Team {
        Team {
            id,
            name: name.to_string(),
            logo: Some(format!("https://media.example.com/teams/{id}.png")),
            short_name: short_name(name),
        }
    }

    /// A match in the Premier League between teams `id * 10 + 1` and `id * 10 + 2`.
    pub fn create_match(id: i64, status: MatchStatus) -> Match {
        Self::match_at(id, status, "2024-01-15T20:00:00+00:00", 39)
    }

    /// A match with an explicit kickoff string and league. The kickoff is
    /// formatted in UTC; an unparsable string leaves it unformatted.
    pub fn match_at(id: i64, status: MatchStatus, kickoff: &str, league_id: i64) -> Match {
        let code = status_code(status);
        let kickoff_time_formatted = format_kickoff_in(kickoff, &Utc);
        let match_minute = match status {
            MatchStatus::Live => "67'".to_string(),
            MatchStatus::Upcoming => kickoff_time_formatted
                .clone()
                .unwrap_or_else(|| "TBD".to_string()),
            _ => code.to_string(),
        };
        let (home_score, away_score) = match status {
            MatchStatus::Live | MatchStatus::Finished => (2, 1),
            _ => (0, 0),
        };

        Match {
            id,
            home_team: Self::create_team(id * 10 + 1, &format!("Home Team {id}")),
            away_team: Self::create_team(id * 10 + 2, &format!("Away Team {id}")),
            home_score,
            away_score,
            league: League {
                id: league_id,
                name: league_name(league_id),
                logo: None,
                country: None,
            },
            kickoff_time: Some(kickoff.to_string()),
            kickoff_time_formatted,
            match_minute,
            match_status: long_status(code).to_string(),
            status_code: code.to_string(),
            status,
        }
    }

    pub fn create_standing(rank: u32, team_name: &str, points: u32) -> TeamStanding {
        TeamStanding {
            rank,
            team: Self::create_team(i64::from(rank) * 100, team_name),
            played: 10,
            win: points / 3,
            draw: points % 3,
            lose: 10u32.saturating_sub(points / 3 + points % 3),
            goals_for: points,
            goals_against: 10,
            goal_difference: points as i32 - 10,
            points,
            form: "WWDLW".to_string(),
        }
    }

    /// Raw provider fixture JSON between teams `id * 10 + 1` and `id * 10 + 2`.
    pub fn raw_fixture_json(
        id: i64,
        short: &str,
        elapsed: Option<u32>,
        date: Option<&str>,
        league_id: i64,
    ) -> Value {
        let goals = match short {
            "NS" | "TBD" => json!({"home": null, "away": null}),
            _ => json!({"home": 1, "away": 0}),
        };
        json!({
            "fixture": {
                "id": id,
                "timezone": "UTC",
                "date": date,
                "status": {"long": long_status(short), "short": short, "elapsed": elapsed}
            },
            "league": {"id": league_id, "name": league_name(league_id), "season": 2024},
            "teams": {
                "home": {"id": id * 10 + 1, "name": format!("Home Team {id}")},
                "away": {"id": id * 10 + 2, "name": format!("Away Team {id}")}
            },
            "goals": goals
        })
    }

    /// Raw fixture between two given team ids, kicking off at a fixed time.
    pub fn fixture_between(id: i64, short: &str, home_id: i64, away_id: i64, league_id: i64) -> Value {
        let mut fixture = Self::raw_fixture_json(id, short, None, Some("2024-01-15T20:00:00+00:00"), league_id);
        fixture["teams"] = json!({
            "home": {"id": home_id, "name": format!("Team {home_id}")},
            "away": {"id": away_id, "name": format!("Team {away_id}")}
        });
        fixture
    }

    /// Finished raw fixture between two given team ids at `date`.
    pub fn fixture_at(id: i64, home_id: i64, away_id: i64, date: &str, league_id: i64) -> Value {
        let mut fixture = Self::fixture_between(id, "FT", home_id, away_id, league_id);
        fixture["fixture"]["date"] = json!(date);
        fixture
    }

    /// One `/teams` response entry.
    pub fn raw_team_json(id: i64, name: &str) -> Value {
        json!({
            "team": {"id": id, "name": name, "code": short_name(name), "country": "Testland",
                     "logo": format!("https://media.example.com/teams/{id}.png")},
            "venue": {"id": 1, "name": "Test Arena"}
        })
    }

    /// Wraps records in a successful provider envelope.
    pub fn envelope(records: Vec<Value>) -> Value {
        json!({
            "get": "fixtures",
            "parameters": {},
            "errors": [],
            "results": records.len(),
            "paging": {"current": 1, "total": 1},
            "response": records
        })
    }
}

/// Consistency checks for normalized data
pub struct PropertyTesting;

impl PropertyTesting {
    /// Validates that a match is internally consistent
    pub fn validate_match(m: &Match) -> Result<(), String> {
        if m.home_team.name.is_empty() || m.away_team.name.is_empty() {
            return Err(format!("Match {} has an unnamed team", m.id));
        }

        if m.home_team.id == m.away_team.id {
            return Err(format!("Match {} has the same team on both sides", m.id));
        }

        let flags = [m.is_live(), m.is_finished(), m.is_upcoming()];
        let set = flags.iter().filter(|flag| **flag).count();
        match m.status {
            MatchStatus::Unknown if set != 0 => {
                return Err(format!("Unknown-status match {} has a status flag set", m.id));
            }
            MatchStatus::Live | MatchStatus::Finished | MatchStatus::Upcoming if set != 1 => {
                return Err(format!("Match {} has {set} status flags set", m.id));
            }
            _ => {}
        }

        if m.kickoff_time_formatted.is_some() && m.kickoff_time.is_none() {
            return Err(format!("Match {} has a formatted kickoff but no raw one", m.id));
        }

        if m.match_minute.is_empty() && !m.status_code.is_empty() {
            return Err(format!("Match {} has no minute display", m.id));
        }

        Ok(())
    }

    /// Validates that a list is free of duplicate match ids
    pub fn validate_unique_ids(matches: &[Match]) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for m in matches {
            if !seen.insert(m.id) {
                return Err(format!("Duplicate match id {}", m.id));
            }
        }
        Ok(())
    }
}
