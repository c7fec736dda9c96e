use chrono::{Local, TimeZone};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::data_fetcher::models::{
    League, Match, RawFixture, RawStandingRow, RawStandingsEntry, RawTeam, Team, TeamStanding,
};

use super::match_status::{classify_status, match_minute};
use super::time_formatting::format_kickoff_in;

/// Display fallback: the first three characters of the name, uppercased.
///
/// Not an abbreviation. Short or non-ASCII names produce whatever the first
/// three chars are; collisions are not handled.
pub fn short_name(name: &str) -> String {
    name.chars().take(3).collect::<String>().to_uppercase()
}

pub fn team_from_raw(raw: RawTeam) -> Team {
    Team {
        short_name: short_name(&raw.name),
        id: raw.id,
        name: raw.name,
        logo: raw.logo,
    }
}

/// Maps a raw provider fixture into the canonical [`Match`], formatting the
/// kickoff in the given timezone.
///
/// Total over any record that deserialized: missing goals become 0, a missing
/// or unparsable timestamp leaves `kickoff_time_formatted` empty while the raw
/// string is kept.
pub fn normalize_fixture_in<Tz: TimeZone>(raw: RawFixture, tz: &Tz) -> Match
where
    Tz::Offset: std::fmt::Display,
{
    let short_code = raw.fixture.status.short.unwrap_or_default();
    let status = classify_status(&short_code);

    let kickoff_time = raw.fixture.date;
    let kickoff_time_formatted = kickoff_time
        .as_deref()
        .and_then(|raw_time| format_kickoff_in(raw_time, tz));

    let match_minute = match_minute(
        status,
        &short_code,
        raw.fixture.status.elapsed,
        kickoff_time_formatted.as_deref(),
    );

    Match {
        id: raw.fixture.id,
        home_team: team_from_raw(raw.teams.home),
        away_team: team_from_raw(raw.teams.away),
        home_score: raw.goals.home.unwrap_or(0),
        away_score: raw.goals.away.unwrap_or(0),
        league: League {
            id: raw.league.id,
            name: raw.league.name,
            logo: raw.league.logo,
            country: raw.league.country,
        },
        kickoff_time,
        kickoff_time_formatted,
        match_minute,
        match_status: raw.fixture.status.long.unwrap_or_default(),
        status_code: short_code,
        status,
    }
}

/// [`normalize_fixture_in`] using the local timezone.
pub fn normalize_fixture(raw: RawFixture) -> Match {
    normalize_fixture_in(raw, &Local)
}

/// Deserializes each record independently, dropping the ones that do not fit.
///
/// One malformed record never fails the whole response.
pub fn parse_records<T: DeserializeOwned>(values: Vec<serde_json::Value>, context: &str) -> Vec<T> {
    let total = values.len();
    let parsed: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed {context} record #{index}: {e}");
                None
            }
        })
        .collect();

    if parsed.len() != total {
        debug!(
            "Parsed {} of {} {context} records",
            parsed.len(),
            total
        );
    }
    parsed
}

/// Parses and normalizes a list of raw fixture values, skipping malformed ones.
pub fn normalize_fixtures(values: Vec<serde_json::Value>) -> Vec<Match> {
    parse_records::<RawFixture>(values, "fixture")
        .into_iter()
        .map(normalize_fixture)
        .collect()
}

/// Flattens provider standings (one table per group) into rank-ordered rows.
///
/// Rows are parsed one by one; a malformed row is skipped without losing the
/// rest of its table.
pub fn standings_from_raw(entries: Vec<RawStandingsEntry>) -> Vec<TeamStanding> {
    entries
        .into_iter()
        .flat_map(|entry| entry.league.standings.into_iter())
        .flat_map(|group| parse_records::<RawStandingRow>(group, "standing row"))
        .map(|row| TeamStanding {
            rank: row.rank,
            team: team_from_raw(row.team),
            played: row.all.played.unwrap_or(0),
            win: row.all.win.unwrap_or(0),
            draw: row.all.draw.unwrap_or(0),
            lose: row.all.lose.unwrap_or(0),
            goals_for: row.all.goals.goals_for.unwrap_or(0),
            goals_against: row.all.goals.against.unwrap_or(0),
            goal_difference: row.goals_diff,
            points: row.points,
            form: row.form.unwrap_or_default(),
        })
        .collect()
}
