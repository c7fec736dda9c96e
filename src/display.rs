//! Text rendering of match lists, standings and team lists.

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::collections::BTreeSet;
use std::io::Write;

use crate::data_fetcher::models::{Match, MatchStatus, Team, TeamStanding};
use crate::error::AppError;
use crate::pipeline::MatchFilter;

const HEADER_FG: Color = Color::Cyan;
const LIVE_FG: Color = Color::Green;
const FINISHED_FG: Color = Color::Grey;
const UNKNOWN_FG: Color = Color::Yellow;
const FAVORITE_FG: Color = Color::Yellow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// ANSI colors on; `false` renders plain text.
    pub colored: bool,
}

impl DisplayOptions {
    pub fn plain() -> Self {
        Self { colored: false }
    }

    pub fn colored() -> Self {
        Self { colored: true }
    }
}

fn minute_color(status: MatchStatus) -> Option<Color> {
    match status {
        MatchStatus::Live => Some(LIVE_FG),
        MatchStatus::Finished => Some(FINISHED_FG),
        MatchStatus::Unknown => Some(UNKNOWN_FG),
        MatchStatus::Upcoming => None,
    }
}

fn print_colored<W: Write>(
    out: &mut W,
    text: &str,
    color: Option<Color>,
    options: DisplayOptions,
) -> Result<(), AppError> {
    match color {
        Some(color) if options.colored => {
            queue!(out, SetForegroundColor(color), Print(text), ResetColor)?;
        }
        _ => queue!(out, Print(text))?,
    }
    Ok(())
}

fn print_header<W: Write>(out: &mut W, text: &str, options: DisplayOptions) -> Result<(), AppError> {
    if options.colored {
        queue!(
            out,
            SetForegroundColor(HEADER_FG),
            SetAttribute(Attribute::Bold),
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print("\n")
        )?;
    } else {
        queue!(out, Print(text), Print("\n"))?;
    }
    Ok(())
}

/// One match as `"{minute:>5}  {home} {hs}-{as} {away}  [{league}]"`.
///
/// # Examples
///
/// ```rust
/// use scoreline::display::format_match_line;
/// use scoreline::testing_utils::TestDataBuilder;
/// use scoreline::data_fetcher::models::MatchStatus;
///
/// let m = TestDataBuilder::create_match(1, MatchStatus::Finished);
/// assert_eq!(
///     format_match_line(&m),
///     "   FT  Home Team 1 2-1 Away Team 1  [Premier League]"
/// );
/// ```
pub fn format_match_line(m: &Match) -> String {
    format!(
        "{:>5}  {} {} {}  [{}]",
        m.match_minute,
        m.home_team.name,
        m.score_line(),
        m.away_team.name,
        m.league.name
    )
}

fn league_header(m: &Match) -> String {
    match &m.league.country {
        Some(country) if !country.is_empty() => format!("{} ({country})", m.league.name),
        _ => m.league.name.clone(),
    }
}

/// Renders matches in the given order, printing a league header whenever the
/// league differs from the previous line's.
pub fn render_matches<W: Write>(
    out: &mut W,
    matches: &[Match],
    options: DisplayOptions,
) -> Result<(), AppError> {
    let mut current_league = None;
    for m in matches {
        if current_league != Some(m.league.id) {
            if current_league.is_some() {
                queue!(out, Print("\n"))?;
            }
            print_header(out, &league_header(m), options)?;
            current_league = Some(m.league.id);
        }

        print_colored(out, &format!("{:>5}", m.match_minute), minute_color(m.status), options)?;
        queue!(
            out,
            Print(format!(
                "  {} {} {}  [{}]\n",
                m.home_team.name,
                m.score_line(),
                m.away_team.name,
                m.league.name
            ))
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Multi-line view of a single match.
pub fn render_match_detail<W: Write>(
    out: &mut W,
    m: &Match,
    options: DisplayOptions,
) -> Result<(), AppError> {
    print_header(out, &league_header(m), options)?;
    queue!(
        out,
        Print(format!(
            "{} ({}) {} {} ({})\n",
            m.home_team.name,
            m.home_team.short_name,
            m.score_line(),
            m.away_team.name,
            m.away_team.short_name
        ))
    )?;
    print_colored(
        out,
        &format!("{} [{}]", m.match_status, m.match_minute),
        minute_color(m.status),
        options,
    )?;
    queue!(out, Print(format!("\nKickoff: {}\n", m.display_kickoff())))?;
    out.flush()?;
    Ok(())
}

/// Standings as a fixed-width table; form shows the last five results.
pub fn render_standings<W: Write>(
    out: &mut W,
    standings: &[TeamStanding],
    options: DisplayOptions,
) -> Result<(), AppError> {
    print_header(
        out,
        &format!(
            "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>7} {:>4} {:>4}  Form",
            "#", "Team", "P", "W", "D", "L", "Goals", "GD", "Pts"
        ),
        options,
    )?;
    for row in standings {
        queue!(
            out,
            Print(format!(
                "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>7} {:>+4} {:>4}  {}\n",
                row.rank,
                row.team.name,
                row.played,
                row.win,
                row.draw,
                row.lose,
                format!("{}:{}", row.goals_for, row.goals_against),
                row.goal_difference,
                row.points,
                row.recent_form()
            ))
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Teams with their ids, marking favorites with `*`.
pub fn render_teams<W: Write>(
    out: &mut W,
    teams: &[Team],
    favorites: &BTreeSet<i64>,
    options: DisplayOptions,
) -> Result<(), AppError> {
    for team in teams {
        queue!(
            out,
            Print(format!("{:>7}  {} ({})", team.id, team.name, team.short_name))
        )?;
        if favorites.contains(&team.id) {
            print_colored(out, " *", Some(FAVORITE_FG), options)?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()?;
    Ok(())
}

/// Message shown when a filtered list is empty.
pub fn empty_message(filter: MatchFilter) -> &'static str {
    match filter {
        MatchFilter::All => "No matches found",
        MatchFilter::Live => "No live matches right now",
        MatchFilter::Finished => "No finished matches",
        MatchFilter::Upcoming => "No upcoming matches",
        MatchFilter::Today => "No matches today",
    }
}
