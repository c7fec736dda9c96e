use std::cmp::Reverse;

use crate::constants::leagues::{
    DEFAULT_IMPORTANCE, EUROPA_LEAGUE_PLAYOFFS_IMPORTANCE, EUROPA_LEAGUE_PLAYOFFS_NAME, IMPORTANCE,
};
use crate::data_fetcher::models::{League, Match};
use crate::data_fetcher::processors::kickoff_instant;

/// Importance rank of a league; lower sorts first.
///
/// The play-off rounds of the Europa League are filed by the provider under
/// their own name, so they are recognized by name rather than id.
///
/// # Examples
///
/// ```rust
/// use scoreline::data_fetcher::models::League;
/// use scoreline::pipeline::league_importance;
///
/// let ucl = League { id: 2, name: "UEFA Champions League".into(), ..League::default() };
/// let other = League { id: 999, name: "Somewhere".into(), ..League::default() };
/// assert_eq!(league_importance(&ucl), 0);
/// assert_eq!(league_importance(&other), 10);
/// ```
pub fn league_importance(league: &League) -> u8 {
    if league.name == EUROPA_LEAGUE_PLAYOFFS_NAME {
        return EUROPA_LEAGUE_PLAYOFFS_IMPORTANCE;
    }
    IMPORTANCE
        .iter()
        .find(|(id, _)| *id == league.id)
        .map_or(DEFAULT_IMPORTANCE, |(_, rank)| *rank)
}

/// Kickoff as epoch milliseconds; missing or unparsable sorts as the latest
/// possible instant.
fn kickoff_key(m: &Match) -> i64 {
    kickoff_instant(m.kickoff_time.as_deref()).map_or(i64::MAX, |dt| dt.timestamp_millis())
}

/// Stable three-key ordering used for every combined match list:
/// status class, then kickoff ascending, then league importance.
pub fn priority_sort(matches: &mut [Match]) {
    matches.sort_by_cached_key(|m| (m.status.sort_rank(), kickoff_key(m), league_importance(&m.league)));
}

/// Most recent kickoff first; matches without a usable kickoff go last.
pub fn sort_by_kickoff_desc(matches: &mut [Match]) {
    matches.sort_by_cached_key(|m| {
        let instant = kickoff_instant(m.kickoff_time.as_deref()).map(|dt| dt.timestamp_millis());
        (instant.is_none(), Reverse(instant.unwrap_or_default()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::MatchStatus;
    use crate::testing_utils::TestDataBuilder;

    fn ids(matches: &[Match]) -> Vec<i64> {
        matches.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_status_then_kickoff() {
        let live_a = TestDataBuilder::match_at(1, MatchStatus::Live, "2024-01-15T10:00:00+00:00", 39);
        let live_b = TestDataBuilder::match_at(2, MatchStatus::Live, "2024-01-15T09:00:00+00:00", 39);
        let upcoming = TestDataBuilder::match_at(3, MatchStatus::Upcoming, "2024-01-15T08:00:00+00:00", 39);
        let finished = TestDataBuilder::match_at(4, MatchStatus::Finished, "2024-01-15T07:00:00+00:00", 39);

        let mut list = vec![finished, upcoming, live_a, live_b];
        priority_sort(&mut list);
        assert_eq!(ids(&list), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_league_breaks_kickoff_ties() {
        let premier = TestDataBuilder::match_at(1, MatchStatus::Live, "2024-01-15T20:00:00Z", 39);
        let ucl = TestDataBuilder::match_at(2, MatchStatus::Live, "2024-01-15T20:00:00+00:00", 2);
        let mut list = vec![premier, ucl];
        priority_sort(&mut list);
        assert_eq!(ids(&list), vec![2, 1]);
    }

    #[test]
    fn test_unknown_status_sorts_last() {
        let unknown = TestDataBuilder::match_at(1, MatchStatus::Unknown, "2024-01-01T00:00:00Z", 2);
        let finished = TestDataBuilder::match_at(2, MatchStatus::Finished, "2024-12-01T00:00:00Z", 999);
        let mut list = vec![unknown, finished];
        priority_sort(&mut list);
        assert_eq!(ids(&list), vec![2, 1]);
    }

    #[test]
    fn test_missing_kickoff_sorts_after_parsed() {
        let mut tbd = TestDataBuilder::match_at(1, MatchStatus::Upcoming, "", 2);
        tbd.kickoff_time = None;
        let garbage = TestDataBuilder::match_at(2, MatchStatus::Upcoming, "next week", 2);
        let dated = TestDataBuilder::match_at(3, MatchStatus::Upcoming, "2030-01-01T00:00:00Z", 999);
        let mut list = vec![tbd, garbage, dated];
        priority_sort(&mut list);
        assert_eq!(ids(&list), vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_is_stable_for_full_ties() {
        let mut list: Vec<Match> = (1..=5)
            .map(|id| TestDataBuilder::match_at(id, MatchStatus::Finished, "2024-01-15T20:00:00Z", 140))
            .collect();
        priority_sort(&mut list);
        assert_eq!(ids(&list), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_league_importance_table() {
        let league = |id: i64, name: &str| League {
            id,
            name: name.to_string(),
            ..League::default()
        };
        assert_eq!(league_importance(&league(3, "UEFA Europa League")), 1);
        assert_eq!(league_importance(&league(3, "Europa League Play-offs")), 2);
        assert_eq!(league_importance(&league(39, "Premier League")), 3);
        assert_eq!(league_importance(&league(203, "Süper Lig")), 9);
        assert_eq!(league_importance(&league(848, "UEFA Europa Conference League")), 10);
    }

    #[test]
    fn test_kickoff_desc() {
        let january = TestDataBuilder::match_at(1, MatchStatus::Finished, "2024-01-01T12:00:00Z", 39);
        let february = TestDataBuilder::match_at(2, MatchStatus::Finished, "2024-02-01T12:00:00Z", 39);
        let unknown = TestDataBuilder::match_at(3, MatchStatus::Upcoming, "soon", 39);
        let mut list = vec![unknown, january, february];
        sort_by_kickoff_desc(&mut list);
        assert_eq!(ids(&list), vec![2, 1, 3]);
    }
}
