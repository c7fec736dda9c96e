use chrono::NaiveDate;

use crate::data_fetcher::models::Match;
use crate::data_fetcher::processors::{date_string, local_today};

/// Which subset of a match list is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchFilter {
    #[default]
    All,
    Live,
    Finished,
    Upcoming,
    /// Matches whose raw kickoff string starts with today's date.
    Today,
}

impl MatchFilter {
    pub fn label(self) -> &'static str {
        match self {
            MatchFilter::All => "All matches",
            MatchFilter::Live => "Live",
            MatchFilter::Finished => "Finished",
            MatchFilter::Upcoming => "Upcoming",
            MatchFilter::Today => "Today",
        }
    }
}

/// Projects `matches` through `filter`, treating `today` as the current date.
///
/// Never reorders: the result is a subsequence of the input.
pub fn apply_filter_on(filter: MatchFilter, matches: &[Match], today: NaiveDate) -> Vec<Match> {
    match filter {
        MatchFilter::All => matches.to_vec(),
        MatchFilter::Live => matches.iter().filter(|m| m.is_live()).cloned().collect(),
        MatchFilter::Finished => matches.iter().filter(|m| m.is_finished()).cloned().collect(),
        MatchFilter::Upcoming => matches.iter().filter(|m| m.is_upcoming()).cloned().collect(),
        MatchFilter::Today => {
            let prefix = date_string(today);
            matches
                .iter()
                .filter(|m| {
                    m.kickoff_time
                        .as_deref()
                        .is_some_and(|kickoff| kickoff.starts_with(&prefix))
                })
                .cloned()
                .collect()
        }
    }
}

/// [`apply_filter_on`] against the local date.
pub fn apply_filter(filter: MatchFilter, matches: &[Match]) -> Vec<Match> {
    apply_filter_on(filter, matches, local_today())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::MatchStatus;
    use crate::testing_utils::TestDataBuilder;

    fn sample() -> Vec<Match> {
        vec![
            TestDataBuilder::match_at(1, MatchStatus::Live, "2024-05-01T18:00:00+00:00", 39),
            TestDataBuilder::match_at(2, MatchStatus::Upcoming, "2024-05-02T18:00:00+00:00", 39),
            TestDataBuilder::match_at(3, MatchStatus::Finished, "2024-05-01T12:00:00+00:00", 2),
            TestDataBuilder::match_at(4, MatchStatus::Unknown, "2024-05-01T13:00:00+00:00", 2),
            TestDataBuilder::match_at(5, MatchStatus::Live, "2024-05-01T19:00:00+00:00", 140),
        ]
    }

    fn ids(matches: &[Match]) -> Vec<i64> {
        matches.iter().map(|m| m.id).collect()
    }

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_all_is_identity() {
        let list = sample();
        assert_eq!(apply_filter_on(MatchFilter::All, &list, may_first()), list);
    }

    #[test]
    fn test_status_filters_preserve_order() {
        let list = sample();
        assert_eq!(ids(&apply_filter_on(MatchFilter::Live, &list, may_first())), vec![1, 5]);
        assert_eq!(ids(&apply_filter_on(MatchFilter::Finished, &list, may_first())), vec![3]);
        assert_eq!(ids(&apply_filter_on(MatchFilter::Upcoming, &list, may_first())), vec![2]);
    }

    #[test]
    fn test_unknown_only_visible_under_all_or_today() {
        let list = sample();
        for filter in [MatchFilter::Live, MatchFilter::Finished, MatchFilter::Upcoming] {
            assert!(!ids(&apply_filter_on(filter, &list, may_first())).contains(&4));
        }
        assert!(ids(&apply_filter_on(MatchFilter::Today, &list, may_first())).contains(&4));
    }

    #[test]
    fn test_today_matches_date_prefix() {
        let mut list = sample();
        list[1].kickoff_time = None;
        assert_eq!(
            ids(&apply_filter_on(MatchFilter::Today, &list, may_first())),
            vec![1, 3, 4, 5]
        );
    }

    #[test]
    fn test_filters_are_idempotent() {
        let list = sample();
        for filter in [
            MatchFilter::All,
            MatchFilter::Live,
            MatchFilter::Finished,
            MatchFilter::Upcoming,
            MatchFilter::Today,
        ] {
            let once = apply_filter_on(filter, &list, may_first());
            let twice = apply_filter_on(filter, &once, may_first());
            assert_eq!(once, twice, "{filter:?}");
        }
    }
}
