//! "Load all matches": live, today, the coming week and the popular
//! leagues, merged by identity and priority-sorted.

use chrono::{Datelike, Days, NaiveDate};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::constants::aggregation::{POPULAR_LEAGUE_FETCH_LIMIT, UPCOMING_DAYS};
use crate::constants::leagues::POPULAR_LEAGUES;
use crate::data_fetcher::api::MatchRepository;
use crate::data_fetcher::models::Match;
use crate::data_fetcher::processors::local_today;
use crate::error::AppError;

use super::pacing::RequestPacer;
use super::sorting::priority_sort;

/// Insertion-ordered set of matches keyed by id. The first record seen for
/// an id is kept; later duplicates are dropped, not merged.
#[derive(Debug, Default)]
pub struct MatchAccumulator {
    seen: HashSet<i64>,
    matches: Vec<Match>,
}

impl MatchAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds matches not seen before and returns how many were new.
    pub fn extend(&mut self, matches: impl IntoIterator<Item = Match>) -> usize {
        let before = self.matches.len();
        for m in matches {
            if self.seen.insert(m.id) {
                self.matches.push(m);
            }
        }
        self.matches.len() - before
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn into_vec(self) -> Vec<Match> {
        self.matches
    }
}

/// Folds one sub-fetch into the accumulator. Failures count as an empty
/// contribution.
pub(super) fn contribute(
    accumulator: &mut MatchAccumulator,
    source: &str,
    result: Result<Vec<Match>, AppError>,
) {
    match result {
        Ok(matches) => {
            let fetched = matches.len();
            let added = accumulator.extend(matches);
            info!("{source}: {fetched} fetched, {added} new");
        }
        Err(e) => warn!("{source}: fetch failed, continuing without it: {e}"),
    }
}

/// Sequential multi-fetch aggregation over a [`MatchRepository`].
#[derive(Debug, Clone)]
pub struct AggregationPipeline {
    repository: MatchRepository,
    request_delay: Duration,
    leagues: Vec<i64>,
}

impl AggregationPipeline {
    pub fn new(repository: MatchRepository, request_delay: Duration) -> Self {
        Self {
            repository,
            request_delay,
            leagues: POPULAR_LEAGUES
                .iter()
                .take(POPULAR_LEAGUE_FETCH_LIMIT)
                .copied()
                .collect(),
        }
    }

    pub fn from_config(repository: MatchRepository, config: &Config) -> Self {
        Self::new(repository, Duration::from_millis(config.request_delay_ms))
    }

    pub fn leagues(&self) -> &[i64] {
        &self.leagues
    }

    /// Loads everything relative to the local date, with the current year
    /// as season.
    pub async fn load_all(&self) -> Result<Vec<Match>, AppError> {
        let today = local_today();
        self.load_all_from(today, today.year()).await
    }

    /// Live, `today`, the next seven days and the popular leagues for
    /// `season`, strictly in that order and one request at a time.
    ///
    /// No single sub-fetch can fail the load. An error is only returned if
    /// the pipeline itself cannot proceed.
    #[instrument(skip(self))]
    pub async fn load_all_from(&self, today: NaiveDate, season: i32) -> Result<Vec<Match>, AppError> {
        let mut accumulator = MatchAccumulator::new();
        let mut pacer = RequestPacer::new(self.request_delay);

        contribute(
            &mut accumulator,
            "live",
            pacer.run(self.repository.fetch_live_matches()).await,
        );

        contribute(
            &mut accumulator,
            "today",
            pacer.run(self.repository.fetch_matches_by_date(today)).await,
        );

        for offset in 1..=UPCOMING_DAYS {
            let date = today.checked_add_days(Days::new(offset)).ok_or_else(|| {
                AppError::pipeline_error(format!("Date overflow adding {offset} days to {today}"))
            })?;
            contribute(
                &mut accumulator,
                &format!("date {date}"),
                pacer.run(self.repository.fetch_matches_by_date(date)).await,
            );
        }

        for &league_id in &self.leagues {
            contribute(
                &mut accumulator,
                &format!("league {league_id}"),
                pacer
                    .run(self.repository.fetch_matches_by_league(league_id, season))
                    .await,
            );
        }

        let mut matches = accumulator.into_vec();
        priority_sort(&mut matches);
        info!("Aggregated {} distinct matches", matches.len());
        Ok(matches)
    }
}
