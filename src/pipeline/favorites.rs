//! Matches for the user's favorite teams.

use chrono::{Datelike, Local};
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::constants::leagues::{POPULAR_LEAGUES, WELL_KNOWN_TEAMS};
use crate::data_fetcher::api::MatchRepository;
use crate::data_fetcher::models::Match;
use crate::error::AppError;

use super::aggregation::MatchAccumulator;
use super::pacing::RequestPacer;
use super::sorting::sort_by_kickoff_desc;

/// League of a well-known team, without any network access.
pub fn well_known_league(team_id: i64) -> Option<i64> {
    WELL_KNOWN_TEAMS
        .iter()
        .find(|(team, _)| *team == team_id)
        .map(|(_, league)| *league)
}

#[derive(Debug, Clone)]
pub struct FavoriteTeamCollector {
    repository: MatchRepository,
    request_delay: Duration,
    probe_leagues: Vec<i64>,
}

impl FavoriteTeamCollector {
    pub fn new(repository: MatchRepository, request_delay: Duration) -> Self {
        Self {
            repository,
            request_delay,
            probe_leagues: POPULAR_LEAGUES.to_vec(),
        }
    }

    pub fn from_config(repository: MatchRepository, config: &Config) -> Self {
        Self::new(repository, Duration::from_millis(config.request_delay_ms))
    }

    /// Finds the league a team plays in: the well-known table first, then
    /// the popular leagues' rosters in order. First roster hit wins.
    pub async fn resolve_league(
        &self,
        team_id: i64,
        season: i32,
        pacer: &mut RequestPacer,
    ) -> Option<i64> {
        if let Some(league_id) = well_known_league(team_id) {
            return Some(league_id);
        }

        for &league_id in &self.probe_leagues {
            match pacer
                .run(self.repository.fetch_teams_by_league(league_id, season))
                .await
            {
                Ok(teams) if teams.iter().any(|team| team.id == team_id) => {
                    debug!("Team {team_id} found in league {league_id}");
                    return Some(league_id);
                }
                Ok(_) => {}
                Err(e) => warn!("Roster probe for league {league_id} failed: {e}"),
            }
        }
        None
    }

    /// Favorites for the current calendar year.
    pub async fn load_favorites(&self, team_ids: &BTreeSet<i64>) -> Result<Vec<Match>, AppError> {
        self.load_favorites_for_season(team_ids, Local::now().year()).await
    }

    /// Every match involving one of `team_ids`, deduplicated, most recent
    /// kickoff first.
    ///
    /// Teams whose league cannot be resolved or fetched are skipped. An empty
    /// set returns immediately without any request.
    #[instrument(skip(self))]
    pub async fn load_favorites_for_season(
        &self,
        team_ids: &BTreeSet<i64>,
        season: i32,
    ) -> Result<Vec<Match>, AppError> {
        if team_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut pacer = RequestPacer::new(self.request_delay);
        let mut league_matches: HashMap<i64, Vec<Match>> = HashMap::new();
        let mut accumulator = MatchAccumulator::new();

        for &team_id in team_ids {
            let Some(league_id) = self.resolve_league(team_id, season, &mut pacer).await else {
                warn!("No league found for favorite team {team_id}, skipping");
                continue;
            };

            if !league_matches.contains_key(&league_id) {
                match pacer
                    .run(self.repository.fetch_matches_by_league(league_id, season))
                    .await
                {
                    Ok(matches) => {
                        league_matches.insert(league_id, matches);
                    }
                    Err(e) => {
                        warn!("Matches for league {league_id} unavailable, skipping team {team_id}: {e}");
                        continue;
                    }
                }
            }

            let Some(matches) = league_matches.get(&league_id) else {
                continue;
            };
            let added = accumulator.extend(
                matches
                    .iter()
                    .filter(|m| m.involves_team(team_id))
                    .cloned(),
            );
            debug!("Team {team_id}: {added} matches from league {league_id}");
        }

        let mut matches = accumulator.into_vec();
        sort_by_kickoff_desc(&mut matches);
        info!(
            "Collected {} matches for {} favorite teams",
            matches.len(),
            team_ids.len()
        );
        Ok(matches)
    }
}
