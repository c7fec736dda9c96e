use chrono::NaiveDate;
use reqwest::Client;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::constants::MIN_SEARCH_QUERY_LEN;
use crate::data_fetcher::cache::RepositoryCaches;
use crate::data_fetcher::models::{
    Match, RawStandingsEntry, RawTeamEntry, Team, TeamStanding,
};
use crate::data_fetcher::processors::{
    date_string, normalize_fixtures, parse_records, standings_from_raw, team_from_raw,
};
use crate::error::AppError;

use super::fetch_utils::{ApiCredentials, RetryPolicy, fetch_records};
use super::http_client::create_http_client_with_timeout;
use super::urls::{
    build_date_url, build_fixture_url, build_league_fixtures_url, build_league_teams_url,
    build_live_url, build_search_url, build_standings_url,
};

/// Provider-facing repository: fetches fixtures, rosters and standings,
/// normalizes them and keeps the team caches up to date.
///
/// Every operation returns a `Result`; nothing past this boundary panics on
/// provider misbehavior. Caches have no TTL and live as long as the
/// repository (or until [`MatchRepository::clear_cache`]).
#[derive(Debug, Clone)]
pub struct MatchRepository {
    client: Client,
    api_base: String,
    credentials: ApiCredentials,
    retry: RetryPolicy,
    caches: RepositoryCaches,
}

impl MatchRepository {
    /// Builds a repository with caches sized from `config.cache_capacity`.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Self::with_caches(config, RepositoryCaches::from_capacity(config.cache_capacity))
    }

    /// Builds a repository over externally owned caches.
    pub fn with_caches(config: &Config, caches: RepositoryCaches) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self {
            client,
            api_base: config.api_base_url.trim_end_matches('/').to_string(),
            credentials: ApiCredentials {
                api_key: config.api_key.clone(),
                api_host: config.api_host.clone(),
            },
            retry: RetryPolicy::default(),
            caches,
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn caches(&self) -> &RepositoryCaches {
        &self.caches
    }

    async fn fetch_matches(&self, url: &str) -> Result<Vec<Match>, AppError> {
        let records = fetch_records(&self.client, &self.credentials, self.retry, url).await?;
        let matches = normalize_fixtures(records);
        self.caches
            .remember_teams(matches.iter().flat_map(|m| [&m.home_team, &m.away_team]));
        Ok(matches)
    }

    #[instrument(skip(self))]
    pub async fn fetch_live_matches(&self) -> Result<Vec<Match>, AppError> {
        let matches = self.fetch_matches(&build_live_url(&self.api_base)).await?;
        info!("Fetched {} live matches", matches.len());
        Ok(matches)
    }

    #[instrument(skip(self))]
    pub async fn fetch_matches_by_date(&self, date: NaiveDate) -> Result<Vec<Match>, AppError> {
        let url = build_date_url(&self.api_base, &date_string(date));
        let matches = self.fetch_matches(&url).await?;
        info!("Fetched {} matches for {date}", matches.len());
        Ok(matches)
    }

    /// Fetches a league's fixtures and records the participating teams as
    /// the league's roster.
    #[instrument(skip(self))]
    pub async fn fetch_matches_by_league(
        &self,
        league_id: i64,
        season: i32,
    ) -> Result<Vec<Match>, AppError> {
        let url = build_league_fixtures_url(&self.api_base, league_id, season);
        let matches = self.fetch_matches(&url).await?;

        let roster = roster_from_matches(&matches);
        if !roster.is_empty() {
            self.caches.league_teams.put(league_id, roster);
        }

        info!(
            "Fetched {} matches for league {league_id} season {season}",
            matches.len()
        );
        Ok(matches)
    }

    #[instrument(skip(self))]
    pub async fn fetch_match_by_id(&self, match_id: i64) -> Result<Match, AppError> {
        let url = build_fixture_url(&self.api_base, match_id);
        self.fetch_matches(&url)
            .await?
            .into_iter()
            .find(|m| m.id == match_id)
            .ok_or_else(|| AppError::match_not_found(match_id))
    }

    /// A league's team roster; served from the league cache when present.
    #[instrument(skip(self))]
    pub async fn fetch_teams_by_league(
        &self,
        league_id: i64,
        season: i32,
    ) -> Result<Vec<Team>, AppError> {
        if let Some(cached) = self.caches.league_teams.get(&league_id) {
            debug!("League {league_id} roster served from cache");
            return Ok(cached);
        }

        let teams = self
            .fetch_teams(&build_league_teams_url(&self.api_base, league_id, season))
            .await?;
        self.caches.league_teams.put(league_id, teams.clone());
        Ok(teams)
    }

    /// Searches teams by name.
    ///
    /// Queries shorter than the provider minimum return an empty list without
    /// a request. Results are cached by lowercased query, and only a
    /// non-empty cached list short-circuits the network call.
    #[instrument(skip(self))]
    pub async fn search_teams(&self, query: &str) -> Result<Vec<Team>, AppError> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_QUERY_LEN {
            debug!("Search query {query:?} below minimum length");
            return Ok(Vec::new());
        }

        let key = query.to_lowercase();
        if let Some(cached) = self.caches.search_results.get(&key)
            && !cached.is_empty()
        {
            debug!("Search {key:?} served from cache");
            return Ok(cached);
        }

        let teams = self.fetch_teams(&build_search_url(&self.api_base, query)).await?;
        self.caches.search_results.put(key, teams.clone());
        info!("Search {query:?} returned {} teams", teams.len());
        Ok(teams)
    }

    async fn fetch_teams(&self, url: &str) -> Result<Vec<Team>, AppError> {
        let records = fetch_records(&self.client, &self.credentials, self.retry, url).await?;
        let teams: Vec<Team> = parse_records::<RawTeamEntry>(records, "team")
            .into_iter()
            .map(|entry| team_from_raw(entry.team.into()))
            .collect();
        self.caches.remember_teams(&teams);
        Ok(teams)
    }

    #[instrument(skip(self))]
    pub async fn fetch_standings(
        &self,
        league_id: i64,
        season: i32,
    ) -> Result<Vec<TeamStanding>, AppError> {
        let url = build_standings_url(&self.api_base, league_id, season);
        let records = fetch_records(&self.client, &self.credentials, self.retry, &url).await?;
        let standings = standings_from_raw(parse_records::<RawStandingsEntry>(records, "standings"));
        self.caches.remember_teams(standings.iter().map(|row| &row.team));
        info!(
            "Fetched {} standing rows for league {league_id} season {season}",
            standings.len()
        );
        Ok(standings)
    }

    /// A team seen in any earlier response.
    pub fn get_team(&self, team_id: i64) -> Option<Team> {
        self.caches.teams_by_id.get(&team_id)
    }

    pub fn clear_cache(&self) {
        self.caches.clear_all();
    }
}

/// Distinct teams appearing in `matches`, in first-seen order.
fn roster_from_matches(matches: &[Match]) -> Vec<Team> {
    let mut seen = HashSet::new();
    matches
        .iter()
        .flat_map(|m| [&m.home_team, &m.away_team])
        .filter(|team| seen.insert(team.id))
        .cloned()
        .collect()
}
