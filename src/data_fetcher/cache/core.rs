use std::sync::Arc;
use tracing::{debug, info};

use crate::data_fetcher::models::Team;

use super::lru_store::LruCacheStore;
use super::memory::InMemoryCache;
use super::types::KeyValueCache;

pub type TeamCache = Arc<dyn KeyValueCache<i64, Team>>;
pub type LeagueTeamsCache = Arc<dyn KeyValueCache<i64, Vec<Team>>>;
pub type SearchCache = Arc<dyn KeyValueCache<String, Vec<Team>>>;

/// The caches a [`crate::data_fetcher::api::MatchRepository`] owns.
///
/// None of them has a TTL: a team or search result stays until
/// [`RepositoryCaches::clear_all`] is called or the repository is dropped.
#[derive(Clone)]
pub struct RepositoryCaches {
    pub teams_by_id: TeamCache,
    pub league_teams: LeagueTeamsCache,
    pub search_results: SearchCache,
}

impl RepositoryCaches {
    /// Unbounded map-backed caches.
    pub fn unbounded() -> Self {
        Self {
            teams_by_id: Arc::new(InMemoryCache::new()),
            league_teams: Arc::new(InMemoryCache::new()),
            search_results: Arc::new(InMemoryCache::new()),
        }
    }

    /// LRU-backed caches holding at most `capacity` entries each.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            teams_by_id: Arc::new(LruCacheStore::new(capacity)),
            league_teams: Arc::new(LruCacheStore::new(capacity)),
            search_results: Arc::new(LruCacheStore::new(capacity)),
        }
    }

    /// Bounded when a capacity is configured, unbounded otherwise.
    pub fn from_capacity(capacity: Option<usize>) -> Self {
        match capacity {
            Some(capacity) => {
                debug!("Using LRU repository caches with capacity {capacity}");
                Self::bounded(capacity)
            }
            None => Self::unbounded(),
        }
    }

    /// Records every team in team-by-id (last write wins).
    pub fn remember_teams<'a>(&self, teams: impl IntoIterator<Item = &'a Team>) {
        for team in teams {
            self.teams_by_id.put(team.id, team.clone());
        }
    }

    pub fn clear_all(&self) {
        self.teams_by_id.clear();
        self.league_teams.clear();
        self.search_results.clear();
        info!("Cleared all repository caches");
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            teams: self.teams_by_id.len(),
            league_rosters: self.league_teams.len(),
            search_queries: self.search_results.len(),
        }
    }
}

impl Default for RepositoryCaches {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl std::fmt::Debug for RepositoryCaches {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryCaches")
            .field("stats", &self.stats())
            .finish()
    }
}

/// Entry counts for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub teams: usize,
    pub league_rosters: usize,
    pub search_queries: usize,
}
