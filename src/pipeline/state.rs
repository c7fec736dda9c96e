use chrono::NaiveDate;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info};

use crate::data_fetcher::models::Match;
use crate::error::AppError;

use super::filter::{MatchFilter, apply_filter, apply_filter_on};
use super::generation::{LoadGeneration, LoadToken};

#[derive(Debug, Default)]
struct ListInner {
    matches: Vec<Match>,
    is_loading: bool,
    error: Option<String>,
}

/// Published match list plus the loading flag and a one-shot error message.
///
/// Loads may overlap. Only the most recently started one is allowed to
/// publish; results of older loads are discarded when they arrive.
#[derive(Debug, Default)]
pub struct MatchListState {
    generations: LoadGeneration,
    inner: Mutex<ListInner>,
}

/// Marks a load in flight. Dropping it clears the loading flag, unless a
/// newer load has taken over the flag in the meantime.
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    state: &'a MatchListState,
    token: LoadToken,
}

impl LoadingGuard<'_> {
    pub fn token(&self) -> &LoadToken {
        &self.token
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.state.lock();
        if self.token.is_current() {
            inner.is_loading = false;
        }
    }
}

impl MatchListState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ListInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Starts a load, superseding any in flight.
    pub fn begin_load(&self) -> LoadingGuard<'_> {
        let mut inner = self.lock();
        // Bumped under the lock that a dropping guard checks its token under.
        let token = self.generations.begin();
        inner.is_loading = true;
        drop(inner);
        debug!("Load generation {} started", token.generation());
        LoadingGuard { state: self, token }
    }

    /// Publishes the outcome of the load behind `guard`.
    ///
    /// Returns whether the visible list changed. A failed load keeps the
    /// previous list and records its user message. A superseded load
    /// changes nothing and yields [`AppError::Superseded`].
    pub fn publish(
        &self,
        guard: &LoadingGuard<'_>,
        result: Result<Vec<Match>, AppError>,
    ) -> Result<bool, AppError> {
        let mut inner = self.lock();
        // Checked under the lock so a newer load cannot start in between.
        if let Err(superseded) = guard.token.ensure_current() {
            info!("Discarding stale load result: {superseded}");
            return Err(superseded);
        }

        match result {
            Ok(matches) => {
                let changed = inner.matches != matches;
                inner.matches = matches;
                Ok(changed)
            }
            Err(e) => {
                error!("Load failed: {e}");
                inner.error = Some(e.user_message());
                Ok(false)
            }
        }
    }

    /// Runs `load` as the newest load and publishes its result.
    pub async fn run_load<F, Fut>(&self, load: F) -> Result<bool, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Match>, AppError>>,
    {
        let guard = self.begin_load();
        let result = load().await;
        self.publish(&guard, result)
    }

    pub fn matches(&self) -> Vec<Match> {
        self.lock().matches.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    /// Returns the pending error message and clears it.
    pub fn take_error(&self) -> Option<String> {
        self.lock().error.take()
    }

    pub fn filtered(&self, filter: MatchFilter) -> Vec<Match> {
        apply_filter(filter, &self.lock().matches)
    }

    pub fn filtered_on(&self, filter: MatchFilter, today: NaiveDate) -> Vec<Match> {
        apply_filter_on(filter, &self.lock().matches, today)
    }
}
