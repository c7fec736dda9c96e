//! Keystroke-driven team search: debounced, and each new query cancels the
//! one still in flight.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::MIN_SEARCH_QUERY_LEN;
use crate::data_fetcher::api::MatchRepository;
use crate::data_fetcher::models::Team;
use crate::pipeline::LoadGeneration;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Results(Vec<Team>),
    Failed(String),
}

#[derive(Debug)]
pub struct TeamSearch {
    repository: Arc<MatchRepository>,
    debounce: Duration,
    state: watch::Sender<SearchState>,
    generations: LoadGeneration,
    in_flight: Option<JoinHandle<()>>,
}

impl TeamSearch {
    pub fn new(repository: Arc<MatchRepository>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self {
            repository,
            debounce,
            state,
            generations: LoadGeneration::new(),
            in_flight: None,
        }
    }

    pub fn from_config(repository: Arc<MatchRepository>, config: &Config) -> Self {
        Self::new(repository, Duration::from_millis(config.search_debounce_ms))
    }

    /// Receiver observing every state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Aborts the previous search, then starts a new one after the debounce
    /// delay. A query shorter than the provider minimum resets the state to
    /// `Idle` without a request.
    pub fn submit(&mut self, query: &str) {
        self.cancel();
        let token = self.generations.begin();

        let query = query.trim().to_string();
        if query.chars().count() < MIN_SEARCH_QUERY_LEN {
            self.state.send_replace(SearchState::Idle);
            return;
        }

        self.state.send_replace(SearchState::Loading);
        let repository = Arc::clone(&self.repository);
        let state = self.state.clone();
        let debounce = self.debounce;

        self.in_flight = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            debug!("Running debounced search for {query:?}");
            let next = match repository.search_teams(&query).await {
                Ok(teams) => SearchState::Results(teams),
                Err(e) => {
                    warn!("Team search for {query:?} failed: {e}");
                    SearchState::Failed(e.user_message())
                }
            };
            // An aborted task may still be past its last await point.
            if token.is_current() {
                state.send_replace(next);
            }
        }));
    }

    /// Aborts the in-flight search, if any. The published state is left as is.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take()
            && !handle.is_finished()
        {
            debug!("Cancelling in-flight search");
            handle.abort();
        }
    }

    /// Waits for the current search to settle and returns its final state.
    pub async fn settle(&mut self) -> SearchState {
        if let Some(handle) = self.in_flight.take()
            && let Err(e) = handle.await
            && !e.is_cancelled()
        {
            warn!("Search task failed: {e}");
        }
        self.current()
    }
}

impl Drop for TeamSearch {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::RetryPolicy;
    use crate::testing_utils::TestDataBuilder;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn search(server: &MockServer, debounce_ms: u64) -> TeamSearch {
        let config = Config {
            api_key: "test-key".to_string(),
            api_base_url: server.uri(),
            ..Config::default()
        };
        let repository = MatchRepository::new(&config)
            .unwrap()
            .with_retry_policy(RetryPolicy::none());
        TeamSearch::new(Arc::new(repository), Duration::from_millis(debounce_ms))
    }

    #[tokio::test]
    async fn test_only_last_keystroke_hits_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams"))
            .and(query_param("search", "Barcelona"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestDataBuilder::envelope(
                vec![TestDataBuilder::raw_team_json(529, "Barcelona")],
            )))
            .expect(1)
            .mount(&server)
            .await;

        let mut search = search(&server, 50);
        for prefix in ["Bar", "Barc", "Barce", "Barcelona"] {
            search.submit(prefix);
        }
        assert_eq!(search.current(), SearchState::Loading);

        match search.settle().await {
            SearchState::Results(teams) => {
                assert_eq!(teams.len(), 1);
                assert_eq!(teams[0].id, 529);
            }
            other => panic!("unexpected state {other:?}"),
        }

        let requests = server.received_requests().await.unwrap_or_default();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_published_as_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let mut search = search(&server, 0);
        search.submit("Qarabag");
        assert_eq!(
            search.settle().await,
            SearchState::Failed("Rate limit exceeded. Please try again later.".to_string())
        );
    }

    #[tokio::test]
    async fn test_blank_query_resets_to_idle() {
        let server = MockServer::start().await;
        let mut search = search(&server, 1000);
        let mut updates = search.subscribe();

        search.submit("Liverpool");
        search.submit("   ");
        assert_eq!(search.current(), SearchState::Idle);
        assert!(updates.has_changed().unwrap());
        assert_eq!(*updates.borrow_and_update(), SearchState::Idle);
        assert_eq!(search.settle().await, SearchState::Idle);
    }

    #[tokio::test]
    async fn test_short_query_stays_idle_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestDataBuilder::envelope(vec![])))
            .expect(0)
            .mount(&server)
            .await;

        let mut search = search(&server, 0);
        search.submit(" ab ");
        assert_eq!(search.current(), SearchState::Idle);
        assert_eq!(search.settle().await, SearchState::Idle);
    }
}
