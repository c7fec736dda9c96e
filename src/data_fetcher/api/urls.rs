//! URL building utilities for provider endpoints

/// Builds the URL for all currently live fixtures.
///
/// # Example
/// ```
/// use scoreline::data_fetcher::api::build_live_url;
///
/// let url = build_live_url("https://api.example.com");
/// assert_eq!(url, "https://api.example.com/fixtures?live=all");
/// ```
pub fn build_live_url(api_base: &str) -> String {
    format!("{api_base}/fixtures?live=all")
}

/// Builds the URL for all fixtures on a calendar date.
///
/// # Arguments
/// * `api_base` - The provider base URL
/// * `date` - The date in YYYY-MM-DD format
///
/// # Example
/// ```
/// use scoreline::data_fetcher::api::build_date_url;
///
/// let url = build_date_url("https://api.example.com", "2024-01-15");
/// assert_eq!(url, "https://api.example.com/fixtures?date=2024-01-15");
/// ```
pub fn build_date_url(api_base: &str, date: &str) -> String {
    format!("{api_base}/fixtures?date={date}")
}

/// Builds the URL for a league's fixtures in one season.
///
/// # Example
/// ```
/// use scoreline::data_fetcher::api::build_league_fixtures_url;
///
/// let url = build_league_fixtures_url("https://api.example.com", 39, 2024);
/// assert_eq!(url, "https://api.example.com/fixtures?league=39&season=2024");
/// ```
pub fn build_league_fixtures_url(api_base: &str, league_id: i64, season: i32) -> String {
    format!("{api_base}/fixtures?league={league_id}&season={season}")
}

/// Builds the URL for a single fixture.
///
/// # Example
/// ```
/// use scoreline::data_fetcher::api::build_fixture_url;
///
/// let url = build_fixture_url("https://api.example.com", 1035);
/// assert_eq!(url, "https://api.example.com/fixtures?id=1035");
/// ```
pub fn build_fixture_url(api_base: &str, fixture_id: i64) -> String {
    format!("{api_base}/fixtures?id={fixture_id}")
}

/// Builds the URL for a league's team roster.
///
/// # Example
/// ```
/// use scoreline::data_fetcher::api::build_league_teams_url;
///
/// let url = build_league_teams_url("https://api.example.com", 419, 2024);
/// assert_eq!(url, "https://api.example.com/teams?league=419&season=2024");
/// ```
pub fn build_league_teams_url(api_base: &str, league_id: i64, season: i32) -> String {
    format!("{api_base}/teams?league={league_id}&season={season}")
}

/// Builds the team search URL. The query is form-encoded.
///
/// # Example
/// ```
/// use scoreline::data_fetcher::api::build_search_url;
///
/// let url = build_search_url("https://api.example.com", "real madrid");
/// assert_eq!(url, "https://api.example.com/teams?search=real+madrid");
/// ```
pub fn build_search_url(api_base: &str, query: &str) -> String {
    let endpoint = format!("{api_base}/teams");
    match reqwest::Url::parse_with_params(&endpoint, &[("search", query)]) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{endpoint}?search={query}"),
    }
}

/// Builds the URL for a league table.
///
/// # Example
/// ```
/// use scoreline::data_fetcher::api::build_standings_url;
///
/// let url = build_standings_url("https://api.example.com", 140, 2023);
/// assert_eq!(url, "https://api.example.com/standings?league=140&season=2023");
/// ```
pub fn build_standings_url(api_base: &str, league_id: i64, season: i32) -> String {
    format!("{api_base}/standings?league={league_id}&season={season}")
}
