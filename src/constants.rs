//! Application-wide constants and configuration values
//!
//! Provider header names, the fixed league tables that drive aggregation and
//! sorting, status code sets, and request pacing defaults all live here.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Default provider host and base URL
pub const DEFAULT_API_HOST: &str = "v3.football.api-sports.io";
pub const DEFAULT_API_BASE_URL: &str = "https://v3.football.api-sports.io";

/// Authentication header names sent with every provider request
pub mod headers {
    pub const API_KEY: &str = "x-rapidapi-key";
    pub const API_HOST: &str = "x-rapidapi-host";
}

/// Request pacing between rate-limit-sensitive calls
pub mod pacing {
    /// Delay between sequential per-day and per-league fetches (milliseconds)
    pub const DEFAULT_REQUEST_DELAY_MS: u64 = 50;

    /// Debounce delay applied to keystroke-driven team searches (milliseconds)
    pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
}

/// Shape of the "load all matches" aggregation
pub mod aggregation {
    /// Days after today fetched by date (offsets 1..=7)
    pub const UPCOMING_DAYS: u64 = 7;

    /// How many entries of [`super::leagues::POPULAR_LEAGUES`] are fetched eagerly
    pub const POPULAR_LEAGUE_FETCH_LIMIT: usize = 15;
}

/// Minimum search query length accepted by the provider
pub const MIN_SEARCH_QUERY_LEN: usize = 3;

/// Provider status short-codes grouped by status class
pub mod status_codes {
    pub const LIVE: &[&str] = &["LIVE", "1H", "2H", "HT"];
    pub const FINISHED: &[&str] = &["FT", "AET", "PEN", "PST", "CANC", "ABD", "AWD", "WO"];
    pub const UPCOMING: &[&str] = &["NS", "TBD"];

    /// Codes shown verbatim in the minute column
    pub const DISPLAYED_VERBATIM: &[&str] =
        &["HT", "FT", "AET", "PEN", "PST", "CANC", "ABD", "AWD", "WO"];
}

/// Fixed league tables
pub mod leagues {
    pub const CHAMPIONS_LEAGUE: i64 = 2;
    pub const EUROPA_LEAGUE: i64 = 3;
    pub const PREMIER_LEAGUE: i64 = 39;
    pub const LA_LIGA: i64 = 140;
    pub const BUNDESLIGA: i64 = 78;
    pub const SERIE_A: i64 = 135;
    pub const LIGUE_1: i64 = 61;
    pub const AZERBAIJAN_PREMIER_LEAGUE: i64 = 419;
    pub const TURKISH_SUPER_LEAGUE: i64 = 203;

    /// Name under which the provider files Europa League play-off rounds
    pub const EUROPA_LEAGUE_PLAYOFFS_NAME: &str = "Europa League Play-offs";

    /// Hand-curated, ordered list of eagerly fetched competitions
    pub const POPULAR_LEAGUES: &[i64] = &[
        CHAMPIONS_LEAGUE,
        EUROPA_LEAGUE,
        PREMIER_LEAGUE,
        LA_LIGA,
        BUNDESLIGA,
        SERIE_A,
        LIGUE_1,
        AZERBAIJAN_PREMIER_LEAGUE,
        TURKISH_SUPER_LEAGUE,
        848, // Conference League
        94,  // Primeira Liga
        88,  // Eredivisie
        144, // Jupiler Pro League
        179, // Scottish Premiership
        40,  // Championship
        71,  // Serie A (Brazil)
        253, // MLS
        307, // Saudi Pro League
    ];

    /// League importance rank; anything not listed ranks [`DEFAULT_IMPORTANCE`]
    pub const IMPORTANCE: &[(i64, u8)] = &[
        (CHAMPIONS_LEAGUE, 0),
        (EUROPA_LEAGUE, 1),
        (PREMIER_LEAGUE, 3),
        (LA_LIGA, 4),
        (BUNDESLIGA, 5),
        (SERIE_A, 6),
        (LIGUE_1, 7),
        (AZERBAIJAN_PREMIER_LEAGUE, 8),
        (TURKISH_SUPER_LEAGUE, 9),
    ];

    pub const EUROPA_LEAGUE_PLAYOFFS_IMPORTANCE: u8 = 2;
    pub const DEFAULT_IMPORTANCE: u8 = 10;

    /// Well-known team id -> league id, checked before probing rosters
    pub const WELL_KNOWN_TEAMS: &[(i64, i64)] = &[
        (33, PREMIER_LEAGUE),  // Manchester United
        (40, PREMIER_LEAGUE),  // Liverpool
        (42, PREMIER_LEAGUE),  // Arsenal
        (47, PREMIER_LEAGUE),  // Tottenham
        (49, PREMIER_LEAGUE),  // Chelsea
        (50, PREMIER_LEAGUE),  // Manchester City
        (529, LA_LIGA),        // Barcelona
        (530, LA_LIGA),        // Atletico Madrid
        (541, LA_LIGA),        // Real Madrid
        (157, BUNDESLIGA),     // Bayern Munich
        (165, BUNDESLIGA),     // Borussia Dortmund
        (489, SERIE_A),        // AC Milan
        (496, SERIE_A),        // Juventus
        (505, SERIE_A),        // Inter
        (85, LIGUE_1),         // Paris Saint Germain
        (549, TURKISH_SUPER_LEAGUE), // Besiktas
        (611, TURKISH_SUPER_LEAGUE), // Fenerbahce
        (645, TURKISH_SUPER_LEAGUE), // Galatasaray
        (556, AZERBAIJAN_PREMIER_LEAGUE), // Qarabag
    ];
}

/// Keys used in the persistent key-value store
pub mod store_keys {
    pub const FAVORITE_TEAMS: &str = "favorite_teams";
    pub const FAVORITE_COMPETITIONS: &str = "favorite_competitions";
}

/// Environment variable names
pub mod env_vars {
    pub const API_KEY: &str = "SCORELINE_API_KEY";
    pub const API_HOST: &str = "SCORELINE_API_HOST";
    pub const API_BASE_URL: &str = "SCORELINE_API_BASE_URL";
    pub const LOG_FILE: &str = "SCORELINE_LOG_FILE";
    pub const HTTP_TIMEOUT: &str = "SCORELINE_HTTP_TIMEOUT";
}

/// Retry configuration
pub mod retry {
    /// Maximum number of retry attempts for transient failures
    pub const MAX_ATTEMPTS: u32 = 2;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 250;
}
