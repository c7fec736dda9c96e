//! Football scores library: live, upcoming and finished matches from an
//! API-Football compatible provider, merged, deduplicated and sorted.
//!
//! # Examples
//!
//! ```rust,no_run
//! use scoreline::config::Config;
//! use scoreline::data_fetcher::api::MatchRepository;
//! use scoreline::display::{DisplayOptions, render_matches};
//! use scoreline::error::AppError;
//! use scoreline::pipeline::{AggregationPipeline, MatchFilter, apply_filter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let repository = MatchRepository::new(&config)?;
//!
//!     // Live, today, the next 7 days and the popular leagues, priority-sorted
//!     let pipeline = AggregationPipeline::from_config(repository, &config);
//!     let matches = pipeline.load_all().await?;
//!
//!     let live = apply_filter(MatchFilter::Live, &matches);
//!     render_matches(&mut std::io::stdout(), &live, DisplayOptions::colored())?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod display;
pub mod error;
pub mod pipeline;
pub mod search;
pub mod storage;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::api::MatchRepository;
pub use data_fetcher::models::{League, Match, MatchStatus, Team, TeamStanding};
pub use error::AppError;
pub use pipeline::{
    AggregationPipeline, FavoriteTeamCollector, MatchFilter, MatchListState, apply_filter,
    priority_sort,
};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
