//! Match list pipelines: aggregation, favorites, sorting, filtering and the
//! view-state that publishes their results.

pub mod aggregation;
pub mod favorites;
pub mod filter;
pub mod generation;
pub mod pacing;
pub mod sorting;
pub mod state;

pub use aggregation::{AggregationPipeline, MatchAccumulator};
pub use favorites::{FavoriteTeamCollector, well_known_league};
pub use filter::{MatchFilter, apply_filter, apply_filter_on};
pub use generation::{LoadGeneration, LoadToken};
pub use pacing::RequestPacer;
pub use sorting::{league_importance, priority_sort, sort_by_kickoff_desc};
pub use state::{LoadingGuard, MatchListState};
