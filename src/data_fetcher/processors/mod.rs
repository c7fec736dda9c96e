pub mod core;
pub mod match_status;
pub mod time_formatting;

pub use core::{
    normalize_fixture, normalize_fixture_in, normalize_fixtures, parse_records, short_name,
    standings_from_raw, team_from_raw,
};
pub use match_status::{classify_status, match_minute};
pub use time_formatting::{
    date_string, format_kickoff_in, format_kickoff_local, kickoff_instant, local_today,
    parse_kickoff,
};
