pub mod common;
pub mod fixtures;
pub mod standings;
pub mod teams;

pub use common::{League, Match, MatchStatus, Team, TeamStanding};
pub use fixtures::{
    ApiEnvelope, RawFixture, RawFixtureInfo, RawGoals, RawLeague, RawStatus, RawTeam, RawTeams,
};
pub use standings::{RawStandingRow, RawStandingsEntry, RawStandingsLeague};
pub use teams::{RawTeamDetail, RawTeamEntry};
