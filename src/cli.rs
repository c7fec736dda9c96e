use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use scoreline::pipeline::MatchFilter;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Football scores in your terminal
///
/// Without options, shows every live, upcoming and recently finished match
/// from today, the coming week and the most popular leagues, live matches
/// first.
#[derive(Parser, Debug, Default)]
#[command(about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(styles = get_styles())]
pub struct Args {
    /// Show only live matches
    #[arg(long, help_heading = "Match Views")]
    pub live: bool,

    /// Show only matches kicking off today
    #[arg(long, help_heading = "Match Views")]
    pub today: bool,

    /// Show only finished matches
    #[arg(long, help_heading = "Match Views")]
    pub finished: bool,

    /// Show only upcoming matches
    #[arg(long, help_heading = "Match Views")]
    pub upcoming: bool,

    /// Show matches of your favorite teams, most recent first
    #[arg(long, help_heading = "Match Views")]
    pub favorites: bool,

    /// Show a single match by its id
    #[arg(long = "match", value_name = "ID", help_heading = "Match Views")]
    pub match_id: Option<i64>,

    /// Search teams by name (at least 3 characters)
    #[arg(long, value_name = "QUERY", help_heading = "Teams & Leagues")]
    pub search: Option<String>,

    /// Show the league table of a league id
    #[arg(long, value_name = "LEAGUE_ID", help_heading = "Teams & Leagues")]
    pub standings: Option<i64>,

    /// Season for --standings. Defaults to the current year.
    #[arg(long, value_name = "YEAR", requires = "standings", help_heading = "Teams & Leagues")]
    pub season: Option<i32>,

    /// Add a team id to your favorites
    #[arg(long, value_name = "TEAM_ID", help_heading = "Favorites")]
    pub add_favorite: Option<i64>,

    /// Remove a team id from your favorites
    #[arg(long, value_name = "TEAM_ID", help_heading = "Favorites")]
    pub remove_favorite: Option<i64>,

    /// List your favorite team ids
    #[arg(long, help_heading = "Favorites")]
    pub list_favorites: bool,

    /// Save the provider API key to config. Will prompt for it if not provided.
    #[arg(
        long = "set-api-key",
        value_name = "KEY",
        num_args = 0..=1,
        default_missing_value = "",
        help_heading = "Configuration"
    )]
    pub set_api_key: Option<String>,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Disable colors in the output
    #[arg(long, short = 'p', help_heading = "Display Options")]
    pub plain: bool,

    /// Show version information
    #[arg(short = 'V', long = "version", help_heading = "Info")]
    pub version: bool,

    /// Also write logs to the terminal, not only to the log file.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

impl Args {
    /// Status filter flags that were set, in declaration order.
    pub fn selected_filters(&self) -> Vec<MatchFilter> {
        [
            (self.live, MatchFilter::Live),
            (self.today, MatchFilter::Today),
            (self.finished, MatchFilter::Finished),
            (self.upcoming, MatchFilter::Upcoming),
        ]
        .into_iter()
        .filter_map(|(set, filter)| set.then_some(filter))
        .collect()
    }

    /// The filter applied to the match list; `All` when none is set.
    pub fn filter(&self) -> MatchFilter {
        self.selected_filters()
            .first()
            .copied()
            .unwrap_or_default()
    }

    /// Commands that only touch local config or storage.
    pub fn is_local_operation(&self) -> bool {
        self.version
            || self.list_config
            || self.set_api_key.is_some()
            || self.add_favorite.is_some()
            || self.remove_favorite.is_some()
            || self.list_favorites
    }

    /// Views other than the default match list.
    pub fn exclusive_views(&self) -> Vec<&'static str> {
        let mut views = Vec::new();
        if self.favorites {
            views.push("--favorites");
        }
        if self.match_id.is_some() {
            views.push("--match");
        }
        if self.search.is_some() {
            views.push("--search");
        }
        if self.standings.is_some() {
            views.push("--standings");
        }
        views
    }
}
