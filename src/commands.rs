use crate::cli::Args;
use chrono::{Datelike, Local};
use scoreline::config::Config;
use scoreline::config::user_prompts::prompt_for_api_key;
use scoreline::constants::MIN_SEARCH_QUERY_LEN;
use scoreline::data_fetcher::api::MatchRepository;
use scoreline::display::{
    DisplayOptions, empty_message, render_match_detail, render_matches, render_standings,
    render_teams,
};
use scoreline::error::AppError;
use scoreline::pipeline::{AggregationPipeline, FavoriteTeamCollector, MatchListState};
use scoreline::search::{SearchState, TeamSearch};
use scoreline::storage::{FavoritesStore, FileStore};
use std::io::stdout;
use std::sync::Arc;
use tracing::{info, warn};

/// Validates command line argument combinations.
///
/// Returns an error if incompatible arguments are used together.
pub fn validate_args(args: &Args) -> Result<(), AppError> {
    let filters = args.selected_filters();
    if filters.len() > 1 {
        return Err(AppError::config_error(
            "Use at most one of --live, --today, --finished and --upcoming",
        ));
    }

    let views = args.exclusive_views();
    if views.len() > 1 {
        return Err(AppError::config_error(format!(
            "Cannot combine {}",
            views.join(" and ")
        )));
    }

    if !filters.is_empty() && !views.is_empty() {
        return Err(AppError::config_error(format!(
            "Filters cannot be combined with {}",
            views[0]
        )));
    }

    Ok(())
}

fn display_options(args: &Args) -> DisplayOptions {
    DisplayOptions {
        colored: !args.plain,
    }
}

fn open_favorites() -> Result<FavoritesStore, AppError> {
    Ok(FavoritesStore::new(Arc::new(FileStore::open_default()?)))
}

/// Handles the --version command.
pub fn handle_version_command() {
    println!("{} {}", scoreline::NAME, scoreline::VERSION);
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles --set-api-key, prompting when no key was given on the command line.
pub async fn handle_set_api_key_command(key: &str) -> Result<(), AppError> {
    let key = if key.trim().is_empty() {
        prompt_for_api_key().await?
    } else {
        key.trim().to_string()
    };

    let config_path = Config::get_config_path();
    let mut config = Config::load_from_path(&config_path)
        .await
        .unwrap_or_default();
    config.api_key = key;
    config.validate()?;
    config.save().await?;

    println!("API key saved to {config_path}");
    Ok(())
}

/// Handles --add-favorite, --remove-favorite and --list-favorites.
pub fn handle_favorite_commands(args: &Args) -> Result<(), AppError> {
    let favorites = open_favorites()?;

    if let Some(team_id) = args.add_favorite {
        if favorites.add(team_id)? {
            println!("Added team {team_id} to favorites");
        } else {
            println!("Team {team_id} is already a favorite");
        }
    }

    if let Some(team_id) = args.remove_favorite {
        if favorites.remove(team_id)? {
            println!("Removed team {team_id} from favorites");
        } else {
            println!("Team {team_id} was not a favorite");
        }
    }

    if args.list_favorites {
        let ids = favorites.team_ids()?;
        if ids.is_empty() {
            println!("No favorite teams yet. Add one with --add-favorite <TEAM_ID>");
        } else {
            for id in ids {
                println!("{id}");
            }
        }
    }

    Ok(())
}

/// Default view: the aggregated match list, optionally filtered.
pub async fn handle_match_list_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let repository = MatchRepository::new(config)?;
    let pipeline = AggregationPipeline::from_config(repository, config);
    let state = MatchListState::new();

    state.run_load(|| pipeline.load_all()).await?;
    if let Some(message) = state.take_error() {
        eprintln!("{message}");
    }

    let filter = args.filter();
    let matches = state.filtered(filter);
    info!("Showing {} matches ({})", matches.len(), filter.label());
    if matches.is_empty() {
        println!("{}", empty_message(filter));
        return Ok(());
    }
    render_matches(&mut stdout(), &matches, display_options(args))
}

/// Handles --favorites.
pub async fn handle_favorites_view_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let team_ids = open_favorites()?.team_ids()?;
    if team_ids.is_empty() {
        println!("No favorite teams yet. Add one with --add-favorite <TEAM_ID>");
        return Ok(());
    }

    let repository = MatchRepository::new(config)?;
    let collector = FavoriteTeamCollector::from_config(repository, config);
    let state = MatchListState::new();

    state
        .run_load(|| collector.load_favorites(&team_ids))
        .await?;
    if let Some(message) = state.take_error() {
        eprintln!("{message}");
    }

    let matches = state.matches();
    if matches.is_empty() {
        println!("No matches found for your favorite teams");
        return Ok(());
    }
    render_matches(&mut stdout(), &matches, display_options(args))
}

/// Handles --match.
pub async fn handle_match_command(args: &Args, config: &Config, match_id: i64) -> Result<(), AppError> {
    let repository = MatchRepository::new(config)?;
    match repository.fetch_match_by_id(match_id).await {
        Ok(m) => render_match_detail(&mut stdout(), &m, display_options(args)),
        Err(e) if e.is_not_found() => {
            println!("Match {match_id} not found");
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            Err(e)
        }
    }
}

/// Handles --search through the debounced team search.
pub async fn handle_search_command(args: &Args, config: &Config, query: &str) -> Result<(), AppError> {
    let repository = Arc::new(MatchRepository::new(config)?);
    let mut search = TeamSearch::from_config(repository, config);
    search.submit(query);

    match search.settle().await {
        SearchState::Results(teams) if teams.is_empty() => {
            println!("No teams found for {query:?}");
        }
        SearchState::Results(teams) => {
            let favorites = match open_favorites().and_then(|f| f.team_ids()) {
                Ok(ids) => ids,
                Err(e) => {
                    warn!("Could not read favorites: {e}");
                    Default::default()
                }
            };
            render_teams(&mut stdout(), &teams, &favorites, display_options(args))?;
        }
        SearchState::Failed(message) => eprintln!("{message}"),
        SearchState::Idle | SearchState::Loading => {
            println!("Search queries need at least {MIN_SEARCH_QUERY_LEN} characters");
        }
    }
    Ok(())
}

/// Handles --standings.
pub async fn handle_standings_command(
    args: &Args,
    config: &Config,
    league_id: i64,
) -> Result<(), AppError> {
    let season = args.season.unwrap_or_else(|| Local::now().year());
    let repository = MatchRepository::new(config)?;
    match repository.fetch_standings(league_id, season).await {
        Ok(table) if table.is_empty() => {
            println!("No standings for league {league_id} in season {season}");
            Ok(())
        }
        Ok(table) => render_standings(&mut stdout(), &table, display_options(args)),
        Err(e) => {
            eprintln!("{}", e.user_message());
            Err(e)
        }
    }
}
