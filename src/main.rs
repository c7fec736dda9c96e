// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::Args;
use commands::{
    handle_favorite_commands, handle_favorites_view_command, handle_list_config_command,
    handle_match_command, handle_match_list_command, handle_search_command,
    handle_set_api_key_command, handle_standings_command, handle_version_command, validate_args,
};
use logging::setup_logging;
use scoreline::config::Config;
use scoreline::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    validate_args(&args)?;

    if args.version {
        handle_version_command();
        return Ok(());
    }

    // The guard must stay alive until exit so buffered logs are flushed.
    let (log_file_path, _guard) = setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    // Local operations run without a working provider config.
    if args.is_local_operation() {
        if args.list_config {
            return handle_list_config_command().await;
        }
        if let Some(key) = &args.set_api_key {
            return handle_set_api_key_command(key).await;
        }
        return handle_favorite_commands(&args);
    }

    let config = Config::load().await?;

    if args.favorites {
        handle_favorites_view_command(&args, &config).await
    } else if let Some(match_id) = args.match_id {
        handle_match_command(&args, &config, match_id).await
    } else if let Some(query) = &args.search {
        handle_search_command(&args, &config, query).await
    } else if let Some(league_id) = args.standings {
        handle_standings_command(&args, &config, league_id).await
    } else {
        handle_match_list_command(&args, &config).await
    }
}
