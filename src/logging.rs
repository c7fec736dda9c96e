use crate::cli::Args;
use scoreline::config::Config;
use scoreline::error::AppError;
use std::io::stdout;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILE_NAME: &str = "scoreline.log";
const DEFAULT_LOG_DIRECTIVE: &str = "scoreline=info";

/// `RUST_LOG` when set and valid, `scoreline=info` otherwise.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

/// Splits a log file path into directory and file name.
fn split_log_path(custom_path: Option<&String>) -> (String, String) {
    match custom_path {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(DEFAULT_LOG_FILE_NAME);
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (Config::get_log_dir_path(), DEFAULT_LOG_FILE_NAME.to_string()),
    }
}

/// Sets up logging for the application.
///
/// Logs always go to a daily rolling file; `--debug` adds a stdout layer.
/// The log location is `--log-file`, else the config's `log_file_path`,
/// else the default log directory.
///
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub async fn setup_logging(args: &Args) -> Result<(String, WorkerGuard), AppError> {
    let config_log_path = Config::load()
        .await
        .ok()
        .and_then(|config| config.log_file_path);

    let custom_log_path = args.log_file.as_ref().or(config_log_path.as_ref());
    let (log_dir, log_file_name) = split_log_path(custom_log_path);

    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::Layer::new()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(env_filter());
    let stdout_layer = args.debug.then(|| {
        fmt::Layer::new()
            .with_writer(stdout)
            .with_ansi(!args.plain)
            .with_filter(env_filter())
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| AppError::log_setup_error(format!("Failed to install subscriber: {e}")))?;

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_custom_log_path() {
        let custom = "/var/log/scoreline/app.log".to_string();
        assert_eq!(
            split_log_path(Some(&custom)),
            ("/var/log/scoreline".to_string(), "app.log".to_string())
        );
    }

    #[test]
    fn test_bare_file_name_logs_to_current_dir() {
        let custom = "app.log".to_string();
        assert_eq!(
            split_log_path(Some(&custom)),
            (".".to_string(), "app.log".to_string())
        );
    }

    #[test]
    fn test_default_log_path() {
        let (dir, file) = split_log_path(None);
        assert!(dir.ends_with("logs"));
        assert_eq!(file, DEFAULT_LOG_FILE_NAME);
    }
}
