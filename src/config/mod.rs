use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod user_prompts;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Provider API key sent with every request.
    pub api_key: String,
    /// Value of the API host header.
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// Base URL requests are issued against. Should include the scheme.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Minimum spacing between sequential aggregation requests.
    #[serde(default = "default_request_delay")]
    pub request_delay_ms: u64,
    /// Debounce applied to interactive team searches.
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u64,
    /// Bounded LRU capacity for repository caches. Unset keeps them unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_capacity: Option<usize>,
}

fn default_api_host() -> String {
    constants::DEFAULT_API_HOST.to_string()
}

fn default_api_base_url() -> String {
    constants::DEFAULT_API_BASE_URL.to_string()
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_request_delay() -> u64 {
    constants::pacing::DEFAULT_REQUEST_DELAY_MS
}

fn default_search_debounce() -> u64 {
    constants::pacing::DEFAULT_SEARCH_DEBOUNCE_MS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: String::new(),
            api_host: default_api_host(),
            api_base_url: default_api_base_url(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            request_delay_ms: default_request_delay(),
            search_debounce_ms: default_search_debounce(),
            cache_capacity: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Environment variables override config file values.
    ///
    /// # Environment Variables
    /// - `SCORELINE_API_KEY` - Override API key
    /// - `SCORELINE_API_HOST` - Override API host header
    /// - `SCORELINE_API_BASE_URL` - Override base URL
    /// - `SCORELINE_LOG_FILE` - Override log file path
    /// - `SCORELINE_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(AppError)` - No API key anywhere, unreadable file, or validation failure
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else if std::env::var(env_vars::API_KEY).is_ok() {
            Config::default()
        } else {
            return Err(AppError::config_error(format!(
                "No configuration found at {config_path}. Run `scoreline --set-api-key <KEY>` first"
            )));
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `SCORELINE_*` environment overrides in place.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var(env_vars::API_KEY) {
            self.api_key = api_key;
        }

        if let Ok(api_host) = std::env::var(env_vars::API_HOST) {
            self.api_host = api_host;
        }

        if let Ok(base_url) = std::env::var(env_vars::API_BASE_URL) {
            self.api_base_url = base_url;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.api_key,
            &self.api_base_url,
            self.http_timeout_seconds,
            &self.log_file_path,
        )
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// The API key is masked down to its last four characters.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("API Key:");
            println!("{}", mask_secret(&config.api_key));
            println!("────────────────────────────────────");
            println!("API Host / Base URL:");
            println!("{}", config.api_host);
            println!("{}", config.api_base_url);
            println!("────────────────────────────────────");
            println!("HTTP Timeout:");
            println!("{} seconds", config.http_timeout_seconds);
            println!("────────────────────────────────────");
            println!("Request Delay / Search Debounce:");
            println!(
                "{} ms / {} ms",
                config.request_delay_ms, config.search_debounce_ms
            );
            println!("────────────────────────────────────");
            println!("Cache Capacity:");
            match config.cache_capacity {
                Some(capacity) => println!("{capacity} entries per cache (LRU)"),
                None => println!("Unbounded"),
            }
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/scoreline.log");
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path, creating the parent directory if needed.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let api_base_url = if self.api_base_url.starts_with("http://")
            || self.api_base_url.starts_with("https://")
        {
            self.api_base_url.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", self.api_base_url.trim_end_matches('/'))
        };
        let content = toml::to_string_pretty(&Config {
            api_base_url,
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if secret.chars().count() <= 4 {
        "*".repeat(secret.chars().count())
    } else {
        format!("****{visible}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
api_key = "abc123"
log_file_path = "/custom/log/path"
"#;
        tokio::fs::write(&config_path, config_content).await.unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.api_host, constants::DEFAULT_API_HOST);
        assert_eq!(config.api_base_url, constants::DEFAULT_API_BASE_URL);
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert_eq!(config.request_delay_ms, 50);
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.cache_capacity, None);
    }

    #[tokio::test]
    async fn test_config_save_adds_scheme_and_trims_slash() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config {
            api_key: "abc123".to_string(),
            api_base_url: "api.example.com/".to_string(),
            ..Config::default()
        };
        config.save_to_path(&config_path_str).await.unwrap();

        let loaded_config = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded_config.api_base_url, "https://api.example.com");
    }

    #[tokio::test]
    async fn test_config_save_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let config_dir = temp_dir.path().join("scoreline");
        let config_path = config_dir.join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config {
            api_key: "abc123".to_string(),
            ..Config::default()
        };
        config.save_to_path(&config_path_str).await.unwrap();
        assert!(config_dir.exists());
        assert!(config_path.exists());
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let original_config = Config {
            api_key: "abc123".to_string(),
            log_file_path: Some("/custom/log/path".to_string()),
            cache_capacity: Some(64),
            request_delay_ms: 100,
            ..Config::default()
        };
        original_config
            .save_to_path(&config_path_str)
            .await
            .unwrap();
        let loaded_config = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_optional_fields_not_serialized_when_none() {
        let config = Config {
            api_key: "abc123".to_string(),
            ..Config::default()
        };
        let toml_string = toml::to_string_pretty(&config).unwrap();
        assert!(!toml_string.contains("log_file_path"));
        assert!(!toml_string.contains("cache_capacity"));
    }

    #[tokio::test]
    async fn test_config_load_invalid_toml() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "api_key = [1, 2, \"unclosed")
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        // SAFETY: serialized test, no other thread reads these variables
        unsafe {
            std::env::set_var(env_vars::API_KEY, "from-env");
            std::env::set_var(env_vars::HTTP_TIMEOUT, "7");
            std::env::set_var(env_vars::API_BASE_URL, "http://localhost:9999");
        }

        let mut config = Config {
            api_key: "from-file".to_string(),
            ..Config::default()
        };
        config.apply_env_overrides();

        unsafe {
            std::env::remove_var(env_vars::API_KEY);
            std::env::remove_var(env_vars::HTTP_TIMEOUT);
            std::env::remove_var(env_vars::API_BASE_URL);
        }

        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.http_timeout_seconds, 7);
        assert_eq!(config.api_base_url, "http://localhost:9999");
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_env_is_ignored() {
        unsafe {
            std::env::set_var(env_vars::HTTP_TIMEOUT, "soon");
        }
        let mut config = Config::default();
        config.apply_env_overrides();
        unsafe {
            std::env::remove_var(env_vars::HTTP_TIMEOUT);
        }
        assert_eq!(config.http_timeout_seconds, constants::DEFAULT_HTTP_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdef123456"), "****3456");
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn test_get_paths() {
        assert!(Config::get_config_path().contains("scoreline"));
        assert!(Config::get_config_path().ends_with("config.toml"));
        assert!(Config::get_log_dir_path().ends_with("logs"));
    }
}
