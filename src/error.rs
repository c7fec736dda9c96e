use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    ApiParse(#[from] serde_json::Error),

    // Specific HTTP status code errors
    #[error("Invalid API key (401) (URL: {url})")]
    ApiInvalidKey { url: String },

    #[error("Access forbidden (403) (URL: {url})")]
    ApiForbidden { url: String },

    #[error("API rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API Error: {status} (URL: {url})")]
    ApiStatus { status: u16, url: String },

    /// The provider answered 200 but filled its `errors` field.
    #[error("API provider reported an error: {message} (URL: {url})")]
    ApiProvider { message: String, url: String },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Data parsing and validation errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("API returned empty or missing data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    #[error("Match not found: match_id={match_id}")]
    MatchNotFound { match_id: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Load superseded by generation {latest} (this load: {generation})")]
    Superseded { generation: u64, latest: u64 },
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a pipeline control-logic error
    pub fn pipeline_error(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }

    pub fn api_invalid_key(url: impl Into<String>) -> Self {
        Self::ApiInvalidKey { url: url.into() }
    }

    pub fn api_forbidden(url: impl Into<String>) -> Self {
        Self::ApiForbidden { url: url.into() }
    }

    /// Create an API rate limit error
    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Any other non-success status
    pub fn api_status(status: u16, url: impl Into<String>) -> Self {
        Self::ApiStatus {
            status,
            url: url.into(),
        }
    }

    pub fn api_provider(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiProvider {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn match_not_found(match_id: i64) -> Self {
        Self::MatchNotFound { match_id }
    }

    /// Check if error is retryable (network issues, server errors, rate limits)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::ApiServerError { .. }
                | AppError::ApiRateLimit { .. }
        )
    }

    /// Check if error indicates data not found (business logic, not technical error)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::MatchNotFound { .. } | AppError::ApiNoData { .. }
        )
    }

    /// Short message suitable for showing to the user once.
    ///
    /// HTTP failures collapse into the fixed status-keyed messages; everything
    /// else falls back to the full error text.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ApiInvalidKey { .. } => "Invalid API key".to_string(),
            AppError::ApiForbidden { .. } => "Access forbidden".to_string(),
            AppError::ApiRateLimit { .. } => {
                "Rate limit exceeded. Please try again later.".to_string()
            }
            AppError::ApiServerError { .. } => "Server error. Please try again later.".to_string(),
            AppError::ApiStatus { status, .. } => format!("API Error: {status}"),
            AppError::ApiFetch(e) => format!("Network error: {e}"),
            AppError::NetworkTimeout { .. } | AppError::NetworkConnection { .. } => {
                format!("Network error: {self}")
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_status_user_messages() {
        let url = "https://api.example.com/fixtures?live=all";
        assert_eq!(AppError::api_invalid_key(url).user_message(), "Invalid API key");
        assert_eq!(AppError::api_forbidden(url).user_message(), "Access forbidden");
        assert_eq!(
            AppError::api_rate_limit("Too Many Requests", url).user_message(),
            "Rate limit exceeded. Please try again later."
        );
        assert_eq!(
            AppError::api_server_error(503, "Service Unavailable", url).user_message(),
            "Server error. Please try again later."
        );
        assert_eq!(AppError::api_status(418, url).user_message(), "API Error: 418");
    }

    #[test]
    fn test_network_errors_prefixed() {
        let error = AppError::network_timeout("https://api.example.com");
        assert!(error.user_message().starts_with("Network error: "));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(AppError::network_timeout("u").is_retryable());
        assert!(AppError::api_rate_limit("slow down", "u").is_retryable());
        assert!(AppError::api_server_error(500, "boom", "u").is_retryable());
        assert!(!AppError::api_invalid_key("u").is_retryable());
        assert!(!AppError::api_status(404, "u").is_retryable());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(AppError::match_not_found(42).is_not_found());
        assert!(AppError::api_no_data("empty", "u").is_not_found());
        assert!(!AppError::config_error("x").is_not_found());
    }

    #[test]
    fn test_superseded_display() {
        let error = AppError::Superseded {
            generation: 3,
            latest: 5,
        };
        assert_eq!(
            error.to_string(),
            "Load superseded by generation 5 (this load: 3)"
        );
    }

    #[test]
    fn test_toml_deserialize_conversion() {
        let toml_error = toml::from_str::<toml::Table>("invalid = [").unwrap_err();
        let error: AppError = toml_error.into();
        assert!(matches!(error, AppError::TomlDeserialize(_)));
    }
}
