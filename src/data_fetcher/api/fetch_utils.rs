//! Generic HTTP fetching utilities with retry logic and error mapping

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::constants::{headers, retry};
use crate::data_fetcher::models::ApiEnvelope;
use crate::error::AppError;

/// Static header values identifying the caller to the provider.
#[derive(Clone)]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_host: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"***")
            .field("api_host", &self.api_host)
            .finish()
    }
}

/// How transient failures (timeouts, connect errors, 429, 5xx) are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Fail on the first error.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: retry::MAX_ATTEMPTS,
            base_delay: Duration::from_millis(retry::BASE_DELAY_MS),
        }
    }
}

/// Maps a non-success HTTP status onto the error taxonomy.
pub fn error_for_status(status: StatusCode, url: &str) -> AppError {
    let reason = status.canonical_reason().unwrap_or("Unknown error");
    match status.as_u16() {
        401 => AppError::api_invalid_key(url),
        403 => AppError::api_forbidden(url),
        429 => AppError::api_rate_limit(reason, url),
        code @ 500..=599 => AppError::api_server_error(code, reason, url),
        code => AppError::api_status(code, url),
    }
}

/// Seconds from a `Retry-After` header, when present and numeric.
fn retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn transport_error(e: reqwest::Error, url: &str) -> AppError {
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::ApiFetch(e)
    }
}

/// Generic fetch function with retry logic and status-code error mapping.
///
/// Failures for which [`AppError::is_retryable`] holds are retried with
/// exponential backoff, honoring a `Retry-After` header when the provider
/// sends one.
#[instrument(skip(client, credentials, policy))]
pub(super) async fn fetch<T: DeserializeOwned>(
    client: &Client,
    credentials: &ApiCredentials,
    policy: RetryPolicy,
    url: &str,
) -> Result<T, AppError> {
    info!("Fetching data from URL: {url}");

    let mut attempt = 0u32;
    let mut backoff = policy.base_delay;
    let response = loop {
        let request = client
            .get(url)
            .header(headers::API_KEY, &credentials.api_key)
            .header(headers::API_HOST, &credentials.api_host);

        let (failure, server_wait) = match request.send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!("Response status: {}", resp.status());
                break resp;
            }
            Ok(resp) => (error_for_status(resp.status(), url), retry_after(&resp)),
            Err(e) => (transport_error(e, url), None),
        };

        if !failure.is_retryable() || attempt >= policy.max_retries {
            error!("Request failed for URL {url}: {failure}");
            return Err(failure);
        }

        let wait = server_wait.unwrap_or(backoff);
        warn!(
            "{} Retrying in {:?} (attempt {}/{})",
            failure,
            wait,
            attempt + 1,
            policy.max_retries
        );
        tokio::time::sleep(wait).await;
        attempt += 1;
        backoff = backoff.saturating_mul(2);
    };

    let response_text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read response text from URL {}: {}", url, e);
            return Err(AppError::ApiFetch(e));
        }
    };

    debug!("Response length: {} bytes", response_text.len());

    match serde_json::from_str::<T>(&response_text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                &response_text.chars().take(200).collect::<String>()
            );

            if response_text.trim().is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !response_text.trim_start().starts_with('{')
                && !response_text.trim_start().starts_with('[')
            {
                Err(AppError::api_malformed_json(
                    "Response is not valid JSON",
                    url,
                ))
            } else if e.classify() == Category::Data {
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            } else {
                Err(AppError::ApiParse(e))
            }
        }
    }
}

/// Describes the provider's `errors` field, or `None` when it signals success.
///
/// The provider sends `[]` on success and either a non-empty array or an
/// object keyed by error kind on failure.
pub fn provider_error_message(errors: &serde_json::Value) -> Option<String> {
    match errors {
        serde_json::Value::Object(map) if !map.is_empty() => Some(
            map.iter()
                .map(|(kind, detail)| match detail.as_str() {
                    Some(text) => format!("{kind}: {text}"),
                    None => format!("{kind}: {detail}"),
                })
                .collect::<Vec<_>>()
                .join("; "),
        ),
        serde_json::Value::Array(items) if !items.is_empty() => Some(
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string).unwrap_or_else(|| item.to_string()))
                .collect::<Vec<_>>()
                .join("; "),
        ),
        _ => None,
    }
}

/// Fetches a provider envelope and returns its raw `response` records.
///
/// Records stay untyped so the caller can drop malformed ones individually.
/// A populated `errors` field becomes an error even on HTTP 200; rate-limit
/// complaints map onto [`AppError::ApiRateLimit`].
pub(super) async fn fetch_records(
    client: &Client,
    credentials: &ApiCredentials,
    policy: RetryPolicy,
    url: &str,
) -> Result<Vec<serde_json::Value>, AppError> {
    let envelope: ApiEnvelope<serde_json::Value> = fetch(client, credentials, policy, url).await?;

    if let Some(message) = provider_error_message(&envelope.errors) {
        warn!("Provider reported errors for {url}: {message}");
        let rate_limited = envelope
            .errors
            .as_object()
            .is_some_and(|map| map.contains_key("rateLimit") || map.contains_key("requests"));
        return Err(if rate_limited {
            AppError::api_rate_limit(message, url)
        } else {
            AppError::api_provider(message, url)
        });
    }

    debug!(
        "Envelope for {url}: results={:?}, records={}",
        envelope.results,
        envelope.response.len()
    );
    Ok(envelope.response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    fn credentials() -> ApiCredentials {
        ApiCredentials {
            api_key: "test-key".to_string(),
            api_host: "test-host".to_string(),
        }
    }

    #[test]
    fn test_error_for_status_mapping() {
        let url = "http://localhost/fixtures";
        assert!(matches!(
            error_for_status(StatusCode::UNAUTHORIZED, url),
            AppError::ApiInvalidKey { .. }
        ));
        assert!(matches!(
            error_for_status(StatusCode::FORBIDDEN, url),
            AppError::ApiForbidden { .. }
        ));
        assert!(matches!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS, url),
            AppError::ApiRateLimit { .. }
        ));
        assert!(matches!(
            error_for_status(StatusCode::BAD_GATEWAY, url),
            AppError::ApiServerError { status: 502, .. }
        ));
        let other = error_for_status(StatusCode::NOT_FOUND, url);
        assert_eq!(other.user_message(), "API Error: 404");
    }

    #[test]
    fn test_provider_error_message() {
        assert_eq!(provider_error_message(&json!([])), None);
        assert_eq!(provider_error_message(&json!({})), None);
        assert_eq!(provider_error_message(&serde_json::Value::Null), None);
        assert_eq!(
            provider_error_message(&json!({"token": "Error/Missing application key"})).as_deref(),
            Some("token: Error/Missing application key")
        );
        assert_eq!(
            provider_error_message(&json!(["bad date"])).as_deref(),
            Some("bad date")
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_auth_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fixtures"))
            .and(header(headers::API_KEY, "test-key"))
            .and(header(headers::API_HOST, "test-host"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"errors": [], "results": 1, "response": [{"a": 1}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/fixtures", server.uri());
        let records = fetch_records(&client, &credentials(), RetryPolicy::none(), &url)
            .await
            .unwrap();
        assert_eq!(records, vec![json!({"a": 1})]);
    }

    #[tokio::test]
    async fn test_fetch_retries_server_errors_then_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fixtures"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/fixtures", server.uri());
        let policy = RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(1),
        };
        let result = fetch_records(&client, &credentials(), policy, &url).await;
        match result {
            Err(e @ AppError::ApiServerError { status: 503, .. }) => {
                assert_eq!(e.user_message(), "Server error. Please try again later.");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_provider_rate_limit_on_http_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fixtures"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": {"rateLimit": "Too many requests"},
                "results": 0,
                "response": []
            })))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/fixtures", server.uri());
        let result = fetch_records(&client, &credentials(), RetryPolicy::none(), &url).await;
        assert!(matches!(result, Err(AppError::ApiRateLimit { .. })));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fixtures"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/fixtures", server.uri());
        let result = fetch_records(&client, &credentials(), RetryPolicy::none(), &url).await;
        assert!(matches!(result, Err(AppError::ApiMalformedJson { .. })));
    }

    #[tokio::test]
    async fn test_truncated_json_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fixtures"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"errors": [], "response": ["#))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/fixtures", server.uri());
        let result = fetch_records(&client, &credentials(), RetryPolicy::none(), &url).await;
        assert!(matches!(result, Err(AppError::ApiParse(_))));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_unexpected_structure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fixtures"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": 7})))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/fixtures", server.uri());
        let result = fetch_records(&client, &credentials(), RetryPolicy::none(), &url).await;
        assert!(matches!(result, Err(AppError::ApiUnexpectedStructure { .. })));
    }

    #[tokio::test]
    async fn test_non_retryable_status_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fixtures"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/fixtures", server.uri());
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(1),
        };
        let result = fetch_records(&client, &credentials(), policy, &url).await;
        assert!(matches!(result, Err(AppError::ApiInvalidKey { .. })));
    }

    #[tokio::test]
    async fn test_rate_limit_recovers_on_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fixtures"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fixtures"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"errors": [], "response": [{"id": 1}]})),
            )
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/fixtures", server.uri());
        let policy = RetryPolicy {
            max_retries: 1,
            base_delay: Duration::from_millis(1),
        };
        let records = fetch_records(&client, &credentials(), policy, &url)
            .await
            .unwrap();
        assert_eq!(records, vec![json!({"id": 1})]);
    }

    #[tokio::test]
    async fn test_empty_body_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fixtures"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let client = create_test_http_client();
        let url = format!("{}/fixtures", server.uri());
        let result = fetch_records(&client, &credentials(), RetryPolicy::none(), &url).await;
        assert!(matches!(result, Err(AppError::ApiNoData { .. })));
    }
}
