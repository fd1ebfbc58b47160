//! RapidAPI HTTP client.
//!
//! Shared by every RapidAPI-backed source:
//! - HTTP client tuning (pooling, timeouts)
//! - `x-rapidapi-key` / `x-rapidapi-host` headers
//! - Exponential backoff with jitter
//! - Observability (tracing spans, metrics)

use std::time::{Duration, Instant};

use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info_span, Instrument};

use crate::config::{ApiKey, RapidApiEndpoint, UpstreamConfig};
use crate::error::{UpstreamError, UpstreamResult};
use crate::metrics::record_request;

/// Header carrying the RapidAPI key.
pub const RAPIDAPI_KEY_HEADER: &str = "x-rapidapi-key";

/// Header naming the RapidAPI host being called.
pub const RAPIDAPI_HOST_HEADER: &str = "x-rapidapi-host";

/// Longest error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// A raw response body with its content type.
#[derive(Debug, Clone)]
pub struct RawBody {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl RawBody {
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false)
    }
}

/// RapidAPI REST client.
#[derive(Clone)]
pub struct RapidApiClient {
    http: Client,
    config: UpstreamConfig,
}

impl RapidApiClient {
    /// Create a new client.
    pub fn new(config: UpstreamConfig) -> UpstreamResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("ytlookup-upstream/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UpstreamError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> UpstreamResult<Self> {
        Self::new(UpstreamConfig::from_env())
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// GET a JSON document.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        endpoint: &RapidApiEndpoint,
        path: &str,
        query: &[(&str, &str)],
        key: &ApiKey,
    ) -> UpstreamResult<T> {
        let url = endpoint.url(path);

        self.execute_request(operation, &endpoint.host, async {
            let url = url.as_str();
            let response = self
                .with_retry(operation, move || self.send_get(endpoint, url, query, key))
                .await?;

            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                UpstreamError::invalid_response(format!(
                    "{} returned unparseable JSON: {} (body prefix: {})",
                    url,
                    e,
                    truncate(&body)
                ))
            })
        })
        .await
    }

    /// GET a body of any content type.
    pub async fn get_raw(
        &self,
        operation: &str,
        endpoint: &RapidApiEndpoint,
        path: &str,
        query: &[(&str, &str)],
        key: &ApiKey,
    ) -> UpstreamResult<RawBody> {
        let url = endpoint.url(path);

        self.execute_request(operation, &endpoint.host, async {
            let url = url.as_str();
            let response = self
                .with_retry(operation, move || self.send_get(endpoint, url, query, key))
                .await?;

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let bytes = response.bytes().await?.to_vec();

            debug!(bytes = bytes.len(), content_type = ?content_type, "Received raw body");
            Ok(RawBody { content_type, bytes })
        })
        .await
    }

    /// Execute with retry.
    pub async fn with_retry<T, F, Fut>(&self, operation: &str, op: F) -> UpstreamResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = UpstreamResult<T>>,
    {
        crate::retry::with_retry(&self.config.retry, operation, op).await
    }

    async fn send_get(
        &self,
        endpoint: &RapidApiEndpoint,
        url: &str,
        query: &[(&str, &str)],
        key: &ApiKey,
    ) -> UpstreamResult<Response> {
        let response = self
            .http
            .get(url)
            .query(query)
            .header(RAPIDAPI_KEY_HEADER, key.expose())
            .header(RAPIDAPI_HOST_HEADER, endpoint.host.as_str())
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::handle_error_response(url, response).await)
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn execute_request<T, F>(&self, operation: &str, host: &str, fut: F) -> UpstreamResult<T>
    where
        F: std::future::Future<Output = UpstreamResult<T>>,
    {
        let span = info_span!("upstream_request", operation = %operation, host = %host);

        let start = Instant::now();
        let result = fut.instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(500),
        };
        record_request(operation, status, latency_ms);

        result
    }

    async fn handle_error_response(url: &str, response: Response) -> UpstreamError {
        let status = response.status().as_u16();
        let retry_after_ms = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|secs| secs.saturating_mul(1000));
        let body = response.text().await.unwrap_or_default();

        UpstreamError::from_http_status(
            status,
            format!("{} failed: {}", url, truncate(&body)),
            retry_after_ms,
        )
    }
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

/// Client pointed at a mock server, with near-zero retry delays.
#[cfg(test)]
pub(crate) fn test_client(server: &wiremock::MockServer) -> RapidApiClient {
    let config = UpstreamConfig {
        retry: crate::retry::RetryConfig {
            max_retries: 2,
            base_delay_ms: 1,
            max_delay_ms: 5,
        },
        ..UpstreamConfig::default()
    }
    .with_base_url(&server.uri());
    RapidApiClient::new(config).expect("test client")
}

// =============================================================================
// Tests
// =============================================================================
