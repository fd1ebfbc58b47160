//! Prometheus metrics for the API server.

use std::sync::LazyLock;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use regex_lite::Regex;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "ytlookup_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "ytlookup_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "ytlookup_http_requests_in_flight";

    // Lookup metrics
    pub const URL_CLASSIFICATIONS_TOTAL: &str = "ytlookup_url_classifications_total";
    pub const HISTORY_ENTRIES: &str = "ytlookup_history_entries";
    pub const HISTORY_WRITE_FAILURES_TOTAL: &str = "ytlookup_history_write_failures_total";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "ytlookup_rate_limit_hits_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record the outcome of classifying a user-supplied URL.
pub fn record_url_classification(kind: &str) {
    let labels = [("kind", kind.to_string())];
    counter!(names::URL_CLASSIFICATIONS_TOTAL, &labels).increment(1);
}

/// Update history size gauge.
pub fn record_history_size(entries: usize) {
    gauge!(names::HISTORY_ENTRIES).set(entries as f64);
}

/// Record a history persistence failure.
pub fn record_history_write_failure(operation: &str) {
    let labels = [("operation", operation.to_string())];
    counter!(names::HISTORY_WRITE_FAILURES_TOTAL, &labels).increment(1);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

static HISTORY_ENTRY_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/history/[A-Za-z0-9_-]+").expect("valid history path regex"));

/// Sanitize path for metrics labels (remove IDs, etc.).
fn sanitize_path(path: &str) -> String {
    HISTORY_ENTRY_PATH
        .replace_all(path, "/history/:video_id")
        .to_string()
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    // Increment in-flight counter
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    // Decrement in-flight counter
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
