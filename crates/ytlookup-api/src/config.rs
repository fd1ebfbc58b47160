//! API configuration.

use std::path::PathBuf;
use std::time::Duration;

use ytlookup_storage::DEFAULT_HISTORY_CAPACITY;
use ytlookup_upstream::ApiKey;

/// Largest playlist page budget any deployment may configure.
pub const PLAYLIST_ITEMS_HARD_LIMIT: usize = 1000;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Rate limit requests per second
    pub rate_limit_rps: u32,
    /// Request timeout
    pub request_timeout: Duration,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// Server-side RapidAPI key, used when the client sends none
    pub rapidapi_key: Option<ApiKey>,
    /// History file; in-memory history when unset
    pub history_path: Option<PathBuf>,
    /// Number of lookups kept in history
    pub history_capacity: usize,
    /// Playlist items fetched when `maxItems` is absent
    pub playlist_default_max_items: usize,
    /// Largest accepted `maxItems`
    pub playlist_max_items_cap: usize,
    /// Serve Prometheus metrics at /metrics
    pub metrics_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 10,
            request_timeout: Duration::from_secs(30),
            max_body_size: 1024 * 1024, // 1MB
            environment: "development".to_string(),
            rapidapi_key: None,
            history_path: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            playlist_default_max_items: 200,
            playlist_max_items_cap: PLAYLIST_ITEMS_HARD_LIMIT,
            metrics_enabled: true,
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let playlist_max_items_cap = parsed("PLAYLIST_MAX_ITEMS_CAP")
            .map(|v| (v as usize).clamp(1, PLAYLIST_ITEMS_HARD_LIMIT))
            .unwrap_or(defaults.playlist_max_items_cap);
        let playlist_default_max_items = parsed("PLAYLIST_DEFAULT_MAX_ITEMS")
            .map(|v| v as usize)
            .unwrap_or(defaults.playlist_default_max_items)
            .clamp(1, playlist_max_items_cap);

        Self {
            host: lookup("API_HOST").unwrap_or(defaults.host),
            port: lookup("API_PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps: lookup("RATE_LIMIT_RPS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.rate_limit_rps),
            request_timeout: parsed("REQUEST_TIMEOUT")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_body_size: parsed("MAX_BODY_SIZE")
                .map(|v| v as usize)
                .unwrap_or(defaults.max_body_size),
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            rapidapi_key: lookup("RAPIDAPI_KEY").and_then(ApiKey::new),
            history_path: lookup("HISTORY_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            // Zero is passed through so history loading can reject it
            history_capacity: parsed("HISTORY_CAPACITY")
                .map(|v| v as usize)
                .unwrap_or(defaults.history_capacity),
            playlist_default_max_items,
            playlist_max_items_cap,
            metrics_enabled: lookup("METRICS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.metrics_enabled),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
