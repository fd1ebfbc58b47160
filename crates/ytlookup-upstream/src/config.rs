//! Upstream configuration.

use std::fmt;
use std::time::Duration;

use crate::retry::RetryConfig;

/// RapidAPI host serving video metadata and playlist pages.
pub const YOUTUBE_V31_HOST: &str = "youtube-v31.p.rapidapi.com";

/// RapidAPI host serving caption tracks and segments.
pub const CAPTIONS_HOST: &str = "youtube-captions-transcript-subtitles-video-combiner.p.rapidapi.com";

/// RapidAPI host serving MP3 conversion.
pub const MP3_HOST: &str = "youtube-mp36.p.rapidapi.com";

// =============================================================================
// API Key
// =============================================================================

/// A RapidAPI key. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting blank input.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw key, for request headers only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

// =============================================================================
// Endpoints
// =============================================================================

/// A RapidAPI host and the base URL requests are sent to.
///
/// The base URL differs from `https://{host}` only in tests.
#[derive(Debug, Clone)]
pub struct RapidApiEndpoint {
    pub host: String,
    pub base_url: String,
}

impl RapidApiEndpoint {
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            base_url: format!("https://{}", host),
            host,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Join a path (starting with `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for all third-party clients.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Video metadata and playlists
    pub video_info: RapidApiEndpoint,
    /// Caption tracks and segments
    pub captions: RapidApiEndpoint,
    /// MP3 conversion
    pub mp3: RapidApiEndpoint,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
    /// yt-dlp binary name or path
    pub ytdlp_path: String,
    /// Upper bound for a single yt-dlp run
    pub ytdlp_timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            video_info: RapidApiEndpoint::new(YOUTUBE_V31_HOST),
            captions: RapidApiEndpoint::new(CAPTIONS_HOST),
            mp3: RapidApiEndpoint::new(MP3_HOST),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            retry: RetryConfig::default(),
            ytdlp_path: "yt-dlp".to_string(),
            ytdlp_timeout: Duration::from_secs(60),
        }
    }
}

impl UpstreamConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };
        let endpoint = |default: RapidApiEndpoint, key: &str| match non_empty(key) {
            Some(base) => default.with_base_url(base),
            None => default,
        };

        Self {
            video_info: endpoint(defaults.video_info, "YOUTUBE_V31_BASE_URL"),
            captions: endpoint(defaults.captions, "CAPTIONS_API_BASE_URL"),
            mp3: endpoint(defaults.mp3, "MP3_API_BASE_URL"),
            timeout: secs("UPSTREAM_TIMEOUT_SECS", defaults.timeout),
            connect_timeout: secs("UPSTREAM_CONNECT_TIMEOUT_SECS", defaults.connect_timeout),
            retry: RetryConfig::from_lookup(&lookup),
            ytdlp_path: non_empty("YTDLP_PATH").unwrap_or(defaults.ytdlp_path),
            ytdlp_timeout: secs("YTDLP_TIMEOUT_SECS", defaults.ytdlp_timeout),
        }
    }

    /// Point every RapidAPI endpoint at one base URL.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.video_info = self.video_info.with_base_url(base_url);
        self.captions = self.captions.with_base_url(base_url);
        self.mp3 = self.mp3.with_base_url(base_url);
        self
    }
}
