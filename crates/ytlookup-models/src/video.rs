//! Video details models.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fallback title when the upstream omits one.
pub const UNTITLED_VIDEO: &str = "Untitled video";

/// Fallback author when the upstream omits the channel title.
pub const UNKNOWN_CHANNEL: &str = "Unknown channel";

/// A single thumbnail rendition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Normalized video details, independent of which upstream produced them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    /// 11-character YouTube video ID
    pub id: String,

    /// Video title
    pub title: String,

    /// Channel title
    pub author: String,

    /// Channel ID
    #[serde(default)]
    pub channel_id: String,

    /// Video description
    #[serde(default)]
    pub description: String,

    /// Thumbnails ordered lowest to highest quality
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,

    /// View count
    #[serde(default)]
    pub view_count: u64,

    /// Publish timestamp as reported upstream (RFC 3339)
    #[serde(default)]
    pub published_at: String,

    /// Duration in seconds
    #[serde(default)]
    pub length_seconds: u64,
}

impl VideoDetails {
    /// URL of the highest quality thumbnail.
    pub fn best_thumbnail(&self) -> Option<&str> {
        self.thumbnails.last().map(|t| t.url.as_str())
    }

    /// Canonical watch URL.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

static ISO8601_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("valid duration regex")
});

/// Convert an ISO 8601 duration (`PT4M13S`) into seconds.
///
/// Empty, unrecognised or out-of-range input yields 0.
pub fn parse_iso8601_duration(duration: &str) -> u64 {
    let Some(caps) = ISO8601_DURATION.captures(duration.trim()) else {
        return 0;
    };

    let part = |idx: usize| -> u64 {
        caps.get(idx)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    part(1)
        .checked_mul(3600)
        .zip(part(2).checked_mul(60))
        .and_then(|(hours, minutes)| hours.checked_add(minutes))
        .and_then(|total| total.checked_add(part(3)))
        .unwrap_or(0)
}
