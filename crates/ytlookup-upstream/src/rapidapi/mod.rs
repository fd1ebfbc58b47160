//! RapidAPI-backed sources.
//!
//! [`RapidApiClient`](crate::client::RapidApiClient) implements every
//! source trait; each submodule covers one upstream API.

mod captions;
mod mp3;
mod playlist;
mod video_info;

use serde::Deserialize;
use serde_json::Value;
use ytlookup_models::Thumbnail;

// =============================================================================
// Shared wire types
// =============================================================================

/// A single thumbnail as the v3-style APIs describe it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiThumbnail {
    url: String,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

/// Named thumbnail sizes, declared lowest quality first.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ThumbnailSet {
    #[serde(default)]
    default: Option<ApiThumbnail>,
    #[serde(default)]
    medium: Option<ApiThumbnail>,
    #[serde(default)]
    high: Option<ApiThumbnail>,
    #[serde(default)]
    standard: Option<ApiThumbnail>,
    #[serde(default)]
    maxres: Option<ApiThumbnail>,
}

impl ThumbnailSet {
    /// Thumbnails in ascending quality.
    pub(crate) fn into_ordered(self) -> Vec<Thumbnail> {
        [self.default, self.medium, self.high, self.standard, self.maxres]
            .into_iter()
            .flatten()
            .filter(|t| !t.url.is_empty())
            .map(|t| Thumbnail {
                url: t.url,
                width: t.width,
                height: t.height,
            })
            .collect()
    }
}

/// Read a count that may arrive as a JSON number or a numeric string.
pub(crate) fn lenient_u64(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a float that may arrive as a JSON number or a numeric string.
pub(crate) fn lenient_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A string field that is present and not blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
