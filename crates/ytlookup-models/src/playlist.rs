//! Playlist models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::url_parse::{is_id_charset, parse_youtube_url, trim_input, ProcessableLevel};

/// Fallback title for playlist entries without one.
pub const UNTITLED_ITEM: &str = "Untitled";

/// A video entry in a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    /// Video ID (may be empty for removed/private entries)
    pub id: String,
    pub title: String,
    /// Highest quality thumbnail URL
    pub thumbnail: String,
    pub published_at: String,
}

/// Playlist contents, possibly truncated to a caller-supplied cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    pub playlist_id: String,
    pub title: String,
    pub items: Vec<PlaylistItem>,
    /// Total size reported upstream
    pub total_results: u64,
    /// True if the item cap was reached before the playlist was exhausted
    pub partial: bool,
    /// Re-fetch stability of this playlist
    pub processable_level: ProcessableLevel,
}

/// Resolve a playlist ID from a playlist URL, a watch URL with `list=`, or a
/// bare playlist ID.
pub fn resolve_playlist_id(input: &str) -> Option<String> {
    let parsed = parse_youtube_url(input);
    if let Some(id) = parsed.playlist_id {
        return Some(id);
    }

    let trimmed = trim_input(input);
    if trimmed.is_empty() || Url::parse(trimmed).is_ok() {
        return None;
    }

    is_id_charset(trimmed).then(|| trimmed.to_string())
}
