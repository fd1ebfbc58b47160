//! YouTube URL classification.
//!
//! Turns a raw user string (full URL, `youtu.be` short link, or bare video ID)
//! into a [`ParsedUrl`] describing what kind of resource it points at.
//!
//! The classifier is a pure function of its input:
//! - Never panics; every failure is encoded in [`ParsedUrl::url_kind`] /
//!   [`ParsedUrl::error`]
//! - No shared parser state, no global configuration
//! - Safe to call concurrently from any number of tasks
//!
//! The path/prefix checks below are YouTube conventions rather than a published
//! contract, so each one lives in its own named predicate.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

// ============================================================================
// Heuristic constants
// ============================================================================

/// Host token identifying short links (`https://youtu.be/<id>`).
pub const SHORT_LINK_HOST_TOKEN: &str = "youtu.be";

/// Path prefix of Shorts URLs (`/shorts/<id>`).
pub const SHORTS_PATH_PREFIX: &str = "/shorts/";

/// Path prefix of playlist listing pages (`/playlist?list=...`).
pub const PLAYLIST_PATH_PREFIX: &str = "/playlist";

/// Path prefix of watch pages (`/watch?v=...`).
pub const WATCH_PATH_PREFIX: &str = "/watch";

/// YouTube video IDs are exactly this many characters.
pub const VIDEO_ID_LEN: usize = 11;

/// Playlist ID prefix of auto-generated mixes / radio.
pub const MIX_RADIO_PREFIX: &str = "RD";

/// Playlist ID prefix of user-created playlists.
pub const USER_PLAYLIST_PREFIX: &str = "PL";

/// Playlist ID prefix of a channel's uploads list.
pub const CHANNEL_UPLOADS_PREFIX: &str = "UU";

/// Playlist ID prefix of liked videos / watch later.
pub const LIKES_WATCH_LATER_PREFIX: &str = "LL";

// ============================================================================
// Output Types
// ============================================================================

/// Classification of the resource a URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UrlKind {
    /// A single video
    Video,
    /// A playlist listing page
    Playlist,
    /// A video opened within a playlist context
    VideoInPlaylist,
    /// A Shorts URL whose ID could not be resolved
    Shorts,
    /// A well-formed URL with no recognised video or playlist reference
    Unknown,
    /// Input that could not be interpreted at all
    Invalid,
}

impl UrlKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrlKind::Video => "video",
            UrlKind::Playlist => "playlist",
            UrlKind::VideoInPlaylist => "video_in_playlist",
            UrlKind::Shorts => "shorts",
            UrlKind::Unknown => "unknown",
            UrlKind::Invalid => "invalid",
        }
    }
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Heuristic classification of a playlist ID by its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistKind {
    /// `RD...` auto-generated mix / radio
    MixRadio,
    /// `PL...` user playlist
    UserPlaylist,
    /// `UU...` channel uploads
    ChannelUploads,
    /// `LL...` likes / watch later
    LikesWatchLater,
    /// Any other prefix
    Other,
    /// No playlist ID present
    #[default]
    #[serde(rename = "")]
    None,
}

impl PlaylistKind {
    /// Classify a playlist ID. Matching is case-sensitive and anchored at the
    /// start of the identifier; every non-empty ID maps to exactly one kind.
    pub fn classify(playlist_id: &str) -> Self {
        if is_mix_radio_playlist(playlist_id) {
            PlaylistKind::MixRadio
        } else if playlist_id.starts_with(USER_PLAYLIST_PREFIX) {
            PlaylistKind::UserPlaylist
        } else if playlist_id.starts_with(CHANNEL_UPLOADS_PREFIX) {
            PlaylistKind::ChannelUploads
        } else if playlist_id.starts_with(LIKES_WATCH_LATER_PREFIX) {
            PlaylistKind::LikesWatchLater
        } else {
            PlaylistKind::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaylistKind::MixRadio => "mix_radio",
            PlaylistKind::UserPlaylist => "user_playlist",
            PlaylistKind::ChannelUploads => "channel_uploads",
            PlaylistKind::LikesWatchLater => "likes_watch_later",
            PlaylistKind::Other => "other",
            PlaylistKind::None => "",
        }
    }
}

impl fmt::Display for PlaylistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hint on whether a playlist can be reliably re-fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcessableLevel {
    /// Playlist contents are stable across fetches
    Stable,
    /// Mix/radio playlists are generated per request and drift between fetches
    Unstable,
    /// No playlist involved
    #[default]
    #[serde(rename = "n/a")]
    NotApplicable,
}

impl ProcessableLevel {
    /// Level for an optional playlist ID.
    pub fn for_playlist(playlist_id: Option<&str>) -> Self {
        match playlist_id {
            None => ProcessableLevel::NotApplicable,
            Some(id) if is_mix_radio_playlist(id) => ProcessableLevel::Unstable,
            Some(_) => ProcessableLevel::Stable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessableLevel::Stable => "stable",
            ProcessableLevel::Unstable => "unstable",
            ProcessableLevel::NotApplicable => "n/a",
        }
    }
}

impl fmt::Display for ProcessableLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reasons a URL could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize, JsonSchema)]
pub enum UrlParseError {
    /// Input was empty or whitespace-only
    #[error("empty")]
    #[serde(rename = "empty")]
    Empty,
    /// Input is neither an absolute URL nor a bare video ID
    #[error("Cannot parse")]
    #[serde(rename = "Cannot parse")]
    CannotParse,
}

/// Result of classifying a YouTube URL or bare video ID.
///
/// `video_id` and `playlist_id` always serialise (as `null` when unresolved)
/// so consumers can test presence uniformly; `error` is only emitted for
/// [`UrlKind::Invalid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParsedUrl {
    /// Classification outcome
    pub url_kind: UrlKind,

    /// Hostname of the parsed URL, empty for bare IDs
    pub host: String,

    /// Path component of the parsed URL, empty for bare IDs
    pub path: String,

    /// Resolved video ID
    pub video_id: Option<String>,

    /// Playlist ID from the `list` query parameter
    pub playlist_id: Option<String>,

    /// Prefix heuristic for `playlist_id`
    pub playlist_kind: PlaylistKind,

    /// Re-fetch stability hint
    pub processable_level: ProcessableLevel,

    /// Trimmed input (untrimmed only for empty input)
    pub raw_url: String,

    /// Why classification failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<UrlParseError>,
}

impl ParsedUrl {
    fn invalid(raw_url: &str, error: UrlParseError) -> Self {
        Self {
            url_kind: UrlKind::Invalid,
            host: String::new(),
            path: String::new(),
            video_id: None,
            playlist_id: None,
            playlist_kind: PlaylistKind::None,
            processable_level: ProcessableLevel::NotApplicable,
            raw_url: raw_url.to_string(),
            error: Some(error),
        }
    }

    fn bare_video(video_id: &str) -> Self {
        Self {
            url_kind: UrlKind::Video,
            host: String::new(),
            path: String::new(),
            video_id: Some(video_id.to_string()),
            playlist_id: None,
            playlist_kind: PlaylistKind::None,
            processable_level: ProcessableLevel::NotApplicable,
            raw_url: video_id.to_string(),
            error: None,
        }
    }

    /// True if classification failed.
    pub fn is_invalid(&self) -> bool {
        self.url_kind == UrlKind::Invalid
    }

    /// Video ID as a borrowed str.
    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    /// Playlist ID as a borrowed str.
    pub fn playlist_id(&self) -> Option<&str> {
        self.playlist_id.as_deref()
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Classify a YouTube URL or bare video ID.
///
/// # Example
/// ```
/// use ytlookup_models::url_parse::{parse_youtube_url, PlaylistKind, UrlKind};
///
/// let parsed = parse_youtube_url("https://www.youtube.com/watch?v=8SFo7A8sD04&list=RD8SFo7A8sD04");
/// assert_eq!(parsed.url_kind, UrlKind::VideoInPlaylist);
/// assert_eq!(parsed.video_id(), Some("8SFo7A8sD04"));
/// assert_eq!(parsed.playlist_kind, PlaylistKind::MixRadio);
/// ```
pub fn parse_youtube_url(input: &str) -> ParsedUrl {
    let trimmed = trim_input(input);
    if trimmed.is_empty() {
        // Only this path reports the untrimmed input.
        return ParsedUrl::invalid(input, UrlParseError::Empty);
    }

    let url = match Url::parse(trimmed) {
        Ok(url) => url,
        // A bare ID has no scheme, so it can never parse as an absolute URL;
        // the fallback below is only reachable from here.
        Err(_) if is_bare_video_id(trimmed) => return ParsedUrl::bare_video(trimmed),
        Err(_) => return ParsedUrl::invalid(trimmed, UrlParseError::CannotParse),
    };

    let host = url.host_str().unwrap_or_default().to_string();
    let path = url.path().to_string();
    let v_param = first_query_value(&url, "v");
    let list_param = first_query_value(&url, "list");

    let video_id = resolve_video_id(&host, &path, v_param);
    let playlist_id = list_param;

    let url_kind = classify_kind(&path, video_id.is_some(), playlist_id.is_some());

    let playlist_kind = playlist_id
        .as_deref()
        .map(PlaylistKind::classify)
        .unwrap_or_default();
    let processable_level = ProcessableLevel::for_playlist(playlist_id.as_deref());

    ParsedUrl {
        url_kind,
        host,
        path,
        video_id,
        playlist_id,
        playlist_kind,
        processable_level,
        raw_url: trimmed.to_string(),
        error: None,
    }
}

/// Strip surrounding whitespace, including the byte order mark that pasted
/// text often carries.
pub fn trim_input(input: &str) -> &str {
    input.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Resolve the video ID: short link first, then Shorts path, then `v=`.
fn resolve_video_id(host: &str, path: &str, v_param: Option<String>) -> Option<String> {
    if is_short_link_host(host) {
        if let Some(first) = path_segments(path).next() {
            return Some(first.to_string());
        }
    }

    if is_shorts_path(path) {
        let segments: Vec<&str> = path_segments(path).collect();
        if segments.len() >= 2 {
            // Second segment wins; the first is only a fallback.
            let id = Some(segments[1])
                .filter(|s| !s.is_empty())
                .unwrap_or(segments[0]);
            return Some(id.to_string());
        }
    }

    v_param
}

fn classify_kind(path: &str, has_video: bool, has_playlist: bool) -> UrlKind {
    if is_playlist_path(path) && has_playlist {
        UrlKind::Playlist
    } else if (is_watch_path(path) || has_video) && has_playlist {
        UrlKind::VideoInPlaylist
    } else if has_video {
        UrlKind::Video
    } else if is_shorts_path(path) {
        UrlKind::Shorts
    } else {
        UrlKind::Unknown
    }
}

// ============================================================================
// Predicates
// ============================================================================

/// Host is a `youtu.be` short link host.
pub fn is_short_link_host(host: &str) -> bool {
    host.contains(SHORT_LINK_HOST_TOKEN)
}

/// Path is a Shorts path.
pub fn is_shorts_path(path: &str) -> bool {
    path.starts_with(SHORTS_PATH_PREFIX)
}

/// Path is a playlist listing page.
pub fn is_playlist_path(path: &str) -> bool {
    path.starts_with(PLAYLIST_PATH_PREFIX)
}

/// Path is a watch page.
pub fn is_watch_path(path: &str) -> bool {
    path.starts_with(WATCH_PATH_PREFIX)
}

/// Playlist ID is an auto-generated mix / radio.
pub fn is_mix_radio_playlist(playlist_id: &str) -> bool {
    playlist_id.starts_with(MIX_RADIO_PREFIX)
}

/// Exactly 11 characters from `[A-Za-z0-9_-]`.
pub fn is_bare_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN && is_id_charset(s)
}

/// Only characters allowed in YouTube identifiers.
pub fn is_id_charset(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// ============================================================================
// URL Helpers
// ============================================================================

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// First value of a query parameter; empty values count as absent.
fn first_query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Reference URLs
    // ========================================================================

    #[test]
    fn test_watch_url() {
        let res = parse_youtube_url("https://www.youtube.com/watch?v=8SFo7A8sD04");
        assert_eq!(res.url_kind, UrlKind::Video);
        assert_eq!(res.video_id(), Some("8SFo7A8sD04"));
        assert_eq!(res.host, "www.youtube.com");
        assert_eq!(res.path, "/watch");
        assert_eq!(res.playlist_id, None);
        assert_eq!(res.playlist_kind, PlaylistKind::None);
        assert_eq!(res.processable_level, ProcessableLevel::NotApplicable);
        assert_eq!(res.error, None);
    }

    #[test]
    fn test_short_link() {
        let res = parse_youtube_url("https://youtu.be/8SFo7A8sD04");
        assert_eq!(res.url_kind, UrlKind::Video);
        assert_eq!(res.video_id(), Some("8SFo7A8sD04"));
        assert_eq!(res.host, "youtu.be");
    }

    #[test]
    fn test_playlist_url() {
        let res = parse_youtube_url("https://www.youtube.com/playlist?list=PL12345");
        assert_eq!(res.url_kind, UrlKind::Playlist);
        assert_eq!(res.playlist_id(), Some("PL12345"));
        assert_eq!(res.playlist_kind, PlaylistKind::UserPlaylist);
        assert_eq!(res.processable_level, ProcessableLevel::Stable);
        assert_eq!(res.video_id, None);
    }

    #[test]
    fn test_video_in_mix_playlist() {
        let res = parse_youtube_url(
            "https://www.youtube.com/watch?v=8SFo7A8sD04&list=RD8SFo7A8sD04",
        );
        assert_eq!(res.url_kind, UrlKind::VideoInPlaylist);
        assert_eq!(res.video_id(), Some("8SFo7A8sD04"));
        assert_eq!(res.playlist_id(), Some("RD8SFo7A8sD04"));
        assert_eq!(res.playlist_kind, PlaylistKind::MixRadio);
        assert_eq!(res.processable_level, ProcessableLevel::Unstable);
    }

    // ========================================================================
    // Empty / unparseable input
    // ========================================================================

    #[test]
    fn test_empty_input() {
        let res = parse_youtube_url("");
        assert_eq!(res.url_kind, UrlKind::Invalid);
        assert_eq!(res.error, Some(UrlParseError::Empty));
        assert_eq!(res.raw_url, "");
    }

    #[test]
    fn test_whitespace_input_keeps_untrimmed_raw_url() {
        let res = parse_youtube_url("   ");
        assert_eq!(res.url_kind, UrlKind::Invalid);
        assert_eq!(res.error, Some(UrlParseError::Empty));
        assert_eq!(res.raw_url, "   ");
    }

    #[test]
    fn test_byte_order_mark_is_trimmed() {
        let res = parse_youtube_url("\u{FEFF}");
        assert_eq!(res.error, Some(UrlParseError::Empty));
        assert_eq!(res.raw_url, "\u{FEFF}");

        let res = parse_youtube_url("\u{FEFF}8SFo7A8sD04");
        assert_eq!(res.url_kind, UrlKind::Video);
        assert_eq!(res.video_id(), Some("8SFo7A8sD04"));
        assert_eq!(res.raw_url, "8SFo7A8sD04");

        let res = parse_youtube_url("\u{FEFF} https://youtu.be/8SFo7A8sD04\u{FEFF}");
        assert_eq!(res.url_kind, UrlKind::Video);
        assert_eq!(res.raw_url, "https://youtu.be/8SFo7A8sD04");
    }

    #[test]
    fn test_non_empty_input_reports_trimmed_raw_url() {
        let res = parse_youtube_url("  https://youtu.be/8SFo7A8sD04 \n");
        assert_eq!(res.raw_url, "https://youtu.be/8SFo7A8sD04");

        let res = parse_youtube_url("  not a url  ");
        assert_eq!(res.raw_url, "not a url");
        assert_eq!(res.error, Some(UrlParseError::CannotParse));

        let res = parse_youtube_url("\t8SFo7A8sD04 ");
        assert_eq!(res.raw_url, "8SFo7A8sD04");
    }

    #[test]
    fn test_cannot_parse() {
        for input in ["hello world", "youtube.com/watch?v=8SFo7A8sD04", "abc", "8SFo7A8sD0", "8SFo7A8sD04x", "8SFo7A8sD0!"] {
            let res = parse_youtube_url(input);
            assert_eq!(res.url_kind, UrlKind::Invalid, "input: {input}");
            assert_eq!(res.error, Some(UrlParseError::CannotParse), "input: {input}");
            assert_eq!(res.video_id, None);
            assert_eq!(res.playlist_id, None);
        }
    }

    #[test]
    fn test_bare_video_ids() {
        for id in ["8SFo7A8sD04", "dQw4w9WgXcQ", "___________", "-a-b-c-d-e-", "ABCDEFGHIJK", "01234567890"] {
            let res = parse_youtube_url(id);
            assert_eq!(res.url_kind, UrlKind::Video, "input: {id}");
            assert_eq!(res.video_id(), Some(id));
            assert_eq!(res.host, "");
            assert_eq!(res.path, "");
            assert_eq!(res.error, None);
        }
    }

    // ========================================================================
    // Shorts / unknown
    // ========================================================================

    #[test]
    fn test_shorts_url_resolves_second_segment() {
        let res = parse_youtube_url("https://www.youtube.com/shorts/abc123def45");
        assert_eq!(res.url_kind, UrlKind::Video);
        assert_eq!(res.video_id(), Some("abc123def45"));
    }

    #[test]
    fn test_shorts_url_with_extra_segment() {
        let res = parse_youtube_url("https://www.youtube.com/shorts/abc123def45/extra");
        assert_eq!(res.video_id(), Some("abc123def45"));
    }

    #[test]
    fn test_shorts_without_id() {
        let res = parse_youtube_url("https://www.youtube.com/shorts/");
        assert_eq!(res.url_kind, UrlKind::Shorts);
        assert_eq!(res.video_id, None);
        assert_eq!(res.error, None);
    }

    #[test]
    fn test_short_link_takes_precedence_over_v_param() {
        let res = parse_youtube_url("https://youtu.be/aaaaaaaaaaa?v=bbbbbbbbbbb");
        assert_eq!(res.video_id(), Some("aaaaaaaaaaa"));
    }

    #[test]
    fn test_short_link_without_path_falls_back_to_v_param() {
        let res = parse_youtube_url("https://youtu.be/?v=bbbbbbbbbbb");
        assert_eq!(res.video_id(), Some("bbbbbbbbbbb"));
    }

    #[test]
    fn test_homepage_is_unknown() {
        let res = parse_youtube_url("https://www.youtube.com/");
        assert_eq!(res.url_kind, UrlKind::Unknown);
        assert_eq!(res.error, None);
        assert_eq!(res.path, "/");
    }

    #[test]
    fn test_empty_query_values_are_absent() {
        let res = parse_youtube_url("https://www.youtube.com/watch?v=&list=");
        assert_eq!(res.url_kind, UrlKind::Unknown);
        assert_eq!(res.video_id, None);
        assert_eq!(res.playlist_id, None);
        assert_eq!(res.playlist_kind, PlaylistKind::None);
    }

    #[test]
    fn test_watch_page_with_list_only_is_video_in_playlist() {
        let res = parse_youtube_url("https://www.youtube.com/watch?list=PLabc");
        assert_eq!(res.url_kind, UrlKind::VideoInPlaylist);
        assert_eq!(res.video_id, None);
    }

    #[test]
    fn test_playlist_path_with_video_is_playlist() {
        let res = parse_youtube_url("https://www.youtube.com/playlist?list=UUabc&v=8SFo7A8sD04");
        assert_eq!(res.url_kind, UrlKind::Playlist);
        assert_eq!(res.video_id(), Some("8SFo7A8sD04"));
        assert_eq!(res.playlist_kind, PlaylistKind::ChannelUploads);
    }

    #[test]
    fn test_non_youtube_url_with_list_still_classified() {
        let res = parse_youtube_url("https://example.com/anything?list=LLxyz");
        assert_eq!(res.url_kind, UrlKind::Unknown);
        assert_eq!(res.playlist_kind, PlaylistKind::LikesWatchLater);
        assert_eq!(res.processable_level, ProcessableLevel::Stable);
    }

    // ========================================================================
    // Playlist kind heuristics
    // ========================================================================

    #[test]
    fn test_playlist_kind_prefixes() {
        assert_eq!(PlaylistKind::classify("RDabc"), PlaylistKind::MixRadio);
        assert_eq!(PlaylistKind::classify("PLabc"), PlaylistKind::UserPlaylist);
        assert_eq!(PlaylistKind::classify("UUabc"), PlaylistKind::ChannelUploads);
        assert_eq!(PlaylistKind::classify("LL"), PlaylistKind::LikesWatchLater);
        assert_eq!(PlaylistKind::classify("OLAK5uy_abc"), PlaylistKind::Other);
    }

    #[test]
    fn test_playlist_kind_is_case_sensitive_and_anchored() {
        assert_eq!(PlaylistKind::classify("rdabc"), PlaylistKind::Other);
        assert_eq!(PlaylistKind::classify("pLabc"), PlaylistKind::Other);
        assert_eq!(PlaylistKind::classify("xRDabc"), PlaylistKind::Other);
        assert_eq!(ProcessableLevel::for_playlist(Some("rdabc")), ProcessableLevel::Stable);
    }

    #[test]
    fn test_playlist_kind_is_total() {
        let samples = ["R", "RD", "P", "PL", "U", "UU", "L", "LL", "FL123", "x", "_-", "WL"];
        for id in samples {
            let kind = PlaylistKind::classify(id);
            assert_ne!(kind, PlaylistKind::None, "id: {id}");
        }
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    #[test]
    fn test_invariants_hold() {
        let inputs = [
            "",
            "  ",
            "junk",
            "8SFo7A8sD04",
            "https://www.youtube.com/",
            "https://www.youtube.com/watch?v=8SFo7A8sD04",
            "https://www.youtube.com/watch?v=8SFo7A8sD04&list=RDx",
            "https://www.youtube.com/playlist?list=PLx",
            "https://www.youtube.com/shorts/",
            "mailto:someone@example.com",
        ];

        for input in inputs {
            let res = parse_youtube_url(input);
            assert_eq!(res.is_invalid(), res.error.is_some(), "input: {input:?}");
            assert_eq!(
                res.playlist_kind != PlaylistKind::None,
                res.playlist_id.is_some(),
                "input: {input:?}"
            );
            assert_eq!(
                res.processable_level == ProcessableLevel::Unstable,
                res.playlist_id().is_some_and(is_mix_radio_playlist),
                "input: {input:?}"
            );
            if res.is_invalid() {
                assert!(res.video_id.is_none() && res.playlist_id.is_none());
            }
        }
    }

    #[test]
    fn test_idempotent() {
        for input in ["https://youtu.be/8SFo7A8sD04?t=3", "  ", "nope", "8SFo7A8sD04"] {
            assert_eq!(parse_youtube_url(input), parse_youtube_url(input));
        }
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    #[test]
    fn test_serialized_shape() {
        let res = parse_youtube_url("https://www.youtube.com/watch?v=8SFo7A8sD04");
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["url_kind"], "video");
        assert_eq!(json["video_id"], "8SFo7A8sD04");
        assert!(json["playlist_id"].is_null());
        assert_eq!(json["playlist_kind"], "");
        assert_eq!(json["processable_level"], "n/a");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_serialized_error() {
        let json = serde_json::to_value(parse_youtube_url("%%%")).unwrap();
        assert_eq!(json["url_kind"], "invalid");
        assert_eq!(json["error"], "Cannot parse");

        let json = serde_json::to_value(parse_youtube_url("")).unwrap();
        assert_eq!(json["error"], "empty");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(UrlParseError::Empty.to_string(), "empty");
        assert_eq!(UrlParseError::CannotParse.to_string(), "Cannot parse");
    }
}
