//! Shared data models for the YouTube lookup service.
//!
//! This crate provides Serde-serializable types for:
//! - YouTube URL classification (the pure `parse_youtube_url` classifier)
//! - Video details and thumbnails
//! - Caption tracks and formatted caption text
//! - Playlist contents
//! - Download candidates and MP3 conversion status
//! - Lookup history entries

pub mod caption;
pub mod download;
pub mod history;
pub mod playlist;
pub mod url_parse;
pub mod video;

// Re-export common types
pub use caption::{format_captions, CaptionList, CaptionSegment, CaptionTrack};
pub use download::{bytes_to_human, DownloadCandidate, DownloadCandidates, DownloadFormat, Mp3Status};
pub use history::HistoryItem;
pub use playlist::{resolve_playlist_id, PlaylistInfo, PlaylistItem};
pub use url_parse::{
    parse_youtube_url, trim_input, ParsedUrl, PlaylistKind, ProcessableLevel, UrlKind,
    UrlParseError,
};
pub use video::{parse_iso8601_duration, Thumbnail, VideoDetails};
