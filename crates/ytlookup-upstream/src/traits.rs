//! Source traits the HTTP layer depends on.
//!
//! Each trait has one production implementation in this crate. Handlers hold
//! them as `Arc<dyn ...>` so tests can substitute in-memory stubs.

use async_trait::async_trait;
use ytlookup_models::{
    CaptionSegment, CaptionTrack, DownloadCandidates, DownloadFormat, Mp3Status, PlaylistInfo,
    VideoDetails,
};

use crate::config::ApiKey;
use crate::error::UpstreamResult;

/// Video metadata lookup.
#[async_trait]
pub trait VideoInfoSource: Send + Sync {
    async fn fetch_video(&self, video_id: &str, key: &ApiKey) -> UpstreamResult<VideoDetails>;
}

/// Caption tracks and their timed segments.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Languages available for a video.
    async fn list_tracks(&self, video_id: &str, key: &ApiKey) -> UpstreamResult<Vec<CaptionTrack>>;

    /// Timed segments for one language.
    async fn fetch_segments(
        &self,
        video_id: &str,
        lang: &str,
        key: &ApiKey,
    ) -> UpstreamResult<Vec<CaptionSegment>>;
}

/// Playlist contents.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Fetch at most `max_items` entries, following pagination.
    async fn fetch_playlist(
        &self,
        playlist_id: &str,
        max_items: usize,
        key: &ApiKey,
    ) -> UpstreamResult<PlaylistInfo>;
}

/// What the MP3 conversion service handed back.
#[derive(Debug, Clone)]
pub enum Mp3Outcome {
    /// Conversion status document (possibly still processing).
    Status(Mp3Status),
    /// The audio itself.
    Audio(Vec<u8>),
}

/// MP3 conversion.
#[async_trait]
pub trait Mp3Source: Send + Sync {
    async fn fetch_mp3(&self, video_id: &str, key: &ApiKey) -> UpstreamResult<Mp3Outcome>;
}

/// Direct media stream resolution.
#[async_trait]
pub trait DownloadResolver: Send + Sync {
    async fn resolve(&self, url: &str, format: DownloadFormat) -> UpstreamResult<DownloadCandidates>;

    /// Whether the resolver can run at all in this environment.
    fn is_available(&self) -> bool {
        true
    }
}
