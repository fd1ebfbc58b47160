//! Third-party data sources for the YouTube lookup service.
//!
//! This crate provides:
//! - A RapidAPI REST client with retry, tracing spans and metrics
//! - Video details, captions, playlists and MP3 conversion over RapidAPI
//! - Direct stream URL resolution through yt-dlp
//! - The source traits the HTTP layer is written against

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod rapidapi;
pub mod retry;
pub mod traits;
pub mod ytdlp;

pub use client::RapidApiClient;
pub use config::{ApiKey, RapidApiEndpoint, UpstreamConfig};
pub use error::{UpstreamError, UpstreamResult};
pub use retry::RetryConfig;
pub use traits::{
    CaptionSource, DownloadResolver, Mp3Outcome, Mp3Source, PlaylistSource, VideoInfoSource,
};
pub use ytdlp::YtDlpResolver;
