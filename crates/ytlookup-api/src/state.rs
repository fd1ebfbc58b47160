//! Application state.

use std::sync::Arc;

use tracing::info;
use ytlookup_storage::{HistoryCache, HistoryPersistence, JsonFilePersistence, MemoryPersistence};
use ytlookup_upstream::{
    CaptionSource, DownloadResolver, Mp3Source, PlaylistSource, RapidApiClient, UpstreamConfig,
    VideoInfoSource, YtDlpResolver,
};

use crate::config::ApiConfig;
use crate::services::HistoryService;

/// Upstream data sources.
#[derive(Clone)]
pub struct Sources {
    pub video_info: Arc<dyn VideoInfoSource>,
    pub captions: Arc<dyn CaptionSource>,
    pub playlists: Arc<dyn PlaylistSource>,
    pub mp3: Arc<dyn Mp3Source>,
    pub downloads: Arc<dyn DownloadResolver>,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub video_info: Arc<dyn VideoInfoSource>,
    pub captions: Arc<dyn CaptionSource>,
    pub playlists: Arc<dyn PlaylistSource>,
    pub mp3: Arc<dyn Mp3Source>,
    pub downloads: Arc<dyn DownloadResolver>,
    pub history: HistoryService,
}

impl AppState {
    /// Create new application state.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let upstream = UpstreamConfig::from_env();
        let downloads = Arc::new(YtDlpResolver::from_config(&upstream));
        let rapidapi = Arc::new(RapidApiClient::new(upstream)?);

        let persistence: Box<dyn HistoryPersistence> = match &config.history_path {
            Some(path) => {
                info!(path = %path.display(), "Using file-backed history");
                Box::new(JsonFilePersistence::new(path))
            }
            None => {
                info!("HISTORY_PATH not set, history is kept in memory");
                Box::new(MemoryPersistence::new())
            }
        };
        let history = HistoryCache::load(persistence, config.history_capacity).await?;

        let sources = Sources {
            video_info: rapidapi.clone(),
            captions: rapidapi.clone(),
            playlists: rapidapi.clone(),
            mp3: rapidapi,
            downloads,
        };

        Ok(Self::from_parts(config, sources, history))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(
        config: ApiConfig,
        sources: Sources,
        history: HistoryCache<Box<dyn HistoryPersistence>>,
    ) -> Self {
        Self {
            config,
            video_info: sources.video_info,
            captions: sources.captions,
            playlists: sources.playlists,
            mp3: sources.mp3,
            downloads: sources.downloads,
            history: HistoryService::new(history),
        }
    }
}
