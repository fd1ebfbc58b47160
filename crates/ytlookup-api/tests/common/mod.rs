//! Shared fixtures for API tests: in-memory sources and a router builder.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use ytlookup_api::{create_router, ApiConfig, AppState, Sources};
use ytlookup_models::{
    CaptionSegment, CaptionTrack, DownloadCandidate, DownloadCandidates, DownloadFormat, Mp3Status,
    PlaylistInfo, PlaylistItem, ProcessableLevel, Thumbnail, VideoDetails,
};
use ytlookup_storage::{HistoryCache, HistoryPersistence, MemoryPersistence};
use ytlookup_upstream::{
    ApiKey, CaptionSource, DownloadResolver, Mp3Outcome, Mp3Source, PlaylistSource, UpstreamError,
    UpstreamResult, VideoInfoSource,
};

pub const VIDEO_ID: &str = "dQw4w9WgXcQ";
pub const OTHER_VIDEO_ID: &str = "8SFo7A8sD04";
pub const PLAYLIST_ID: &str = "PLrAXtmErZgOeiKm4sgNOknGvNjby9efdf";

/// What the stub sources were asked to do.
#[derive(Debug, Default)]
pub struct Calls {
    pub keys: Vec<String>,
    pub playlist_max_items: Vec<usize>,
    pub download_urls: Vec<(String, DownloadFormat)>,
}

/// Scripted upstream behaviour shared by every source trait.
#[derive(Clone, Default)]
pub struct StubSources {
    pub calls: Arc<Mutex<Calls>>,
    /// Captions exist only for these language codes
    pub caption_langs: Vec<String>,
    /// Return bytes from the MP3 source instead of a status document
    pub mp3_audio: bool,
    /// Every source fails with this upstream status
    pub fail_status: Option<u16>,
    /// yt-dlp is reported as missing
    pub ytdlp_missing: bool,
}

impl StubSources {
    pub fn new() -> Self {
        Self {
            caption_langs: vec!["en".to_string()],
            ..Self::default()
        }
    }

    fn record_key(&self, key: &ApiKey) {
        self.calls.lock().unwrap().keys.push(key.expose().to_string());
    }

    fn check_failure(&self) -> UpstreamResult<()> {
        match self.fail_status {
            Some(status) => Err(UpstreamError::from_http_status(status, "stub failure", None)),
            None => Ok(()),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.calls.lock().unwrap().keys.clone()
    }

    pub fn into_sources(self) -> Sources {
        let stub = Arc::new(self);
        Sources {
            video_info: stub.clone(),
            captions: stub.clone(),
            playlists: stub.clone(),
            mp3: stub.clone(),
            downloads: stub,
        }
    }
}

pub fn video(id: &str) -> VideoDetails {
    VideoDetails {
        id: id.to_string(),
        title: format!("Video {}", id),
        author: "Channel".to_string(),
        channel_id: "UC123".to_string(),
        description: "A description".to_string(),
        thumbnails: vec![Thumbnail {
            url: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id),
            width: Some(480),
            height: Some(360),
        }],
        view_count: 42,
        published_at: "2009-10-25T06:57:33Z".to_string(),
        length_seconds: 212,
    }
}

#[async_trait]
impl VideoInfoSource for StubSources {
    async fn fetch_video(&self, video_id: &str, key: &ApiKey) -> UpstreamResult<VideoDetails> {
        self.record_key(key);
        self.check_failure()?;
        Ok(video(video_id))
    }
}

#[async_trait]
impl CaptionSource for StubSources {
    async fn list_tracks(&self, _video_id: &str, key: &ApiKey) -> UpstreamResult<Vec<CaptionTrack>> {
        self.record_key(key);
        self.check_failure()?;
        Ok(self
            .caption_langs
            .iter()
            .map(|code| CaptionTrack {
                lang: format!("Language {}", code),
                code: code.clone(),
                is_auto_generated: false,
            })
            .collect())
    }

    async fn fetch_segments(
        &self,
        _video_id: &str,
        lang: &str,
        key: &ApiKey,
    ) -> UpstreamResult<Vec<CaptionSegment>> {
        self.record_key(key);
        self.check_failure()?;
        if !self.caption_langs.iter().any(|c| c == lang) {
            return Err(UpstreamError::not_found(format!("no {} captions", lang)));
        }
        Ok(vec![
            CaptionSegment {
                text: " Never gonna give you up ".to_string(),
                start: 5.2,
                duration: 2.0,
            },
            CaptionSegment {
                text: "Never gonna let you down".to_string(),
                start: 65.0,
                duration: 2.5,
            },
        ])
    }
}

#[async_trait]
impl PlaylistSource for StubSources {
    async fn fetch_playlist(
        &self,
        playlist_id: &str,
        max_items: usize,
        key: &ApiKey,
    ) -> UpstreamResult<PlaylistInfo> {
        self.record_key(key);
        self.calls.lock().unwrap().playlist_max_items.push(max_items);
        self.check_failure()?;

        let total = 3usize;
        let items: Vec<PlaylistItem> = (0..total.min(max_items))
            .map(|i| PlaylistItem {
                id: format!("video{:06}", i),
                title: format!("Item {}", i),
                thumbnail: String::new(),
                published_at: String::new(),
            })
            .collect();

        Ok(PlaylistInfo {
            playlist_id: playlist_id.to_string(),
            title: "Stub playlist".to_string(),
            partial: items.len() < total,
            total_results: total as u64,
            items,
            processable_level: ProcessableLevel::for_playlist(Some(playlist_id)),
        })
    }
}

#[async_trait]
impl Mp3Source for StubSources {
    async fn fetch_mp3(&self, video_id: &str, key: &ApiKey) -> UpstreamResult<Mp3Outcome> {
        self.record_key(key);
        self.check_failure()?;
        if self.mp3_audio {
            return Ok(Mp3Outcome::Audio(b"ID3stub".to_vec()));
        }
        let link = format!("https://cdn.example/{}.mp3", video_id);
        Ok(Mp3Outcome::Status(Mp3Status {
            status: "ok".to_string(),
            link: link.clone(),
            title: Some("Stub".to_string()),
            progress: Some(100.0),
            duration: Some(212.0),
            msg: Some("success".to_string()),
            download_url: link,
        }))
    }
}

#[async_trait]
impl DownloadResolver for StubSources {
    async fn resolve(&self, url: &str, format: DownloadFormat) -> UpstreamResult<DownloadCandidates> {
        self.calls
            .lock()
            .unwrap()
            .download_urls
            .push((url.to_string(), format));
        if self.ytdlp_missing {
            return Err(UpstreamError::ToolNotFound);
        }
        self.check_failure()?;

        let candidate = DownloadCandidate {
            itag: "140".to_string(),
            mime_type: "audio/m4a; codecs=\"mp4a.40.2\"".to_string(),
            quality_label: Some("128kbps".to_string()),
            url: "https://r.example/140".to_string(),
            estimated_size_bytes: Some(3_400_000),
            estimated_size_human: "3.24 MB".to_string(),
        };
        Ok(DownloadCandidates::from_ranked(
            VIDEO_ID.to_string(),
            "Stub".to_string(),
            212,
            Vec::new(),
            vec![candidate],
        ))
    }

    fn is_available(&self) -> bool {
        !self.ytdlp_missing
    }
}

pub fn test_config() -> ApiConfig {
    ApiConfig {
        rapidapi_key: ApiKey::new("server-key"),
        history_capacity: 3,
        playlist_default_max_items: 2,
        playlist_max_items_cap: 100,
        ..ApiConfig::default()
    }
}

pub async fn build_state(config: ApiConfig, stub: StubSources) -> AppState {
    let persistence: Box<dyn HistoryPersistence> = Box::new(MemoryPersistence::new());
    let history = HistoryCache::load(persistence, config.history_capacity)
        .await
        .unwrap();
    AppState::from_parts(config, stub.into_sources(), history)
}

pub async fn router_with(config: ApiConfig, stub: StubSources) -> Router {
    create_router(build_state(config, stub).await, None)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
