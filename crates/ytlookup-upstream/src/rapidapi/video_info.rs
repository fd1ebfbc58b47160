//! Video metadata via the `youtube-v31` API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use ytlookup_models::video::{UNKNOWN_CHANNEL, UNTITLED_VIDEO};
use ytlookup_models::{parse_iso8601_duration, VideoDetails};

use super::{lenient_u64, non_blank, ThumbnailSet};
use crate::client::RapidApiClient;
use crate::config::ApiKey;
use crate::error::{UpstreamError, UpstreamResult};
use crate::traits::VideoInfoSource;

const VIDEO_PARTS: &str = "contentDetails,snippet,statistics";

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoResource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResource {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
    #[serde(default)]
    content_details: ContentDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    channel_title: Option<String>,
    channel_id: Option<String>,
    description: Option<String>,
    published_at: Option<String>,
    #[serde(default)]
    thumbnails: ThumbnailSet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

impl VideoResource {
    fn into_details(self, requested_id: &str) -> VideoDetails {
        let snippet = self.snippet;
        VideoDetails {
            id: non_blank(self.id).unwrap_or_else(|| requested_id.to_string()),
            title: non_blank(snippet.title).unwrap_or_else(|| UNTITLED_VIDEO.to_string()),
            author: non_blank(snippet.channel_title).unwrap_or_else(|| UNKNOWN_CHANNEL.to_string()),
            channel_id: snippet.channel_id.unwrap_or_default(),
            description: snippet.description.unwrap_or_default(),
            thumbnails: snippet.thumbnails.into_ordered(),
            view_count: lenient_u64(self.statistics.view_count.as_ref()).unwrap_or(0),
            published_at: snippet.published_at.unwrap_or_default(),
            length_seconds: self
                .content_details
                .duration
                .as_deref()
                .map(parse_iso8601_duration)
                .unwrap_or(0),
        }
    }
}

#[async_trait]
impl VideoInfoSource for RapidApiClient {
    async fn fetch_video(&self, video_id: &str, key: &ApiKey) -> UpstreamResult<VideoDetails> {
        let endpoint = &self.config().video_info;
        let response: VideosResponse = self
            .get_json(
                "fetch_video",
                endpoint,
                "/videos",
                &[("part", VIDEO_PARTS), ("id", video_id)],
                key,
            )
            .await?;

        let resource = response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::not_found(format!("video {}", video_id)))?;

        let details = resource.into_details(video_id);
        debug!(video_id = %details.id, length_seconds = details.length_seconds, "Fetched video details");
        Ok(details)
    }
}
