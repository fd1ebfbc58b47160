//! MP3 conversion via the `youtube-mp36` API.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use ytlookup_models::Mp3Status;

use super::lenient_f64;
use crate::client::RapidApiClient;
use crate::config::ApiKey;
use crate::error::UpstreamResult;
use crate::traits::{Mp3Outcome, Mp3Source};

/// Keys checked, in order, for a usable download link.
const LINK_KEYS: [&str; 5] = ["link", "url", "downloadUrl", "mp3", "download"];

const UNKNOWN_STATUS: &str = "unknown";

fn string_field(document: &Value, key: &str) -> Option<String> {
    document
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Interpret a converter status document.
pub(crate) fn parse_status(document: &Value) -> Mp3Status {
    Mp3Status {
        status: string_field(document, "status").unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
        link: string_field(document, "link").unwrap_or_default(),
        title: string_field(document, "title"),
        progress: lenient_f64(document.get("progress")),
        duration: lenient_f64(document.get("duration")),
        msg: string_field(document, "msg"),
        download_url: LINK_KEYS
            .iter()
            .find_map(|key| string_field(document, key))
            .unwrap_or_default(),
    }
}

#[async_trait]
impl Mp3Source for RapidApiClient {
    async fn fetch_mp3(&self, video_id: &str, key: &ApiKey) -> UpstreamResult<Mp3Outcome> {
        let raw = self
            .get_raw("fetch_mp3", &self.config().mp3, "/dl", &[("id", video_id)], key)
            .await?;

        if raw.is_json() {
            let document: Value = serde_json::from_slice(&raw.bytes)?;
            let status = parse_status(&document);
            debug!(video_id = %video_id, status = %status.status, ready = status.is_ready(), "MP3 status");
            Ok(Mp3Outcome::Status(status))
        } else {
            debug!(video_id = %video_id, bytes = raw.bytes.len(), "MP3 audio received");
            Ok(Mp3Outcome::Audio(raw.bytes))
        }
    }
}
