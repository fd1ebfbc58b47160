//! Caption tracks and segments via the captions/transcript API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use ytlookup_models::{CaptionSegment, CaptionTrack};

use super::{lenient_f64, non_blank};
use crate::client::RapidApiClient;
use crate::config::ApiKey;
use crate::error::UpstreamResult;
use crate::traits::CaptionSource;

/// Object keys that may hold the track list when the API wraps it.
const TRACK_LIST_KEYS: [&str; 2] = ["availableLanguages", "captions"];

/// Object keys that may hold the segment list.
const SEGMENT_LIST_KEYS: [&str; 2] = ["captions", "segments"];

#[derive(Debug, Deserialize)]
struct ApiTrack {
    #[serde(default, alias = "languageName", alias = "lang")]
    name: Option<String>,
    #[serde(default, rename = "languageCode", alias = "code")]
    language_code: Option<String>,
    #[serde(default, rename = "auto-generated")]
    auto_generated: Option<Value>,
}

impl ApiTrack {
    fn into_track(self) -> Option<CaptionTrack> {
        let code = non_blank(self.language_code)?;
        let is_auto_generated = match self.auto_generated {
            Some(Value::Bool(b)) => b,
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            _ => false,
        };
        Some(CaptionTrack {
            lang: non_blank(self.name).unwrap_or_else(|| code.clone()),
            code,
            is_auto_generated,
        })
    }
}

/// The first non-empty array, either the document itself or one of `keys`.
fn first_list(document: Value, keys: &[&str]) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        Value::Object(mut map) => keys
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) if !items.is_empty() => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn parse_tracks(document: Value) -> Vec<CaptionTrack> {
    first_list(document, &TRACK_LIST_KEYS)
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<ApiTrack>(entry).ok())
        .filter_map(ApiTrack::into_track)
        .collect()
}

fn parse_segments(document: Value) -> Vec<CaptionSegment> {
    first_list(document, &SEGMENT_LIST_KEYS)
        .iter()
        .filter_map(|entry| {
            let text = entry.get("text")?.as_str()?.to_string();
            Some(CaptionSegment {
                text,
                start: lenient_f64(entry.get("start")).unwrap_or(0.0),
                duration: lenient_f64(entry.get("duration").or_else(|| entry.get("dur")))
                    .unwrap_or(0.0),
            })
        })
        .collect()
}

#[async_trait]
impl CaptionSource for RapidApiClient {
    async fn list_tracks(&self, video_id: &str, key: &ApiKey) -> UpstreamResult<Vec<CaptionTrack>> {
        let endpoint = &self.config().captions;
        let path = format!("/language-list/{}", urlencoding::encode(video_id));
        let document: Value = self
            .get_json("list_caption_tracks", endpoint, &path, &[("format", "json")], key)
            .await?;

        let tracks = parse_tracks(document);
        debug!(video_id = %video_id, tracks = tracks.len(), "Listed caption tracks");
        Ok(tracks)
    }

    async fn fetch_segments(
        &self,
        video_id: &str,
        lang: &str,
        key: &ApiKey,
    ) -> UpstreamResult<Vec<CaptionSegment>> {
        let endpoint = &self.config().captions;
        let path = format!("/get-video-info/{}", urlencoding::encode(video_id));
        let document: Value = self
            .get_json(
                "fetch_caption_segments",
                endpoint,
                &path,
                &[("format", "json"), ("lang", lang)],
                key,
            )
            .await?;

        let segments = parse_segments(document);
        debug!(video_id = %video_id, lang = %lang, segments = segments.len(), "Fetched caption segments");
        Ok(segments)
    }
}
