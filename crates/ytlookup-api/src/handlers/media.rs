//! MP3 conversion and direct download handlers.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};
use ytlookup_models::url_parse::is_id_charset;
use ytlookup_models::{DownloadCandidates, DownloadFormat};
use ytlookup_upstream::Mp3Outcome;

use crate::api_key::RequestApiKey;
use crate::error::{ApiError, ApiResult};
use crate::handlers::non_empty;
use crate::handlers::video::resolve_video_id;
use crate::query::ApiQuery;
use crate::state::AppState;

/// Video ID limited to `[A-Za-z0-9_-]`. It is placed in a header value and
/// in the yt-dlp command line.
fn resolve_media_id(input: &str) -> ApiResult<String> {
    let video_id = resolve_video_id(input)?;
    if video_id.is_empty() || !is_id_charset(&video_id) {
        return Err(ApiError::bad_request("Invalid YouTube URL or video ID"));
    }
    Ok(video_id)
}

#[derive(Debug, Deserialize)]
pub struct Mp3Query {
    pub id: Option<String>,
}

/// Convert a video to MP3.
///
/// Responds with the converter's status document while conversion is in
/// progress (or when it hands back a link), and streams the audio when the
/// converter returns it directly.
pub async fn get_mp3(
    State(state): State<AppState>,
    api_key: RequestApiKey,
    ApiQuery(query): ApiQuery<Mp3Query>,
) -> ApiResult<Response> {
    let input = non_empty(&query.id).ok_or_else(|| ApiError::bad_request("Video ID is required"))?;
    let video_id = resolve_media_id(input)?;
    let key = api_key.require()?;

    match state.mp3.fetch_mp3(&video_id, &key).await? {
        Mp3Outcome::Status(status) => {
            info!(video_id = %video_id, status = %status.status, ready = status.is_ready(), "MP3 status");
            Ok(Json(status).into_response())
        }
        Mp3Outcome::Audio(bytes) => {
            info!(video_id = %video_id, bytes = bytes.len(), "Streaming MP3");
            let disposition = format!("attachment; filename=\"audio_{}.mp3\"", video_id);
            Ok((
                [
                    (header::CONTENT_TYPE, "audio/mpeg".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DownloadUrlsQuery {
    pub url: Option<String>,
    pub format: Option<String>,
}

/// Resolve direct stream URLs for a video.
///
/// Only the canonical watch URL for the classified video ID is handed to
/// yt-dlp, never the raw input.
pub async fn get_download_urls(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DownloadUrlsQuery>,
) -> ApiResult<Json<DownloadCandidates>> {
    let input = non_empty(&query.url).ok_or_else(|| ApiError::bad_request("YouTube URL is required"))?;
    let format = match non_empty(&query.format) {
        Some(f) => f.parse::<DownloadFormat>().map_err(ApiError::bad_request)?,
        None => DownloadFormat::default(),
    };
    let video_id = resolve_media_id(input)?;
    let watch_url = format!("https://www.youtube.com/watch?v={}", video_id);

    let candidates = state
        .downloads
        .resolve(&watch_url, format)
        .await
        .map_err(|e| {
            warn!(video_id = %video_id, format = %format, error = %e, "Download resolution failed");
            ApiError::operation_failed("Failed to resolve download URLs", e)
        })?;

    Ok(Json(candidates))
}
