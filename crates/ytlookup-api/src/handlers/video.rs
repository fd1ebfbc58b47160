//! Video details handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use ytlookup_models::{parse_youtube_url, VideoDetails};

use crate::api_key::RequestApiKey;
use crate::error::{ApiError, ApiResult};
use crate::handlers::non_empty;
use crate::metrics::record_url_classification;
use crate::query::ApiQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VideoInfoQuery {
    pub url: Option<String>,
}

/// Resolve a video ID from a URL or bare ID.
pub(crate) fn resolve_video_id(input: &str) -> ApiResult<String> {
    let parsed = parse_youtube_url(input);
    record_url_classification(parsed.url_kind.as_str());
    parsed
        .video_id
        .ok_or_else(|| ApiError::bad_request("Invalid YouTube URL or video ID"))
}

/// Fetch video details and record the lookup in history.
pub async fn get_video_info(
    State(state): State<AppState>,
    api_key: RequestApiKey,
    ApiQuery(query): ApiQuery<VideoInfoQuery>,
) -> ApiResult<Json<VideoDetails>> {
    let input = non_empty(&query.url)
        .ok_or_else(|| ApiError::bad_request("YouTube URL or video ID is required"))?;
    let video_id = resolve_video_id(input)?;
    let key = api_key.require()?;

    let details = state.video_info.fetch_video(&video_id, &key).await?;
    info!(video_id = %video_id, title = %details.title, "Fetched video details");

    state.history.record_lookup(&details, input).await;

    Ok(Json(details))
}
