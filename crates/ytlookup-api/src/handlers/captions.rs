//! Captions handler.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use ytlookup_models::{format_captions, CaptionList};
use ytlookup_upstream::UpstreamError;

use crate::api_key::RequestApiKey;
use crate::error::{ApiError, ApiResult};
use crate::handlers::non_empty;
use crate::handlers::video::resolve_video_id;
use crate::query::ApiQuery;
use crate::state::AppState;

const TEXT_FORMATS: [&str; 2] = ["text", "formatted"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionsQuery {
    pub video_id: Option<String>,
    pub lang: Option<String>,
    pub format: Option<String>,
    pub timestamp: Option<String>,
}

impl CaptionsQuery {
    /// Language to render as text, if plain text was requested.
    fn text_language(&self) -> Option<&str> {
        let wants_text = self
            .format
            .as_deref()
            .is_some_and(|f| TEXT_FORMATS.contains(&f));
        non_empty(&self.lang).filter(|_| wants_text)
    }

    fn with_timestamp(&self) -> bool {
        self.timestamp.as_deref() == Some("true")
    }
}

/// List caption tracks, or render one track as text.
pub async fn get_captions(
    State(state): State<AppState>,
    api_key: RequestApiKey,
    ApiQuery(query): ApiQuery<CaptionsQuery>,
) -> ApiResult<Response> {
    let input = non_empty(&query.video_id).ok_or_else(|| ApiError::bad_request("Video ID is required"))?;
    let video_id = resolve_video_id(input)?;
    let key = api_key.require()?;

    if let Some(lang) = query.text_language() {
        let segments = match state.captions.fetch_segments(&video_id, lang, &key).await {
            Ok(segments) => segments,
            Err(UpstreamError::NotFound(_)) => {
                return Err(ApiError::not_found("No captions found for this language"));
            }
            Err(e) => return Err(e.into()),
        };
        info!(video_id = %video_id, lang = %lang, segments = segments.len(), "Rendered captions");

        let text = format_captions(&segments, query.with_timestamp());
        return Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response());
    }

    let tracks = state.captions.list_tracks(&video_id, &key).await?;
    info!(video_id = %video_id, tracks = tracks.len(), "Listed caption tracks");

    state.history.attach_captions(&video_id, &tracks).await;

    Ok(Json(CaptionList::from(tracks)).into_response())
}
