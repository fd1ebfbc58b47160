//! Lookup history handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;
use ytlookup_models::HistoryItem;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HistoryListResponse {
    pub items: Vec<HistoryItem>,
    pub count: usize,
    pub capacity: usize,
}

/// List history, most recent first.
pub async fn list_history(State(state): State<AppState>) -> Json<HistoryListResponse> {
    let items = state.history.list().await;
    Json(HistoryListResponse {
        count: items.len(),
        capacity: state.history.capacity().await,
        items,
    })
}

pub async fn get_history_entry(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<HistoryItem>> {
    state
        .history
        .get(&video_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Video not found in history"))
}

pub async fn delete_history_entry(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<StatusCode> {
    if !state.history.remove(&video_id).await? {
        return Err(ApiError::not_found("Video not found in history"));
    }
    info!(video_id = %video_id, "Removed history entry");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_history(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.history.clear().await?;
    info!("Cleared lookup history");
    Ok(StatusCode::NO_CONTENT)
}
