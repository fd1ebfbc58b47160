//! Playlist handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use validator::Validate;
use ytlookup_models::{resolve_playlist_id, PlaylistInfo};

use crate::api_key::RequestApiKey;
use crate::config::PLAYLIST_ITEMS_HARD_LIMIT;
use crate::error::{ApiError, ApiResult};
use crate::handlers::non_empty;
use crate::query::ApiQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistQuery {
    pub url: Option<String>,
    #[validate(range(min = 1, max = 1000))]
    pub max_items: Option<usize>,
}

impl PlaylistQuery {
    /// Requested item budget within the configured cap.
    fn item_budget(&self, default: usize, cap: usize) -> ApiResult<usize> {
        self.validate()?;
        match self.max_items {
            None => Ok(default),
            Some(n) if n <= cap => Ok(n),
            Some(_) => Err(ApiError::Validation(format!(
                "maxItems must be between 1 and {}",
                cap.min(PLAYLIST_ITEMS_HARD_LIMIT)
            ))),
        }
    }
}

/// Fetch playlist entries, following pagination up to `maxItems`.
pub async fn get_playlist(
    State(state): State<AppState>,
    api_key: RequestApiKey,
    ApiQuery(query): ApiQuery<PlaylistQuery>,
) -> ApiResult<Json<PlaylistInfo>> {
    let input = non_empty(&query.url).ok_or_else(|| ApiError::bad_request("Playlist URL or ID is required"))?;
    let playlist_id =
        resolve_playlist_id(input).ok_or_else(|| ApiError::bad_request("Invalid playlist URL or ID"))?;
    let max_items = query.item_budget(
        state.config.playlist_default_max_items,
        state.config.playlist_max_items_cap,
    )?;
    let key = api_key.require()?;

    let playlist = state.playlists.fetch_playlist(&playlist_id, max_items, &key).await?;
    info!(
        playlist_id = %playlist_id,
        items = playlist.items.len(),
        partial = playlist.partial,
        "Fetched playlist"
    );

    Ok(Json(playlist))
}
