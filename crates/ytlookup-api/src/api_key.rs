//! Per-request RapidAPI key resolution.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ytlookup_upstream::ApiKey;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Header a client may use to supply its own RapidAPI key.
pub const CLIENT_KEY_HEADER: &str = "x-rapidapi-key-client";

/// The key to use for upstream calls on this request.
///
/// A non-blank client header wins over the server's `RAPIDAPI_KEY`. Resolution
/// never fails here; handlers call [`RequestApiKey::require`] once their own
/// input has been validated so that bad input is reported first.
#[derive(Debug, Clone)]
pub struct RequestApiKey(pub Option<ApiKey>);

impl RequestApiKey {
    pub fn require(self) -> ApiResult<ApiKey> {
        self.0.ok_or(ApiError::MissingApiKey)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for RequestApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let from_header = parts
            .headers
            .get(CLIENT_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(ApiKey::new);

        Ok(Self(from_header.or_else(|| state.config.rapidapi_key.clone())))
    }
}
