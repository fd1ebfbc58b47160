//! URL classification endpoint.

use axum::Json;
use serde::Deserialize;
use ytlookup_models::{parse_youtube_url, ParsedUrl};

use crate::error::ApiResult;
use crate::metrics::record_url_classification;
use crate::query::ApiQuery;

#[derive(Debug, Deserialize)]
pub struct ParseQuery {
    #[serde(default)]
    pub url: String,
}

/// Classify a URL. Classification failures are reported in a 200 body.
pub async fn parse_url(ApiQuery(query): ApiQuery<ParseQuery>) -> ApiResult<Json<ParsedUrl>> {
    let parsed = parse_youtube_url(&query.url);
    record_url_classification(parsed.url_kind.as_str());
    Ok(Json(parsed))
}
