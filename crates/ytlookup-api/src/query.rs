//! Query string extraction with API-shaped rejections.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Like [`Query`], but a malformed query string becomes a `validation_error`
/// body instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Params {
        max_items: Option<usize>,
    }

    async fn extract(uri: &str) -> Result<ApiQuery<Params>, ApiError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ApiQuery::<Params>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_well_formed_query() {
        let ApiQuery(params) = extract("/api/playlist?maxItems=5").await.unwrap();
        assert_eq!(params.max_items, Some(5));

        let ApiQuery(params) = extract("/api/playlist").await.unwrap();
        assert_eq!(params.max_items, None);
    }

    #[tokio::test]
    async fn test_malformed_query_is_validation_error() {
        let err = extract("/api/playlist?maxItems=abc").await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ref msg) if msg.starts_with("Failed to deserialize query string")
        ));
        assert_eq!(err.code(), "validation_error");
    }
}
