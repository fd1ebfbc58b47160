//! Playlist contents via the `youtube-v31` API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use ytlookup_models::playlist::UNTITLED_ITEM;
use ytlookup_models::{PlaylistInfo, PlaylistItem, ProcessableLevel};

use super::{lenient_u64, non_blank, ThumbnailSet};
use crate::client::RapidApiClient;
use crate::config::ApiKey;
use crate::error::UpstreamResult;
use crate::traits::PlaylistSource;

const PLAYLIST_PARTS: &str = "snippet,contentDetails";

/// Items requested per page (the API maximum).
const PAGE_SIZE: &str = "50";

/// Hard stop on pagination regardless of `max_items`.
const MAX_PAGES: usize = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsPage {
    #[serde(default)]
    items: Vec<ApiPlaylistItem>,
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    page_info: Option<PageInfo>,
    #[serde(default)]
    snippet: Option<PlaylistSnippet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    total_results: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct PlaylistSnippet {
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPlaylistItem {
    #[serde(default)]
    snippet: ItemSnippet,
    #[serde(default)]
    content_details: ItemContentDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemSnippet {
    title: Option<String>,
    published_at: Option<String>,
    #[serde(default)]
    thumbnails: ThumbnailSet,
    #[serde(default)]
    resource_id: Option<ResourceId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemContentDetails {
    video_id: Option<String>,
    video_published_at: Option<String>,
}

impl ApiPlaylistItem {
    fn into_item(self) -> PlaylistItem {
        let snippet = self.snippet;
        let details = self.content_details;
        let id = non_blank(details.video_id)
            .or_else(|| snippet.resource_id.and_then(|r| non_blank(r.video_id)))
            .unwrap_or_default();

        PlaylistItem {
            id,
            title: non_blank(snippet.title).unwrap_or_else(|| UNTITLED_ITEM.to_string()),
            thumbnail: snippet
                .thumbnails
                .into_ordered()
                .pop()
                .map(|t| t.url)
                .unwrap_or_default(),
            published_at: non_blank(details.video_published_at)
                .or(snippet.published_at)
                .unwrap_or_default(),
        }
    }
}

impl RapidApiClient {
    async fn fetch_playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        key: &ApiKey,
    ) -> UpstreamResult<PlaylistItemsPage> {
        let mut query = vec![
            ("playlistId", playlist_id),
            ("part", PLAYLIST_PARTS),
            ("maxResults", PAGE_SIZE),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        self.get_json(
            "fetch_playlist_page",
            &self.config().video_info,
            "/playlistItems",
            &query,
            key,
        )
        .await
    }
}

#[async_trait]
impl PlaylistSource for RapidApiClient {
    async fn fetch_playlist(
        &self,
        playlist_id: &str,
        max_items: usize,
        key: &ApiKey,
    ) -> UpstreamResult<PlaylistInfo> {
        let max_items = max_items.max(1);
        let mut items: Vec<PlaylistItem> = Vec::new();
        let mut title: Option<String> = None;
        let mut total_results: Option<u64> = None;
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        let partial = loop {
            let page = self
                .fetch_playlist_page(playlist_id, page_token.as_deref(), key)
                .await?;
            pages += 1;

            if total_results.is_none() {
                total_results = page
                    .page_info
                    .as_ref()
                    .and_then(|info| lenient_u64(info.total_results.as_ref()));
            }
            if title.is_none() {
                title = page.snippet.and_then(|s| non_blank(s.title));
            }

            let remaining = max_items - items.len();
            let surplus = page.items.len() > remaining;
            items.extend(page.items.into_iter().take(remaining).map(ApiPlaylistItem::into_item));

            let next = non_blank(page.next_page_token);
            if surplus || (next.is_some() && items.len() >= max_items) {
                break true;
            }
            match next {
                None => break false,
                Some(_) if pages >= MAX_PAGES => {
                    warn!(playlist_id = %playlist_id, pages, "Playlist pagination limit reached");
                    break true;
                }
                Some(token) => page_token = Some(token),
            }
        };

        debug!(
            playlist_id = %playlist_id,
            items = items.len(),
            pages,
            partial,
            "Fetched playlist"
        );

        Ok(PlaylistInfo {
            playlist_id: playlist_id.to_string(),
            title: title.unwrap_or_default(),
            total_results: total_results.unwrap_or(items.len() as u64),
            items,
            partial,
            processable_level: ProcessableLevel::for_playlist(Some(playlist_id)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key() -> ApiKey {
        ApiKey::new("k").unwrap()
    }

    fn items(prefix: &str, count: usize) -> Vec<Value> {
        (0..count)
            .map(|i| {
                json!({
                    "snippet": {
                        "title": format!("{} {}", prefix, i),
                        "publishedAt": "2024-01-01T00:00:00Z",
                        "thumbnails": {
                            "default": {"url": format!("{}{}-default.jpg", prefix, i)},
                            "high": {"url": format!("{}{}-high.jpg", prefix, i)}
                        }
                    },
                    "contentDetails": {"videoId": format!("{}{:02}", prefix, i)}
                })
            })
            .collect()
    }

    async fn mount_two_pages(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .and(query_param("pageToken", "PAGE2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": items("b", 3),
                "pageInfo": {"totalResults": 8}
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .and(query_param("playlistId", "PLabc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": items("a", 5),
                "nextPageToken": "PAGE2",
                "pageInfo": {"totalResults": 8}
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn test_item_mapping_defaults() {
        let item: ApiPlaylistItem = serde_json::from_value(json!({
            "snippet": {"resourceId": {"videoId": "fromResource"}, "publishedAt": "p"}
        }))
        .unwrap();
        let item = item.into_item();
        assert_eq!(item.id, "fromResource");
        assert_eq!(item.title, UNTITLED_ITEM);
        assert_eq!(item.thumbnail, "");
        assert_eq!(item.published_at, "p");
    }

    #[tokio::test]
    async fn test_fetch_playlist_follows_pages() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;

        let info = test_client(&server).fetch_playlist("PLabc", 200, &key()).await.unwrap();

        assert_eq!(info.items.len(), 8);
        assert!(!info.partial);
        assert_eq!(info.total_results, 8);
        assert_eq!(info.items[0].id, "a00");
        assert_eq!(info.items[0].thumbnail, "a0-high.jpg");
        assert_eq!(info.items[7].id, "b02");
        assert_eq!(info.processable_level, ProcessableLevel::Stable);
    }

    #[tokio::test]
    async fn test_fetch_playlist_stops_at_cap_with_more_pages() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;

        let info = test_client(&server).fetch_playlist("PLabc", 5, &key()).await.unwrap();

        assert_eq!(info.items.len(), 5);
        assert!(info.partial);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_playlist_truncates_surplus_items() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;

        let info = test_client(&server).fetch_playlist("PLabc", 3, &key()).await.unwrap();

        assert_eq!(info.items.len(), 3);
        assert!(info.partial);
    }

    #[tokio::test]
    async fn test_fetch_playlist_exact_fit_is_complete() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": items("c", 4)
            })))
            .mount(&server)
            .await;

        let info = test_client(&server).fetch_playlist("RDmix", 4, &key()).await.unwrap();

        assert_eq!(info.items.len(), 4);
        assert!(!info.partial);
        assert_eq!(info.total_results, 4);
        assert_eq!(info.processable_level, ProcessableLevel::Unstable);
    }
}
