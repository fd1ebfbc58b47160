//! Lookup history service.
//!
//! Wraps the history cache behind a lock and keeps the size gauge current.
//! Recording a lookup is a side effect of the video endpoint, so failures to
//! persist are logged and counted rather than surfaced.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};
use ytlookup_models::{CaptionTrack, HistoryItem, VideoDetails};
use ytlookup_storage::{HistoryCache, HistoryPersistence};

use crate::error::ApiResult;
use crate::metrics::{record_history_size, record_history_write_failure};

/// History cache behind whichever persistence backend is configured.
pub type SharedHistory = Arc<RwLock<HistoryCache<Box<dyn HistoryPersistence>>>>;

#[derive(Clone)]
pub struct HistoryService {
    cache: SharedHistory,
}

impl HistoryService {
    pub fn new(cache: HistoryCache<Box<dyn HistoryPersistence>>) -> Self {
        record_history_size(cache.len());
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Record a successful video lookup. Never fails the caller.
    pub async fn record_lookup(&self, details: &VideoDetails, url: &str) {
        let mut cache = self.cache.write().await;

        // Keep tracks learned from an earlier captions request
        let captions = cache
            .get(&details.id)
            .map(|existing| existing.captions.clone())
            .unwrap_or_default();
        let item = HistoryItem::new(details.clone(), url).with_captions(captions);

        match cache.upsert(item).await {
            Ok(evicted) => debug!(video_id = %details.id, evicted, "Recorded lookup"),
            Err(e) => {
                warn!(video_id = %details.id, error = %e, "Failed to persist lookup history");
                record_history_write_failure("upsert");
            }
        }
        record_history_size(cache.len());
    }

    /// Store caption tracks on an existing entry. Never fails the caller.
    pub async fn attach_captions(&self, video_id: &str, tracks: &[CaptionTrack]) {
        let mut cache = self.cache.write().await;
        match cache.update_captions(video_id, tracks.to_vec()).await {
            Ok(true) => debug!(video_id = %video_id, tracks = tracks.len(), "Attached caption tracks"),
            Ok(false) => {}
            Err(e) => {
                warn!(video_id = %video_id, error = %e, "Failed to persist caption tracks");
                record_history_write_failure("update_captions");
            }
        }
    }

    pub async fn list(&self) -> Vec<HistoryItem> {
        self.cache.read().await.list()
    }

    pub async fn get(&self, video_id: &str) -> Option<HistoryItem> {
        self.cache.read().await.get(video_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn capacity(&self) -> usize {
        self.cache.read().await.capacity()
    }

    /// Remove one entry. Returns whether it existed.
    pub async fn remove(&self, video_id: &str) -> ApiResult<bool> {
        let mut cache = self.cache.write().await;
        let removed = cache.remove(video_id).await?;
        record_history_size(cache.len());
        Ok(removed)
    }

    pub async fn clear(&self) -> ApiResult<()> {
        let mut cache = self.cache.write().await;
        cache.clear().await?;
        record_history_size(0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ytlookup_storage::MemoryPersistence;

    async fn service(capacity: usize) -> HistoryService {
        let persistence: Box<dyn HistoryPersistence> = Box::new(MemoryPersistence::new());
        HistoryService::new(HistoryCache::load(persistence, capacity).await.unwrap())
    }

    fn details(id: &str, title: &str) -> VideoDetails {
        VideoDetails {
            id: id.to_string(),
            title: title.to_string(),
            ..VideoDetails::default()
        }
    }

    fn track(code: &str) -> CaptionTrack {
        CaptionTrack {
            lang: code.to_uppercase(),
            code: code.to_string(),
            is_auto_generated: false,
        }
    }

    #[tokio::test]
    async fn test_record_lookup_keeps_known_captions() {
        let history = service(5).await;
        history.record_lookup(&details("a", "first"), "a").await;
        history.attach_captions("a", &[track("en")]).await;
        history.record_lookup(&details("a", "second"), "https://youtu.be/a").await;

        let item = history.get("a").await.unwrap();
        assert_eq!(item.details.title, "second");
        assert_eq!(item.url, "https://youtu.be/a");
        assert_eq!(item.captions, vec![track("en")]);
        assert_eq!(history.len().await, 1);
    }

    #[tokio::test]
    async fn test_attach_captions_ignores_unknown_video() {
        let history = service(5).await;
        history.attach_captions("missing", &[track("de")]).await;
        assert!(history.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let history = service(5).await;
        history.record_lookup(&details("a", "A"), "a").await;
        history.record_lookup(&details("b", "B"), "b").await;

        assert!(history.remove("a").await.unwrap());
        assert!(!history.remove("a").await.unwrap());
        history.clear().await.unwrap();
        assert_eq!(history.len().await, 0);
        assert_eq!(history.capacity().await, 5);
    }
}
