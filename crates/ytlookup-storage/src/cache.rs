//! Bounded lookup history.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info};
use ytlookup_models::{CaptionTrack, HistoryItem};

use crate::error::{StorageError, StorageResult};
use crate::persistence::HistoryPersistence;

/// Entries kept when no capacity is configured.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Most-recent-first history of video lookups, keyed by video ID.
///
/// Every mutation is written through to the persistence backend. If that
/// write fails the in-memory state keeps the change and the error is returned.
#[derive(Debug)]
pub struct HistoryCache<P: HistoryPersistence> {
    persistence: P,
    capacity: usize,
    items: VecDeque<HistoryItem>,
}

impl<P: HistoryPersistence> HistoryCache<P> {
    /// Read persisted items and build the cache.
    ///
    /// Duplicate IDs keep their first (most recent) occurrence and anything
    /// beyond `capacity` is dropped.
    pub async fn load(persistence: P, capacity: usize) -> StorageResult<Self> {
        if capacity == 0 {
            return Err(StorageError::InvalidCapacity);
        }

        let mut seen = HashSet::new();
        let items: VecDeque<HistoryItem> = persistence
            .load()
            .await?
            .into_iter()
            .filter(|item| seen.insert(item.id.clone()))
            .take(capacity)
            .collect();

        info!(items = items.len(), capacity, "Loaded lookup history");
        Ok(Self {
            persistence,
            capacity,
            items,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All entries, most recent first.
    pub fn list(&self) -> Vec<HistoryItem> {
        self.items.iter().cloned().collect()
    }

    /// Insert or replace the entry for `item.id` and make it the most recent.
    ///
    /// Returns how many old entries were evicted.
    pub async fn upsert(&mut self, item: HistoryItem) -> StorageResult<usize> {
        let replaced = self.take(&item.id).is_some();
        debug!(video_id = %item.id, replaced, "Recording lookup");

        self.items.push_front(item);

        let mut evicted = 0;
        while self.items.len() > self.capacity {
            if let Some(old) = self.items.pop_back() {
                debug!(video_id = %old.id, "Evicted history entry");
                evicted += 1;
            }
        }

        self.persist().await?;
        Ok(evicted)
    }

    /// Replace the caption tracks of an existing entry without changing its
    /// position. Returns whether the entry existed.
    pub async fn update_captions(&mut self, id: &str, captions: Vec<CaptionTrack>) -> StorageResult<bool> {
        let Some(entry) = self.items.iter_mut().find(|item| item.id == id) else {
            return Ok(false);
        };
        entry.captions = captions;
        self.persist().await?;
        Ok(true)
    }

    /// Remove one entry. Returns whether it existed.
    pub async fn remove(&mut self, id: &str) -> StorageResult<bool> {
        if self.take(id).is_none() {
            return Ok(false);
        }
        self.persist().await?;
        Ok(true)
    }

    /// Remove every entry.
    pub async fn clear(&mut self) -> StorageResult<()> {
        self.items.clear();
        self.persist().await
    }

    fn take(&mut self, id: &str) -> Option<HistoryItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        self.items.remove(index)
    }

    async fn persist(&self) -> StorageResult<()> {
        let snapshot: Vec<HistoryItem> = self.items.iter().cloned().collect();
        self.persistence.save(&snapshot).await
    }
}
