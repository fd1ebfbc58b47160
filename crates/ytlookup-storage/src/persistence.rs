//! History persistence backends.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;
use ytlookup_models::HistoryItem;

use crate::error::{StorageError, StorageResult};

/// Current on-disk format version.
const FILE_FORMAT_VERSION: u32 = 1;

/// Where the history cache reads and writes its entries.
///
/// Items are passed most recent first.
#[async_trait]
pub trait HistoryPersistence: Send + Sync {
    async fn load(&self) -> StorageResult<Vec<HistoryItem>>;

    async fn save(&self, items: &[HistoryItem]) -> StorageResult<()>;
}

#[async_trait]
impl<T: HistoryPersistence + ?Sized> HistoryPersistence for Box<T> {
    async fn load(&self) -> StorageResult<Vec<HistoryItem>> {
        (**self).load().await
    }

    async fn save(&self, items: &[HistoryItem]) -> StorageResult<()> {
        (**self).save(items).await
    }
}

#[async_trait]
impl<T: HistoryPersistence + ?Sized> HistoryPersistence for Arc<T> {
    async fn load(&self) -> StorageResult<Vec<HistoryItem>> {
        (**self).load().await
    }

    async fn save(&self, items: &[HistoryItem]) -> StorageResult<()> {
        (**self).save(items).await
    }
}

// =============================================================================
// JSON file
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    version: u32,
    items: Vec<HistoryItem>,
}

#[derive(Serialize)]
struct HistoryFileRef<'a> {
    version: u32,
    items: &'a [HistoryItem],
}

/// Persists history as a single JSON document.
///
/// Writes go to a sibling temp file which is then renamed over the target,
/// so readers never observe a half-written file.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "history.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl HistoryPersistence for JsonFilePersistence {
    async fn load(&self) -> StorageResult<Vec<HistoryItem>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No history file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let file: HistoryFile = serde_json::from_slice(&data)
            .map_err(|e| StorageError::corrupt(self.path.display().to_string(), e.to_string()))?;

        if file.version != FILE_FORMAT_VERSION {
            return Err(StorageError::corrupt(
                self.path.display().to_string(),
                format!("unsupported version {}", file.version),
            ));
        }

        debug!(path = %self.path.display(), items = file.items.len(), "Loaded history file");
        Ok(file.items)
    }

    async fn save(&self, items: &[HistoryItem]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(&HistoryFileRef {
            version: FILE_FORMAT_VERSION,
            items,
        })?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, &body).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        debug!(path = %self.path.display(), items = items.len(), bytes = body.len(), "Saved history file");
        Ok(())
    }
}

// =============================================================================
// Memory
// =============================================================================

/// Keeps the persisted snapshot in memory only.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    items: Mutex<Vec<HistoryItem>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-populated snapshot.
    pub fn with_items(items: Vec<HistoryItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    /// The last saved snapshot.
    pub async fn snapshot(&self) -> Vec<HistoryItem> {
        self.items.lock().await.clone()
    }
}

#[async_trait]
impl HistoryPersistence for MemoryPersistence {
    async fn load(&self) -> StorageResult<Vec<HistoryItem>> {
        Ok(self.items.lock().await.clone())
    }

    async fn save(&self, items: &[HistoryItem]) -> StorageResult<()> {
        *self.items.lock().await = items.to_vec();
        Ok(())
    }
}
