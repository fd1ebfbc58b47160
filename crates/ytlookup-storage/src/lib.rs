//! Lookup history storage.
//!
//! This crate provides:
//! - A capacity-bounded, most-recent-first history cache
//! - Atomic JSON file persistence
//! - In-memory persistence for tests and ephemeral deployments

pub mod cache;
pub mod error;
pub mod persistence;

pub use cache::{HistoryCache, DEFAULT_HISTORY_CAPACITY};
pub use error::{StorageError, StorageResult};
pub use persistence::{HistoryPersistence, JsonFilePersistence, MemoryPersistence};
