//! `SQLite`-backed record store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::record::{Record, Registration};
use crate::storage::{Storage, StorageStats};

use super::RecordStore;

/// A [`RecordStore`] persisted in an `SQLite` file.
///
/// The connection sits behind an async mutex, so concurrent callers are
/// served one at a time.
#[derive(Debug)]
pub struct SqliteRecordStore {
    path: PathBuf,
    storage: Mutex<Storage>,
}

impl SqliteRecordStore {
    /// Open or create the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_storage(Storage::open(path)?))
    }

    /// Open a store backed by an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_storage(Storage::open_in_memory()?))
    }

    /// Wrap an already opened storage engine.
    #[must_use]
    pub fn from_storage(storage: Storage) -> Self {
        Self {
            path: storage.path().to_path_buf(),
            storage: Mutex::new(storage),
        }
    }

    /// Path to the underlying database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Statistics about the underlying database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn stats(&self) -> Result<StorageStats> {
        self.storage.lock().await.stats()
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn create(&self, payload: &Registration) -> Result<i64> {
        self.storage.lock().await.insert(payload)
    }

    async fn list_all(&self) -> Result<Vec<Record>> {
        self.storage.lock().await.list_all()
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.storage.lock().await.delete(id)
    }
}
