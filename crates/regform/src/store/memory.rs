//! In-memory record store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::record::{Record, Registration};

use super::RecordStore;

/// A [`RecordStore`] kept entirely in memory.
///
/// Records are keyed by id in an ordered map, so iteration order is
/// insertion order. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    table: Mutex<Table>,
}

#[derive(Debug)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Registration>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl MemoryRecordStore {
    /// Create an empty store whose first id will be 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, payload: &Registration) -> Result<i64> {
        payload.validate()?;

        let mut table = self.table.lock().await;
        let id = table.next_id;
        table.next_id += 1;
        table.rows.insert(id, payload.clone());

        debug!("Inserted in-memory record with id {}", id);
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Record>> {
        let table = self.table.lock().await;
        Ok(table
            .rows
            .iter()
            .map(|(id, payload)| Record::new(*id, payload.clone()))
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let removed = self.table.lock().await.rows.remove(&id).is_some();
        debug!("Delete in-memory record {}: removed={}", id, removed);
        Ok(removed)
    }
}
