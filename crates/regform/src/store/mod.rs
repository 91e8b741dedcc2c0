//! The record store interface.
//!
//! [`RecordStore`] is the seam between the form and persistence. Two
//! adapters implement it: [`SqliteRecordStore`] for durable storage and
//! [`MemoryRecordStore`] for tests and throwaway sessions.

mod memory;
mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::record::{Record, Registration};

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

/// A durable table of registration records.
///
/// Each call is atomic on its own; callers get no transaction spanning
/// several calls. Identifiers handed out by [`RecordStore::create`] strictly
/// increase and are never reused, even after the record is deleted.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Validate and persist a registration, returning its new id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] if a field is missing, in which
    /// case nothing is written and no id is consumed. Returns a storage
    /// error if the persistence medium fails.
    async fn create(&self, payload: &Registration) -> Result<i64>;

    /// Read every record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails, or
    /// [`crate::Error::Deserialization`] if a stored payload is unreadable.
    async fn list_all(&self) -> Result<Vec<Record>>;

    /// Remove the record with the given id.
    ///
    /// Deleting an id that does not exist is not an error. The returned flag
    /// says whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the persistence medium fails.
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Shared behavior checks, run against every adapter.
    async fn check_contract(store: &dyn RecordStore) {
        assert!(store.list_all().await.unwrap().is_empty());

        let alice = Registration::new("Alice", "alice@example.com");
        let bob = Registration::new("Bob", "bob@example.com");

        let first = store.create(&alice).await.unwrap();
        let second = store.create(&bob).await.unwrap();
        assert_eq!((first, second), (1, 2));

        assert!(store.delete(first).await.unwrap());
        assert!(!store.delete(first).await.unwrap());
        assert!(!store.delete(42).await.unwrap());

        let third = store.create(&alice).await.unwrap();
        assert_eq!(third, 3);

        let records = store.list_all().await.unwrap();
        assert_eq!(
            records,
            vec![Record::new(2, bob.clone()), Record::new(3, alice.clone())]
        );

        let err = store
            .create(&Registration::new("", "nobody@example.com"))
            .await
            .unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(store.create(&bob).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_memory_store_contract() {
        check_contract(&MemoryRecordStore::new()).await;
    }

    #[tokio::test]
    async fn test_sqlite_store_contract() {
        check_contract(&SqliteRecordStore::open_in_memory().unwrap()).await;
    }

    #[tokio::test]
    async fn test_store_as_trait_object() {
        let stores: Vec<Box<dyn RecordStore>> = vec![
            Box::new(MemoryRecordStore::new()),
            Box::new(SqliteRecordStore::open_in_memory().unwrap()),
        ];
        for store in &stores {
            let id = store
                .create(&Registration::new("Alice", "alice@example.com"))
                .await
                .unwrap();
            assert_eq!(id, 1);
        }
    }
}
