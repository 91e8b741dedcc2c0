//! The registration form as explicit application state.
//!
//! A [`FormSession`] owns the current field values and the last full read of
//! the store. Every mutation is followed by a full re-read, so
//! [`FormSession::entries`] always reflects what the store holds.

use tracing::{debug, warn};

use crate::config::IncompletePolicy;
use crate::error::Result;
use crate::record::{Record, Registration};
use crate::store::RecordStore;

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The registration was stored under this id.
    Saved(i64),
    /// A field was missing and the policy is [`IncompletePolicy::Skip`].
    Skipped,
}

/// Form state driving a [`RecordStore`].
#[derive(Debug)]
pub struct FormSession<S> {
    store: S,
    policy: IncompletePolicy,
    name: String,
    email: String,
    entries: Vec<Record>,
}

impl<S: RecordStore> FormSession<S> {
    /// Create a session with empty fields and no entries loaded yet.
    #[must_use]
    pub fn new(store: S, policy: IncompletePolicy) -> Self {
        Self {
            store,
            policy,
            name: String::new(),
            email: String::new(),
            entries: Vec::new(),
        }
    }

    /// Initial full read of the store.
    ///
    /// # Errors
    ///
    /// Returns any error from [`RecordStore::list_all`].
    pub async fn load(&mut self) -> Result<&[Record]> {
        self.refresh().await?;
        Ok(&self.entries)
    }

    /// Set the name field.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set the email field.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Current name field.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current email field.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Records as of the last read.
    #[must_use]
    pub fn entries(&self) -> &[Record] {
        &self.entries
    }

    /// The store behind this session.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Submit the current field values.
    ///
    /// Field values are kept after a successful save.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] for an incomplete submission
    /// under [`IncompletePolicy::Reject`], and propagates store errors.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let registration = Registration::new(self.name.clone(), self.email.clone());

        if let Err(err) = registration.validate() {
            match self.policy {
                IncompletePolicy::Skip => {
                    debug!("Skipping incomplete submission: {}", err);
                    return Ok(SubmitOutcome::Skipped);
                }
                IncompletePolicy::Reject => {
                    warn!("Rejecting incomplete submission: {}", err);
                    return Err(err);
                }
            }
        }

        let id = self.store.create(&registration).await?;
        self.refresh().await?;
        Ok(SubmitOutcome::Saved(id))
    }

    /// Delete a record and re-read the store.
    ///
    /// Returns whether a record was removed; an unknown id is not an error.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let removed = self.store.delete(id).await?;
        self.refresh().await?;
        Ok(removed)
    }

    async fn refresh(&mut self) -> Result<()> {
        self.entries = self.store.list_all().await?;
        debug!("Refreshed form entries: {} records", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::MemoryRecordStore;

    fn session(policy: IncompletePolicy) -> FormSession<MemoryRecordStore> {
        FormSession::new(MemoryRecordStore::new(), policy)
    }

    #[tokio::test]
    async fn test_load_empty() {
        let mut form = session(IncompletePolicy::Skip);
        assert!(form.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_sees_existing_records() {
        let store = MemoryRecordStore::new();
        store
            .create(&Registration::new("Alice", "alice@example.com"))
            .await
            .unwrap();

        let mut form = FormSession::new(store, IncompletePolicy::Skip);
        assert!(form.entries().is_empty());
        assert_eq!(form.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_saves_and_refreshes() {
        let mut form = session(IncompletePolicy::Skip);
        form.set_name("Alice");
        form.set_email("alice@example.com");

        assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Saved(1));
        assert_eq!(
            form.entries(),
            [Record::new(1, Registration::new("Alice", "alice@example.com"))]
        );
        // Fields are left as typed.
        assert_eq!(form.name(), "Alice");
        assert_eq!(form.email(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_submit_incomplete_skipped() {
        let mut form = session(IncompletePolicy::Skip);
        form.set_name("Alice");

        assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Skipped);
        assert!(form.store().list_all().await.unwrap().is_empty());
        assert!(form.entries().is_empty());
    }

    #[tokio::test]
    async fn test_submit_whitespace_name_is_saved() {
        let mut form = session(IncompletePolicy::Skip);
        form.set_name("   ");
        form.set_email("alice@example.com");

        assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Saved(1));
        assert_eq!(
            form.entries(),
            [Record::new(1, Registration::new("   ", "alice@example.com"))]
        );
    }

    #[tokio::test]
    async fn test_submit_incomplete_rejected() {
        let mut form = session(IncompletePolicy::Reject);
        form.set_email("alice@example.com");

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, Error::Validation { field: "name" }));
        assert!(form.store().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_refreshes() {
        let mut form = session(IncompletePolicy::Skip);
        form.set_name("Alice");
        form.set_email("alice@example.com");
        form.submit().await.unwrap();
        form.set_name("Bob");
        form.set_email("bob@example.com");
        form.submit().await.unwrap();

        assert!(form.delete(1).await.unwrap());
        let ids: Vec<i64> = form.entries().iter().map(|r| r.id).collect();
        assert_eq!(ids, [2]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let mut form = session(IncompletePolicy::Skip);
        form.set_name("Alice");
        form.set_email("alice@example.com");
        form.submit().await.unwrap();

        assert!(!form.delete(99).await.unwrap());
        assert_eq!(form.entries().len(), 1);
    }
}
