//! Storage layer for regform.
//!
//! This module provides the `SQLite`-backed table of registration records
//! that sits underneath [`crate::store::SqliteRecordStore`].

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{Record, Registration};

/// Path reported for in-memory databases.
const IN_MEMORY_PATH: &str = ":memory:";

/// Storage engine for registration records.
///
/// Every operation is a single statement, so each one is atomic on its own.
/// There is no multi-operation transaction support.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(IN_MEMORY_PATH),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(IN_MEMORY_PATH),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a registration and return its freshly assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a field is missing (nothing is
    /// written), or a storage error if the insert fails.
    pub fn insert(&self, registration: &Registration) -> Result<i64> {
        registration.validate()?;
        let value = registration.to_value()?;

        self.conn
            .execute("INSERT INTO items (value) VALUES (?1)", [value])?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted record with id {}", id);
        Ok(id)
    }

    /// Get a record by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored value is unreadable.
    pub fn get(&self, id: i64) -> Result<Option<Record>> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM items WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()?;

        value
            .map(|value| {
                Registration::from_value(id, &value).map(|payload| Record::new(id, payload))
            })
            .transpose()
    }

    /// Read every record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails, or
    /// [`Error::Deserialization`] for the first unreadable stored value.
    pub fn list_all(&self) -> Result<Vec<Record>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, value FROM items ORDER BY id ASC")?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, value)| {
                Registration::from_value(id, &value).map(|payload| Record::new(id, payload))
            })
            .collect()
    }

    /// Count stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete a record by id.
    ///
    /// Returns `true` if a record was deleted, `false` if none had that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let affected = self.conn.execute("DELETE FROM items WHERE id = ?1", [id])?;
        if affected > 0 {
            debug!("Deleted record with id {}", id);
        } else {
            debug!("No record with id {} to delete", id);
        }
        Ok(affected > 0)
    }

    /// The id the next insert will receive.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn next_id(&self) -> Result<i64> {
        // sqlite_sequence only gets a row after the first AUTOINCREMENT insert.
        let seq: Option<i64> = self
            .conn
            .query_row(
                "SELECT seq FROM sqlite_sequence WHERE name = 'items'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(seq.unwrap_or(0) + 1)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails, or [`Error::Io`] if
    /// the database file's size cannot be read.
    pub fn stats(&self) -> Result<StorageStats> {
        let total_records = self.count()?;

        let (lowest_id, highest_id): (Option<i64>, Option<i64>) =
            self.conn
                .query_row("SELECT MIN(id), MAX(id) FROM items", [], |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })?;

        let next_id = self.next_id()?;

        let db_size_bytes = if self.path.as_os_str() == IN_MEMORY_PATH {
            0
        } else {
            std::fs::metadata(&self.path)?.len()
        };

        Ok(StorageStats {
            total_records,
            lowest_id,
            highest_id,
            next_id,
            db_size_bytes,
        })
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Total number of records stored.
    pub total_records: i64,
    /// Smallest live id.
    pub lowest_id: Option<i64>,
    /// Largest live id.
    pub highest_id: Option<i64>,
    /// Id the next insert will receive.
    pub next_id: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
