//! Error types for regform.
//!
//! This module defines the error taxonomy shared by the record store, the
//! form session, and the command-line front end.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for regform operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// A required registration field was empty.
    #[error("missing required field: {field}")]
    Validation {
        /// Name of the missing field.
        field: &'static str,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// The database schema could not be brought to the supported version.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// A stored value did not parse as a registration when read back.
    #[error("record {id} has an unreadable payload: {source}")]
    Deserialization {
        /// Identifier of the offending record.
        id: i64,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },
}

/// A specialized Result type for regform operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for the given field.
    #[must_use]
    pub fn missing_field(field: &'static str) -> Self {
        Self::Validation { field }
    }

    /// Check if this error is a caller-side validation failure.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error originates in the persistence medium.
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::DatabaseOpen { .. }
                | Self::DatabaseQuery(_)
                | Self::DatabaseMigration { .. }
                | Self::DirectoryCreate { .. }
                | Self::Io(_)
        )
    }

    /// Check if this error is a stored payload that failed to parse.
    #[must_use]
    pub fn is_deserialization_error(&self) -> bool {
        matches!(self, Self::Deserialization { .. })
    }
}
