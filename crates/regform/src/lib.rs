//! `regform` - a local registration book
//!
//! This library provides a durable table of name/email registrations behind
//! the [`RecordStore`] interface, plus the form state and CLI that drive it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod record;
pub mod storage;
pub mod store;

pub use config::{Config, IncompletePolicy};
pub use error::{Error, Result};
pub use form::{FormSession, SubmitOutcome};
pub use logging::init_logging;
pub use record::{Record, Registration};
pub use storage::{Storage, StorageStats};
pub use store::{MemoryRecordStore, RecordStore, SqliteRecordStore};
