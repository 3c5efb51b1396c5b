//! Key-value persistence for per-user state
//!
//! Stores never touch the filesystem directly. Every mutation reads a whole
//! JSON document through a [`Backend`], changes it in memory and writes the
//! whole document back, so the same progress logic runs against memory in
//! tests and against the data directory in the CLI.

pub mod file;
pub mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::identity::Identity;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Errors raised by a persistence backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed
    #[error("I/O error for record {key}: {source}")]
    Io {
        /// Record key
        key: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized
    #[error("Failed to serialize record {key}: {source}")]
    Serialize {
        /// Record key
        key: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for backend operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A string-keyed document store
///
/// `set` replaces the whole document for a key. Readers never observe a
/// partially written document.
pub trait Backend: Send + Sync {
    /// Fetch the document stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the document stored under `key`
    fn set(&self, key: &str, value: String) -> StorageResult<()>;

    /// Delete the document stored under `key` (no-op if missing)
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Kinds of per-identity record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// Lesson completion flags
    Progress,
    /// Practice topic counters
    Practice,
}

impl Record {
    /// Key prefix for this record kind
    pub fn prefix(self) -> &'static str {
        match self {
            Record::Progress => "progress",
            Record::Practice => "practice",
        }
    }

    /// Storage key for this record kind and identity, e.g. `progress:42`
    pub fn key(self, identity: &Identity) -> String {
        format!("{}:{}", self.prefix(), identity.as_str())
    }
}

/// Load a record, treating missing, unreadable or malformed data as empty
pub fn load_or_default<T>(backend: &dyn Backend, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match backend.get(key) {
        Ok(Some(contents)) => match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Ignoring malformed record {}: {}", key, e);
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!("Failed to read record {}: {}", key, e);
            T::default()
        }
    }
}

/// Serialize a record and replace it in the backend
pub fn save<T: Serialize>(backend: &dyn Backend, key: &str, value: &T) -> StorageResult<()> {
    let contents = serde_json::to_string(value)
        .map_err(|source| StorageError::Serialize { key: key.to_string(), source })?;
    let len = contents.len();

    backend.set(key, contents)?;
    tracing::debug!("Saved record {} ({} bytes)", key, len);
    Ok(())
}
