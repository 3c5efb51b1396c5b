//! File-backed document store
//!
//! Each key maps to one JSON file inside a root directory. Writes go to a
//! temporary sibling first and are renamed into place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{Backend, StorageError, StorageResult};
use crate::config::Config;

/// Directory of JSON documents, one per key
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `root` (created lazily on first write)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Backend in the platform data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Config::store_dir()?))
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document for `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }
}

impl Backend for FileBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key: key.to_string(), source }),
        }
    }

    fn set(&self, key: &str, value: String) -> StorageResult<()> {
        let io_err = |source| StorageError::Io { key: key.to_string(), source };

        fs::create_dir_all(&self.root).map_err(io_err)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { key: key.to_string(), source }),
        }
    }
}

/// Percent-encode every byte outside `[A-Za-z0-9._-]` so any key is a safe file name
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn encode_key_escapes_separators() {
        assert_eq!(encode_key("progress:alice"), "progress%3Aalice");
        assert_eq!(encode_key("practice:../etc"), "practice%3A..%2Fetc");
        assert_eq!(encode_key("plain-key_1.x"), "plain-key_1.x");
    }

    #[test]
    fn distinct_keys_map_to_distinct_files() {
        let backend = FileBackend::new("/tmp/unused");
        assert_ne!(backend.path_for("progress:a/b"), backend.path_for("progress:a%2Fb"));
    }

    #[test]
    fn missing_document_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("store"));
        assert_eq!(backend.get("progress:alice").unwrap(), None);
    }

    #[test]
    fn set_creates_root_and_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("store"));

        backend.set("progress:alice", r#"{"1":{"2":true}}"#.into()).unwrap();

        assert!(backend.root().is_dir());
        assert_eq!(backend.get("progress:alice").unwrap().as_deref(), Some(r#"{"1":{"2":true}}"#));
    }

    #[test]
    fn set_replaces_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path());

        backend.set("k", "first".into()).unwrap();
        backend.set("k", "second".into()).unwrap();

        assert_eq!(backend.get("k").unwrap().as_deref(), Some("second"));
        let files: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().flatten().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn remove_deletes_and_tolerates_missing() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path());

        backend.set("k", "v".into()).unwrap();
        backend.remove("k").unwrap();
        backend.remove("k").unwrap();

        assert_eq!(backend.get("k").unwrap(), None);
    }
}
