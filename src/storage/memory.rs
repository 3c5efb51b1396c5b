//! In-memory backend

use std::collections::HashMap;
use std::sync::RwLock;

use super::{Backend, StorageResult};

/// Process-local document store
pub struct MemoryBackend {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty store
    pub fn new() -> Self {
        Self { documents: RwLock::new(HashMap::new()) }
    }

    /// Whether a document exists for `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.documents.read().unwrap().contains_key(key)
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.documents.read().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.documents.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> StorageResult<()> {
        self.documents.write().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.documents.write().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_document() {
        let backend = MemoryBackend::new();
        backend.set("k", "one".into()).unwrap();
        backend.set("k", "two".into()).unwrap();

        assert_eq!(backend.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(backend.keys(), vec!["k".to_string()]);
    }

    #[test]
    fn remove_missing_is_ok() {
        let backend = MemoryBackend::new();
        backend.remove("nothing").unwrap();
        assert!(backend.keys().is_empty());
    }

    #[test]
    fn remove_deletes_document() {
        let backend = MemoryBackend::new();
        backend.set("k", "v".into()).unwrap();
        backend.remove("k").unwrap();

        assert!(!backend.contains_key("k"));
        assert_eq!(backend.get("k").unwrap(), None);
    }
}
