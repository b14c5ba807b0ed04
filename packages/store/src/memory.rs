use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::backend::{SessionBackend, StorageError};

/// In-memory backend for tests and native builds.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Unavailable)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let backend = MemoryBackend::new();
        assert!(backend.get_item("k").is_none());

        backend.set_item("k", "v").unwrap();
        assert_eq!(backend.get_item("k").as_deref(), Some("v"));

        backend.remove_item("k");
        assert!(backend.get_item("k").is_none());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_clones_share_storage() {
        let a = MemoryBackend::new();
        let b = a.clone();
        a.set_item("token", "abc").unwrap();
        assert_eq!(b.get_item("token").as_deref(), Some("abc"));
    }
}
