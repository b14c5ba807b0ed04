//! # `localStorage` backend
//!
//! [`LocalStorageBackend`] is the [`SessionBackend`] used on the **web platform**.
//! It keeps the session keys in the window's `localStorage`, so a signed-in
//! user stays signed in across reloads of the same browser profile.
//!
//! ## Connection management
//!
//! The backend is a zero-size struct that looks up `window.localStorage` on
//! every call. The browser hands back the same `Storage` object each time, and
//! the lookup can fail at any point (private browsing, storage disabled by
//! policy), so nothing is cached.
//!
//! ## Error handling
//!
//! Reads degrade to `None` when storage is unavailable. Writes report
//! [`StorageError`] so the caller can roll back a half-written session.

use crate::backend::{SessionBackend, StorageError};

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = self.storage() {
            if let Err(e) = storage.remove_item(key) {
                tracing::warn!("Failed to remove {key} from localStorage: {e:?}");
            }
        }
    }
}
