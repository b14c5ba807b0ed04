//! Key/value seam underneath [`crate::SessionStore`].

use thiserror::Error;

/// Errors raised by a persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage rejected write to `{key}`: {reason}")]
    WriteRejected { key: String, reason: String },
    #[error("failed to serialise session: {0}")]
    Serialize(String),
}

/// String key/value storage that survives a page reload.
///
/// Reads never fail: an unavailable backend reads as empty.
pub trait SessionBackend {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str);
}
