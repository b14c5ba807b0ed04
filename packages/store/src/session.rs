//! # Session store
//!
//! [`SessionStore`] persists a bearer token and the matching [`User`] record under
//! two keys of a [`SessionBackend`], and hands them back as a single [`Session`].
//!
//! ## Consistency
//!
//! - [`save`](SessionStore::save) writes the user record first and the token last.
//!   If the token write is rejected, both keys are removed, so a reader never
//!   sees a token paired with the wrong user.
//! - [`read`](SessionStore::read) returns a session only when both keys are
//!   present, the token is non-empty, and the user JSON parses. Anything else
//!   reads as "no session"; malformed data is never an error.
//! - [`clear`](SessionStore::clear) removes both keys and is idempotent.
//!
//! ## Epochs
//!
//! Every `save` and `clear` advances a counter shared by all clones of the store.
//! Code that starts an async operation records [`epoch`](SessionStore::epoch)
//! first and finishes with [`save_if_current`](SessionStore::save_if_current) or
//! [`clear_if_current`](SessionStore::clear_if_current). Those writes only happen
//! when nobody else has written in between, which is how a response that lands
//! after a logout is kept from touching the session again.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::backend::{SessionBackend, StorageError};
use crate::config::PortalConfig;
use crate::models::{Session, User};

/// Storage keys for the token and the serialised user record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionKeys {
    pub token: String,
    pub user: String,
}

impl SessionKeys {
    /// Derive both keys from the token key. The user record lives under `"<token_key>_user"`.
    pub fn new(token_key: impl Into<String>) -> Self {
        let token = token_key.into();
        let user = format!("{token}_user");
        Self { token, user }
    }

    pub fn from_config(config: &PortalConfig) -> Self {
        Self::new(config.session.token_key.clone())
    }
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self::from_config(&PortalConfig::default())
    }
}

/// Persisted bearer token + user record.
#[derive(Clone, Debug)]
pub struct SessionStore<B> {
    backend: B,
    keys: Arc<SessionKeys>,
    epoch: Arc<AtomicU64>,
}

impl<B: SessionBackend> SessionStore<B> {
    pub fn new(backend: B, keys: SessionKeys) -> Self {
        Self {
            backend,
            keys: Arc::new(keys),
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Current write generation. Advances on every `save` and `clear`.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Persist a token and its user, replacing any previous session.
    pub fn save(&self, token: &str, user: &User) -> Result<(), StorageError> {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.write(token, user)
    }

    /// Persist only if no other write happened since `epoch` was observed.
    ///
    /// Returns `Ok(false)` when the write was skipped.
    pub fn save_if_current(
        &self,
        epoch: u64,
        token: &str,
        user: &User,
    ) -> Result<bool, StorageError> {
        if !self.advance_from(epoch) {
            return Ok(false);
        }
        self.write(token, user)?;
        Ok(true)
    }

    /// The last saved session, or `None` when absent or unreadable.
    pub fn read(&self) -> Option<Session> {
        let token = self.backend.get_item(&self.keys.token)?;
        if token.is_empty() {
            return None;
        }
        let raw_user = self.backend.get_item(&self.keys.user)?;
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(Session { token, user }),
            Err(e) => {
                tracing::debug!("Ignoring unreadable cached user: {e}");
                None
            }
        }
    }

    /// The current bearer token, if a complete session is stored.
    pub fn token(&self) -> Option<String> {
        self.read().map(|session| session.token)
    }

    /// Remove both keys. Safe to call with nothing stored.
    pub fn clear(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.erase();
    }

    /// Clear only if no other write happened since `epoch` was observed.
    ///
    /// Returns `true` when this call performed the clear.
    pub fn clear_if_current(&self, epoch: u64) -> bool {
        if !self.advance_from(epoch) {
            return false;
        }
        self.erase();
        true
    }

    fn advance_from(&self, epoch: u64) -> bool {
        self.epoch
            .compare_exchange(epoch, epoch + 1, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    fn write(&self, token: &str, user: &User) -> Result<(), StorageError> {
        let raw_user =
            serde_json::to_string(user).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.backend.set_item(&self.keys.user, &raw_user)?;
        if let Err(e) = self.backend.set_item(&self.keys.token, token) {
            tracing::error!("Session token write failed, discarding session: {e}");
            self.erase();
            return Err(e);
        }
        Ok(())
    }

    fn erase(&self) {
        self.backend.remove_item(&self.keys.token);
        self.backend.remove_item(&self.keys.user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use crate::models::Role;

    fn admin() -> User {
        User {
            id: 1,
            username: "admin".to_string(),
            role: Role::Admin,
        }
    }

    fn editor() -> User {
        User {
            id: 7,
            username: "maria".to_string(),
            role: Role::Editor,
        }
    }

    fn store() -> (SessionStore<MemoryBackend>, MemoryBackend) {
        let backend = MemoryBackend::new();
        (SessionStore::new(backend.clone(), SessionKeys::default()), backend)
    }

    #[test]
    fn test_save_then_read() {
        let (store, _) = store();
        assert!(store.read().is_none());

        store.save("abc123", &admin()).unwrap();
        assert_eq!(store.read(), Some(Session::new("abc123", admin())));

        store.save("def456", &editor()).unwrap();
        assert_eq!(store.read(), Some(Session::new("def456", editor())));
        assert_eq!(store.token().as_deref(), Some("def456"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (store, backend) = store();
        store.save("abc123", &admin()).unwrap();

        store.clear();
        assert!(store.read().is_none());
        assert!(backend.is_empty());

        store.clear();
        assert!(store.read().is_none());
    }

    #[test]
    fn test_keys_follow_config() {
        let keys = SessionKeys::new("gov_token");
        assert_eq!(keys.token, "gov_token");
        assert_eq!(keys.user, "gov_token_user");

        let backend = MemoryBackend::new();
        let store = SessionStore::new(backend.clone(), keys);
        store.save("t", &admin()).unwrap();
        assert_eq!(backend.get_item("gov_token").as_deref(), Some("t"));
        assert!(backend.get_item("gov_token_user").is_some());
    }

    #[test]
    fn test_malformed_user_reads_as_empty() {
        let (store, backend) = store();
        backend.set_item("portal_token", "abc123").unwrap();
        backend.set_item("portal_token_user", "{not json").unwrap();
        assert!(store.read().is_none());
    }

    #[test]
    fn test_half_session_reads_as_empty() {
        let (store, backend) = store();
        backend.set_item("portal_token", "abc123").unwrap();
        assert!(store.read().is_none());

        backend.remove_item("portal_token");
        backend
            .set_item("portal_token_user", &serde_json::to_string(&admin()).unwrap())
            .unwrap();
        assert!(store.read().is_none());
    }

    #[test]
    fn test_empty_token_reads_as_empty() {
        let (store, _) = store();
        store.save("", &admin()).unwrap();
        assert!(store.read().is_none());
    }

    #[test]
    fn test_epoch_advances_on_every_write() {
        let (store, _) = store();
        let start = store.epoch();
        store.save("a", &admin()).unwrap();
        store.clear();
        store.clear();
        assert_eq!(store.epoch(), start + 3);
    }

    #[test]
    fn test_stale_clear_is_skipped() {
        let (store, _) = store();
        store.save("old", &admin()).unwrap();
        let seen = store.epoch();

        // A fresh login lands before the stale failure is processed
        store.save("new", &editor()).unwrap();

        assert!(!store.clear_if_current(seen));
        assert_eq!(store.token().as_deref(), Some("new"));
    }

    #[test]
    fn test_second_clear_from_same_epoch_is_skipped() {
        let (store, _) = store();
        store.save("abc", &admin()).unwrap();
        let seen = store.epoch();

        assert!(store.clear_if_current(seen));
        assert!(!store.clear_if_current(seen));
        assert!(store.read().is_none());
    }

    #[test]
    fn test_stale_save_is_skipped() {
        let (store, _) = store();
        store.save("abc", &admin()).unwrap();
        let seen = store.epoch();

        store.clear();

        assert!(!store.save_if_current(seen, "abc", &admin()).unwrap());
        assert!(store.read().is_none());
    }

    #[derive(Clone, Default)]
    struct RejectTokenWrites(MemoryBackend);

    impl SessionBackend for RejectTokenWrites {
        fn get_item(&self, key: &str) -> Option<String> {
            self.0.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == "portal_token" {
                return Err(StorageError::WriteRejected {
                    key: key.to_string(),
                    reason: "quota exceeded".to_string(),
                });
            }
            self.0.set_item(key, value)
        }

        fn remove_item(&self, key: &str) {
            self.0.remove_item(key)
        }
    }

    #[test]
    fn test_failed_token_write_leaves_no_user_behind() {
        let backend = RejectTokenWrites::default();
        let store = SessionStore::new(backend.clone(), SessionKeys::default());

        let err = store.save("abc", &admin()).unwrap_err();
        assert!(matches!(err, StorageError::WriteRejected { .. }));
        assert!(backend.0.is_empty());
        assert!(store.read().is_none());
    }
}
