//! Common test utilities and helpers
//!
//! Builds a session store wired to a wiremock backend and in-memory storage.

#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use authportal::egui_app::storage::{KeyValueStore, MemoryStore, TOKEN_KEY, USER_KEY};
use authportal::egui_app::{ApiClient, SessionStore, SessionVault};
use authportal::shared::{PendingRoute, StorageError};
use serde_json::Value;

pub struct TestSession {
    pub session: SessionStore,
    pub storage: Arc<MemoryStore>,
    pub redirects: PendingRoute,
}

impl TestSession {
    pub fn stored_token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).unwrap()
    }

    pub fn stored_user(&self) -> Option<Value> {
        self.storage
            .get(USER_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    /// A second store over the same storage, as after restarting the app.
    pub fn reopen(&self, base_url: &str) -> SessionStore {
        session_over(base_url, self.storage.clone(), PendingRoute::new())
    }
}

pub fn session_over(
    base_url: &str,
    storage: Arc<dyn KeyValueStore>,
    redirects: PendingRoute,
) -> SessionStore {
    let vault = SessionVault::new(storage);
    let api = ApiClient::with_client(reqwest::Client::new(), base_url, vault.clone());
    SessionStore::new(api, vault, Arc::new(redirects))
}

pub fn test_session(base_url: &str) -> TestSession {
    let storage = Arc::new(MemoryStore::new());
    let redirects = PendingRoute::new();
    let session = session_over(base_url, storage.clone(), redirects.clone());
    session.restore();
    TestSession {
        session,
        storage,
        redirects,
    }
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Memory store whose writes or removals can be switched to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_writes: AtomicBool,
    pub fail_removes: AtomicBool,
}

impl FlakyStore {
    fn denied() -> StorageError {
        io::Error::new(io::ErrorKind::PermissionDenied, "read-only storage").into()
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::denied());
        }
        self.inner.set_all(entries)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(Self::denied());
        }
        self.inner.remove_all(keys)
    }
}
