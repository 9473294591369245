//! Persistent Storage Module
//!
//! A small string key/value store standing in for browser local storage,
//! plus [`SessionVault`], the only code that knows which keys hold the
//! session pair.
//!
//! # Implementations
//!
//! - [`MemoryStore`] - process-local map, used in tests
//! - [`FileStore`] - a JSON object on disk, rewritten whole on every change

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::shared::{Session, StorageError, UserRecord};

/// Key holding the raw bearer token
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON-serialized user record
pub const USER_KEY: &str = "user";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write every entry in one step.
    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError>;

    /// Remove every key in one step. Absent keys are ignored.
    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().map(|e| e.is_empty()).unwrap_or(true)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_all(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        for (key, value) in pairs {
            entries.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}

/// JSON file backed store. A missing file reads as empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Map to mutate. An unreadable file is replaced rather than blocking
    /// every write; the flag says the file must be rewritten.
    fn read_map_for_write(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
        match self.read_map() {
            Ok(map) => Ok((map, false)),
            Err(StorageError::Serialization(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Storage file is corrupt, starting over");
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    // Temp file + rename keeps the pair write all-or-nothing.
    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self.read_map()?.remove(key))
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let (mut map, _) = self.read_map_for_write()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        self.write_map(&map)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        let (mut map, corrupt) = self.read_map_for_write()?;
        let before = map.len();
        for key in keys {
            map.remove(*key);
        }
        if map.len() == before && !corrupt {
            return Ok(());
        }
        self.write_map(&map)
    }
}

/// Reads and writes the `token`/`user` pair.
///
/// A failed `clear` revokes the pair for every clone of the vault: nothing
/// stored is handed out again until the next successful `save`.
#[derive(Clone)]
pub struct SessionVault {
    store: Arc<dyn KeyValueStore>,
    revoked: Arc<AtomicBool>,
}

impl SessionVault {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            revoked: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let user = serde_json::to_string(&session.user)?;
        self.store
            .set_all(&[(TOKEN_KEY, session.token.as_str()), (USER_KEY, user.as_str())])?;
        self.revoked.store(false, Ordering::SeqCst);
        Ok(())
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked.load(Ordering::SeqCst)
    }

    /// `Some` only when both halves are present and the user record parses.
    pub fn load(&self) -> Result<Option<Session>, StorageError> {
        if self.is_revoked() {
            return Ok(None);
        }
        let (Some(token), Some(user)) = (self.store.get(TOKEN_KEY)?, self.store.get(USER_KEY)?)
        else {
            return Ok(None);
        };
        if token.is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<UserRecord>(&user) {
            Ok(user) => Ok(Some(Session { token, user })),
            Err(e) => {
                tracing::warn!(error = %e, "Stored user record is unreadable, ignoring session");
                Ok(None)
            }
        }
    }

    pub fn token(&self) -> Result<Option<String>, StorageError> {
        if self.is_revoked() {
            return Ok(None);
        }
        Ok(self.store.get(TOKEN_KEY)?.filter(|token| !token.is_empty()))
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        let result = self.store.remove_all(&[TOKEN_KEY, USER_KEY]);
        self.revoked.store(result.is_err(), Ordering::SeqCst);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session {
            token: "abc".to_string(),
            user: serde_json::from_value(serde_json::json!({
                "id": 7,
                "name": "Priya",
                "email": "priya@jadeglobal.com",
                "role": "EMPLOYEE"
            }))
            .unwrap(),
        }
    }

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        store.set_all(&[("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));

        store.remove_all(&["a", "missing"]).unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_vault_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let vault = SessionVault::new(store.clone());

        vault.save(&session()).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        assert_eq!(vault.load().unwrap(), Some(session()));
    }

    #[test]
    fn test_vault_ignores_token_without_user() {
        let store = Arc::new(MemoryStore::new());
        store.set_all(&[(TOKEN_KEY, "abc")]).unwrap();
        let vault = SessionVault::new(store);

        assert_eq!(vault.load().unwrap(), None);
        assert_eq!(vault.token().unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_vault_ignores_corrupt_user() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_all(&[(TOKEN_KEY, "abc"), (USER_KEY, "{not json")])
            .unwrap();
        let vault = SessionVault::new(store);

        assert_eq!(vault.load().unwrap(), None);
    }

    #[test]
    fn test_vault_clear_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let vault = SessionVault::new(store.clone());
        vault.save(&session()).unwrap();

        vault.clear().unwrap();
        vault.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        SessionVault::new(Arc::new(FileStore::new(&path)))
            .save(&session())
            .unwrap();

        let reopened = SessionVault::new(Arc::new(FileStore::new(&path)));
        assert_eq!(reopened.load().unwrap(), Some(session()));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));

        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        store.remove_all(&[TOKEN_KEY, USER_KEY]).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_recovers_from_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"token": 5}"#).unwrap();
        let vault = SessionVault::new(Arc::new(FileStore::new(&path)));

        vault.clear().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "{}");

        fs::write(&path, "garbage").unwrap();
        vault.save(&session()).unwrap();
        assert_eq!(vault.load().unwrap(), Some(session()));
    }

    #[test]
    fn test_failed_clear_revokes_stored_pair() {
        let store = Arc::new(BrokenRemoves::default());
        let vault = SessionVault::new(store.clone());
        vault.save(&session()).unwrap();

        assert!(vault.clear().is_err());
        assert!(vault.is_revoked());
        assert_eq!(vault.token().unwrap(), None);
        assert_eq!(vault.load().unwrap(), None);
        assert_eq!(store.inner.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        vault.save(&session()).unwrap();
        assert_eq!(vault.token().unwrap().as_deref(), Some("abc"));
    }

    #[derive(Default)]
    struct BrokenRemoves {
        inner: MemoryStore,
    }

    impl KeyValueStore for BrokenRemoves {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
            self.inner.set_all(entries)
        }

        fn remove_all(&self, _keys: &[&str]) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "garbage").unwrap();

        let result = FileStore::new(&path).get(TOKEN_KEY);
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
