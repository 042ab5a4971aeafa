//! # Session Store
//!
//! Owns the single client-held credential and derives the authorization
//! header from it.
//!
//! The store is created once and shared (`Arc<SessionStore>`) between the
//! flows that need it. The header is derived on every call, never cached, so a
//! `save`/`clear` is visible to the very next request.

use crate::core::error::{AppError, Result};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed storage key of the credential.
pub const TOKEN_KEY: &str = "token";

/// Name of the credential file inside the data directory.
pub const CREDENTIALS_FILE: &str = "credentials.json";

pub const AUTHORIZATION: &str = "Authorization";

/// Durable key/value storage backing the session.
pub trait CredentialStorage: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn store(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local storage. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// A JSON object on disk, one string per key.
///
/// Writes go to a sibling temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage file inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(CREDENTIALS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
                Ok(Value::Object(entries)) => Ok(entries),
                _ => Err(AppError::Storage(format!(
                    "{} is not a JSON object",
                    self.path.display()
                ))),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CredentialStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .read_entries()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        // An unreadable file is overwritten.
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(key.to_string(), Value::String(value.to_string()));
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}

/// The current credential, persisted through a [`CredentialStorage`].
pub struct SessionStore {
    storage: Box<dyn CredentialStorage>,
    token: RwLock<Option<String>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SessionStore {
    /// Open a store, picking up a previously persisted credential.
    ///
    /// An unreadable credential starts the session empty; it is logged, not fatal.
    pub fn open(storage: impl CredentialStorage + 'static) -> Self {
        let token = match storage.load(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load persisted credential, starting anonymous");
                None
            }
        };
        tracing::debug!(restored = token.is_some(), "Session store opened");

        Self {
            storage: Box::new(storage),
            token: RwLock::new(token),
        }
    }

    /// A store backed by [`MemoryStorage`].
    pub fn in_memory() -> Self {
        Self::open(MemoryStorage::new())
    }

    pub fn current_token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// `{"Authorization": "Bearer <token>"}`, or an empty map when anonymous.
    pub fn auth_header(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        if let Some(token) = self.token.read().as_deref() {
            headers.insert(AUTHORIZATION.to_string(), format!("Bearer {}", token));
        }
        headers
    }

    /// Replace the credential. Saving an empty token is the same as [`clear`](Self::clear).
    ///
    /// In-memory state is updated before persisting, so a storage failure
    /// still leaves this process authenticated and is reported to the caller.
    pub fn save(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return self.clear();
        }
        *self.token.write() = Some(token.to_string());
        self.storage.store(TOKEN_KEY, token)
    }

    /// Forget the credential, in memory and on disk.
    pub fn clear(&self) -> Result<()> {
        *self.token.write() = None;
        self.storage.remove(TOKEN_KEY)
    }
}
