//! In-memory store implementations
//!
//! Substitute stores for tests and local development. They reproduce the
//! semantics the services rely on from the real backends: ids are assigned
//! in ascending insertion order, version strings compare byte-wise, and
//! a missing object key is distinguishable from an unreachable store.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use model_registry_core::{ModelRecord, NewModelRecord};

use crate::error::{StoreError, StoreResult};
use crate::object::ObjectStore;
use crate::repository::{ModelRepository, TokenRepository};

/// In-memory implementation of [`ModelRepository`]
#[derive(Debug, Default)]
pub struct InMemoryModelRepository {
    state: Mutex<ModelState>,
}

#[derive(Debug, Default)]
struct ModelState {
    rows: Vec<ModelRecord>,
    next_id: i64,
}

impl InMemoryModelRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored
    pub fn count(&self) -> usize {
        self.state.lock().map(|state| state.rows.len()).unwrap_or(0)
    }

    /// Snapshot of all rows in insertion order
    pub fn rows(&self) -> Vec<ModelRecord> {
        self.state
            .lock()
            .map(|state| state.rows.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, ModelState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Internal("Model state mutex poisoned".to_string()))
    }
}

#[async_trait]
impl ModelRepository for InMemoryModelRepository {
    async fn insert(&self, record: NewModelRecord) -> StoreResult<ModelRecord> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let record = record.into_record(state.next_id);
        state.rows.push(record.clone());
        Ok(record)
    }

    async fn find_exact(
        &self,
        author: &str,
        name: &str,
        version: &str,
    ) -> StoreResult<Option<ModelRecord>> {
        let state = self.lock()?;
        Ok(state
            .rows
            .iter()
            .filter(|row| row.author == author && row.name == name && row.version == version)
            .min_by_key(|row| row.id)
            .cloned())
    }

    async fn find_latest(&self, author: &str, name: &str) -> StoreResult<Option<ModelRecord>> {
        let state = self.lock()?;
        Ok(state
            .rows
            .iter()
            .filter(|row| row.author == author && row.name == name)
            // Highest version byte-wise; lowest id among equal versions.
            .max_by(|a, b| {
                a.version
                    .as_bytes()
                    .cmp(b.version.as_bytes())
                    .then_with(|| b.id.cmp(&a.id))
            })
            .cloned())
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.lock().map(|_| ())
    }
}

/// In-memory implementation of [`TokenRepository`]
#[derive(Debug, Default)]
pub struct InMemoryTokenRepository {
    tokens: Mutex<HashSet<String>>,
}

impl InMemoryTokenRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with the given token values
    pub fn with_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: Mutex::new(tokens.into_iter().map(Into::into).collect()),
        }
    }

    /// Add a token value
    pub fn insert(&self, token: impl Into<String>) {
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.insert(token.into());
        }
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn token_exists(&self, token: &str) -> StoreResult<bool> {
        let tokens = self
            .tokens
            .lock()
            .map_err(|_| StoreError::Internal("Token state mutex poisoned".to_string()))?;
        Ok(tokens.contains(token))
    }
}

/// In-memory implementation of [`ObjectStore`]
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs currently stored
    pub fn len(&self) -> usize {
        self.blobs.lock().map(|blobs| blobs.len()).unwrap_or(0)
    }

    /// Whether the store holds no blobs
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a blob exists under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.blobs
            .lock()
            .map(|blobs| blobs.contains_key(key))
            .unwrap_or(false)
    }

    /// Remove the blob under `key`, returning whether it existed.
    ///
    /// Lets tests manufacture a dangling metadata reference.
    pub fn remove(&self, key: &str) -> bool {
        self.blobs
            .lock()
            .map(|mut blobs| blobs.remove(key).is_some())
            .unwrap_or(false)
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.blobs
            .lock()
            .map_err(|_| StoreError::Internal("Blob state mutex poisoned".to_string()))
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> StoreResult<()> {
        let mut blobs = self.lock()?;
        blobs.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        let blobs = self.lock()?;
        blobs
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::ObjectMissing(key.to_string()))
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.lock().map(|_| ())
    }
}
