//! Repository trait abstractions for metadata persistence
//!
//! These traits abstract the relational store so the services can run
//! against PostgreSQL in production and the in-memory implementations in
//! tests.

use async_trait::async_trait;
use model_registry_core::{ModelRecord, NewModelRecord};

use crate::error::StoreResult;

/// Persistence operations for model metadata rows
#[async_trait]
pub trait ModelRepository: Send + Sync {
    /// Insert a new model row
    ///
    /// # Arguments
    /// * `record` - The row to insert; the store assigns the id
    ///
    /// # Returns
    /// * `Ok(ModelRecord)` - The persisted record including its assigned id
    /// * `Err(StoreError)` - For database errors
    ///
    /// Duplicate `(author, name, version)` rows are permitted; each insert
    /// creates a distinct row.
    async fn insert(&self, record: NewModelRecord) -> StoreResult<ModelRecord>;

    /// Find a model by exact `(author, name, version)` coordinates
    ///
    /// # Arguments
    /// * `author` - Publishing author
    /// * `name` - Model name
    /// * `version` - Exact version string
    ///
    /// # Returns
    /// * `Ok(Some(ModelRecord))` - The matching record; when duplicates
    ///   exist, the row with the lowest id
    /// * `Ok(None)` - If no row matches
    /// * `Err(StoreError)` - For database errors
    async fn find_exact(
        &self,
        author: &str,
        name: &str,
        version: &str,
    ) -> StoreResult<Option<ModelRecord>>;

    /// Find the latest version of a model under byte-wise version ordering
    ///
    /// # Arguments
    /// * `author` - Publishing author
    /// * `name` - Model name
    ///
    /// # Returns
    /// * `Ok(Some(ModelRecord))` - The row whose version string sorts
    ///   highest lexicographically ("2.0" outranks "10.0"); lowest id wins
    ///   among rows sharing that version
    /// * `Ok(None)` - If no row matches the author and name
    /// * `Err(StoreError)` - For database errors
    async fn find_latest(&self, author: &str, name: &str) -> StoreResult<Option<ModelRecord>>;

    /// Cheap connectivity probe for health reporting
    async fn health_check(&self) -> StoreResult<()>;
}

/// Read-only lookups against the auth token table
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Whether a row with exactly this token value exists
    async fn token_exists(&self, token: &str) -> StoreResult<bool>;
}
