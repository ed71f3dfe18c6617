//! Object store abstraction for descriptor blobs
//!
//! The registry treats the object store as an opaque key/value bucket:
//! write bytes under a key, read them back by key. The production
//! implementation speaks the S3 API (see [`crate::s3`]); tests use the
//! in-memory implementation.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{StoreError, StoreResult};

/// Default request timeout for object store calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default region accepted by S3-compatible stores that ignore regions
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default bucket name for local development
pub const DEFAULT_BUCKET: &str = "models";

/// Blob storage scoped to one bucket.
///
/// Implementations must keep two failure modes distinguishable: a key that
/// does not exist (`StoreError::ObjectMissing`) and a store that cannot be
/// reached or misbehaves (`StoreError::ObjectStoreUnavailable`).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write a blob under `key`, overwriting any existing object
    async fn put(&self, key: &str, bytes: Vec<u8>) -> StoreResult<()>;

    /// Fetch the blob stored under `key`
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The stored bytes
    /// * `Err(StoreError::ObjectMissing)` - If no object exists under `key`
    /// * `Err(StoreError::ObjectStoreUnavailable)` - If the store cannot be
    ///   reached or answers with an unexpected status
    async fn get(&self, key: &str) -> StoreResult<Vec<u8>>;

    /// Probe reachability of the backing store for health reporting
    async fn health_check(&self) -> StoreResult<()>;
}

/// Configuration for an S3-compatible object store client
#[derive(Debug, Clone)]
pub struct ObjectStoreConfig {
    /// Endpoint URL, e.g. `http://minio:9000`
    pub endpoint: String,

    /// Access key id
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,

    /// Bucket all blobs live in
    pub bucket: String,

    /// Signing region; MinIO accepts the default
    pub region: String,

    /// Per-request timeout
    pub request_timeout: Duration,
}

impl ObjectStoreConfig {
    /// Create a configuration with development defaults for region,
    /// bucket, and timeout
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            bucket: DEFAULT_BUCKET.to_string(),
            region: DEFAULT_REGION.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Set the bucket name
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Set the signing region
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> StoreResult<()> {
        if self.endpoint.is_empty() {
            return Err(StoreError::Configuration(
                "Object store endpoint cannot be empty".to_string(),
            ));
        }

        if self.bucket.is_empty() {
            return Err(StoreError::Configuration(
                "Object store bucket cannot be empty".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(StoreError::Configuration(
                "Object store request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
