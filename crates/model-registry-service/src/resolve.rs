//! Model resolution service
//!
//! Looks up a metadata row by exact coordinates or by latest version, then
//! fetches the referenced blob. "Latest" is the lexicographically greatest
//! version string, not the semantic-version maximum: "2.0" outranks "10.0".
//! That ordering matches what existing clients observe and is asserted by
//! tests as the documented behavior.

use async_trait::async_trait;
use model_registry_core::ModelRecord;
use model_registry_store::{ModelRepository, ObjectStore, StoreError};
use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::dto::ResolvedModel;
use crate::error::{ServiceError, ServiceResult};

/// Trait for model resolution operations
#[async_trait]
pub trait ResolveService: Send + Sync {
    /// Resolve a model by exact `(author, name, version)` coordinates
    async fn resolve_exact(
        &self,
        author: &str,
        name: &str,
        version: &str,
    ) -> ServiceResult<ResolvedModel>;

    /// Resolve the latest published version for `(author, name)`
    async fn resolve_latest(&self, author: &str, name: &str) -> ServiceResult<ResolvedModel>;
}

/// Default implementation of ResolveService
pub struct DefaultResolveService {
    models: Arc<dyn ModelRepository>,
    blobs: Arc<dyn ObjectStore>,
}

impl DefaultResolveService {
    /// Create a new resolve service
    pub fn new(models: Arc<dyn ModelRepository>, blobs: Arc<dyn ObjectStore>) -> Self {
        Self { models, blobs }
    }

    /// Fetch the blob a record references.
    ///
    /// A missing key here is not a plain storage failure: the metadata row
    /// exists, so the stores disagree. That case is logged as a dangling
    /// reference so an operator can find the record.
    async fn fetch_blob(&self, record: ModelRecord) -> ServiceResult<ResolvedModel> {
        match self.blobs.get(record.blob_key.as_str()).await {
            Ok(bytes) => Ok(ResolvedModel { record, bytes }),
            Err(StoreError::ObjectMissing(key)) => {
                error!(
                    id = record.id,
                    model = %record.coordinates(),
                    blob_key = %key,
                    "Dangling blob reference: metadata row exists but the object store has no such key"
                );
                Err(ServiceError::DanglingReference {
                    coordinates: record.coordinates(),
                    blob_key: key,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ResolveService for DefaultResolveService {
    #[instrument(skip(self))]
    async fn resolve_exact(
        &self,
        author: &str,
        name: &str,
        version: &str,
    ) -> ServiceResult<ResolvedModel> {
        debug!("Resolving exact model version");

        let record = self
            .models
            .find_exact(author, name, version)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("{}/{}/{}", author, name, version))
            })?;

        self.fetch_blob(record).await
    }

    #[instrument(skip(self))]
    async fn resolve_latest(&self, author: &str, name: &str) -> ServiceResult<ResolvedModel> {
        debug!("Resolving latest model version");

        let record = self
            .models
            .find_latest(author, name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("{}/{}", author, name)))?;

        self.fetch_blob(record).await
    }
}
