//! Model publishing service
//!
//! Orchestrates descriptor validation, blob key generation, the object
//! store write, and the metadata insert. The write order is blob first,
//! then metadata: a failed blob write leaves nothing behind, while a
//! failed insert after a successful write orphans the blob. The orphan
//! direction is a documented gap with no automatic cleanup.

use async_trait::async_trait;
use model_registry_core::{BlobKey, ModelDescriptor, ModelRecord, NewModelRecord};
use model_registry_store::{ModelRepository, ObjectStore};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{ServiceError, ServiceResult};

/// Trait for model publishing operations
#[async_trait]
pub trait PublishService: Send + Sync {
    /// Validate and persist a descriptor, returning the created record
    async fn publish(&self, descriptor: ModelDescriptor) -> ServiceResult<ModelRecord>;
}

/// Default implementation of PublishService
pub struct DefaultPublishService {
    models: Arc<dyn ModelRepository>,
    blobs: Arc<dyn ObjectStore>,
}

impl DefaultPublishService {
    /// Create a new publish service
    pub fn new(models: Arc<dyn ModelRepository>, blobs: Arc<dyn ObjectStore>) -> Self {
        Self { models, blobs }
    }
}

#[async_trait]
impl PublishService for DefaultPublishService {
    #[instrument(skip(self, descriptor))]
    async fn publish(&self, descriptor: ModelDescriptor) -> ServiceResult<ModelRecord> {
        // Validation happens before any store call; a rejected descriptor
        // must leave no trace in either backend.
        let fields = descriptor.required_fields()?;

        let new_record = NewModelRecord {
            author: fields.author.to_string(),
            name: fields.name.to_string(),
            version: fields.version.to_string(),
            description: fields.description.to_string(),
            blob_key: BlobKey::generate(),
        };

        // The whole descriptor is serialized, extra fields included.
        let document = descriptor.to_yaml()?;

        self.blobs
            .put(new_record.blob_key.as_str(), document.into_bytes())
            .await?;

        let blob_key = new_record.blob_key.clone();
        let record = self.models.insert(new_record).await.map_err(|e| {
            // The blob write already succeeded, so this key is now
            // unreferenced and will not be cleaned up.
            warn!(
                blob_key = %blob_key,
                error = %e,
                "Metadata insert failed after blob write; blob is orphaned"
            );
            ServiceError::from(e)
        })?;

        info!(model = %record.coordinates(), id = record.id, "Model published");

        Ok(record)
    }
}
