//! Service layer for the model registry
//!
//! This crate sits between the HTTP surface and the stores. It implements
//! descriptor validation, the blob-then-metadata publish ordering, version
//! resolution, and token verification.
//!
//! # Architecture
//!
//! - **PublishService**: validates a descriptor, writes the blob, inserts
//!   the metadata row
//! - **ResolveService**: exact and latest-version lookups plus blob fetch
//! - **TokenService**: credential verification against the token table
//!
//! # Example
//!
//! ```rust,no_run
//! use model_registry_service::ServiceRegistry;
//! use model_registry_store::{
//!     InMemoryModelRepository, InMemoryObjectStore, InMemoryTokenRepository,
//! };
//! use std::sync::Arc;
//!
//! let services = ServiceRegistry::new(
//!     Arc::new(InMemoryModelRepository::new()),
//!     Arc::new(InMemoryTokenRepository::new()),
//!     Arc::new(InMemoryObjectStore::new()),
//! );
//! ```

pub mod dto;
pub mod error;
pub mod publish;
pub mod resolve;
pub mod token;

// Re-export main types for convenience
pub use dto::{BackendHealth, ResolvedModel};
pub use error::{ServiceError, ServiceResult};

// Re-export service traits and implementations
pub use publish::{DefaultPublishService, PublishService};
pub use resolve::{DefaultResolveService, ResolveService};
pub use token::{DefaultTokenService, TokenService};

use model_registry_store::{ModelRepository, ObjectStore, TokenRepository};
use std::sync::Arc;

/// Service registry that holds all service instances
///
/// Constructed once at startup from the store handles and injected into
/// the HTTP layer; there is no ambient global state.
#[derive(Clone)]
pub struct ServiceRegistry {
    /// Publish service
    pub publisher: Arc<dyn PublishService>,
    /// Resolve service
    pub resolver: Arc<dyn ResolveService>,
    /// Token verification service
    pub tokens: Arc<dyn TokenService>,
    models: Arc<dyn ModelRepository>,
    blobs: Arc<dyn ObjectStore>,
}

impl ServiceRegistry {
    /// Create a new service registry with default implementations
    ///
    /// # Arguments
    ///
    /// * `models` - Model metadata repository
    /// * `tokens` - Auth token repository
    /// * `blobs` - Object store holding descriptor blobs
    pub fn new(
        models: Arc<dyn ModelRepository>,
        tokens: Arc<dyn TokenRepository>,
        blobs: Arc<dyn ObjectStore>,
    ) -> Self {
        let publisher = Arc::new(DefaultPublishService::new(models.clone(), blobs.clone()));
        let resolver = Arc::new(DefaultResolveService::new(models.clone(), blobs.clone()));
        let verifier = Arc::new(DefaultTokenService::new(tokens));

        Self {
            publisher,
            resolver,
            tokens: verifier,
            models,
            blobs,
        }
    }

    /// Get the publish service
    pub fn publisher(&self) -> &Arc<dyn PublishService> {
        &self.publisher
    }

    /// Get the resolve service
    pub fn resolver(&self) -> &Arc<dyn ResolveService> {
        &self.resolver
    }

    /// Get the token verification service
    pub fn tokens(&self) -> &Arc<dyn TokenService> {
        &self.tokens
    }

    /// Probe both backing stores for health reporting
    pub async fn backend_health(&self) -> BackendHealth {
        let metadata = self.models.health_check().await.map_err(|e| e.to_string());
        let object_store = self.blobs.health_check().await.map_err(|e| e.to_string());

        BackendHealth {
            metadata,
            object_store,
        }
    }
}
