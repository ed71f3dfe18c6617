//! Service-layer error types
//!
//! This module defines error types specific to the service layer,
//! mapping domain and store errors to the kinds the HTTP boundary
//! translates into status codes.

use model_registry_core::RegistryError;
use model_registry_store::StoreError;
use thiserror::Error;

/// Result type alias for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Service-layer error types
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No model record matched the requested coordinates
    #[error("Model not found: {0}")]
    NotFound(String),

    /// Descriptor validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Object store unreachable or returning failures
    #[error("Object store unavailable: {0}")]
    StorageUnavailable(String),

    /// A metadata row references a blob key the object store does not hold
    #[error("Dangling blob reference for {coordinates}: missing key {blob_key}")]
    DanglingReference {
        coordinates: String,
        blob_key: String,
    },

    /// Metadata store failure
    #[error("Metadata store error: {0}")]
    Metadata(String),

    /// Internal service error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RegistryError> for ServiceError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::ModelNotFound(msg) => ServiceError::NotFound(msg),
            RegistryError::ValidationError(msg) => ServiceError::ValidationFailed(msg),
            RegistryError::StorageError(msg) => ServiceError::StorageUnavailable(msg),
            RegistryError::SerializationError(msg) => ServiceError::Internal(msg),
            RegistryError::ConfigurationError(msg) => ServiceError::Internal(msg),
            RegistryError::InternalError(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ObjectStoreUnavailable(msg) => ServiceError::StorageUnavailable(msg),
            // Without the record that referenced the key, a missing object is
            // indistinguishable from any other storage failure. The resolver
            // intercepts this variant itself to raise DanglingReference.
            StoreError::ObjectMissing(key) => {
                ServiceError::StorageUnavailable(format!("object missing: {}", key))
            }
            StoreError::Connection(msg)
            | StoreError::Pool(msg)
            | StoreError::Query(msg)
            | StoreError::Migration(msg)
            | StoreError::ConstraintViolation(msg)
            | StoreError::InvalidData(msg) => ServiceError::Metadata(msg),
            StoreError::Configuration(msg) => ServiceError::Internal(msg),
            StoreError::Internal(msg) => ServiceError::Internal(msg),
        }
    }
}
