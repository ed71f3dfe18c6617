//! Service-layer data transfer objects

use model_registry_core::ModelRecord;

/// A fully resolved model: the metadata row plus the blob it references
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    /// The metadata row the lookup matched
    pub record: ModelRecord,
    /// The raw YAML document fetched from the object store
    pub bytes: Vec<u8>,
}

/// Outcome of probing both backing stores
#[derive(Debug, Clone)]
pub struct BackendHealth {
    /// Metadata store probe result; `Err` carries the failure message
    pub metadata: Result<(), String>,
    /// Object store probe result; `Err` carries the failure message
    pub object_store: Result<(), String>,
}

impl BackendHealth {
    /// True when both backends answered their probes
    pub fn is_healthy(&self) -> bool {
        self.metadata.is_ok() && self.object_store.is_ok()
    }
}
