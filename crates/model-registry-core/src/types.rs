//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Suffix appended to generated blob keys to mark them as YAML resources
const YAML_SUFFIX: &str = ".yaml";

/// Opaque key addressing a serialized descriptor in the object store.
///
/// Keys are generated fresh per publish and never reused; they carry no
/// information about the model they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobKey(String);

impl BlobKey {
    /// Generate a fresh random key of the form `{uuid-v4}.yaml`
    pub fn generate() -> Self {
        Self(format!("{}{}", Uuid::new_v4(), YAML_SUFFIX))
    }

    /// Wrap an existing key, e.g. one read back from the metadata store
    pub fn from_string(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the underlying string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BlobKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_key_generation_is_unique() {
        let key1 = BlobKey::generate();
        let key2 = BlobKey::generate();
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_blob_key_carries_yaml_suffix() {
        let key = BlobKey::generate();
        assert!(key.as_str().ends_with(".yaml"));
        // uuid (36 chars) + ".yaml"
        assert_eq!(key.as_str().len(), 41);
    }

    #[test]
    fn test_blob_key_serializes_transparently() {
        let key = BlobKey::from_string("abc.yaml");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"abc.yaml\"");

        let parsed: BlobKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);
    }
}
