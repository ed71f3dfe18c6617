//! Model record types
//!
//! A [`ModelRecord`] is one row in the metadata store: a published model
//! version pointing at its serialized descriptor in the object store.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::BlobKey;

/// A published model version as recorded in the metadata store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Surrogate identifier assigned by the metadata store on insert
    pub id: i64,

    /// Publishing author
    pub author: String,

    /// Model name
    pub name: String,

    /// Version string; ordered lexicographically, not semantically
    pub version: String,

    /// Free-text description
    pub description: String,

    /// Object-store key of the serialized descriptor
    pub blob_key: BlobKey,
}

impl ModelRecord {
    /// Coordinates in `author/name/version` form, used in lookups and logs
    pub fn coordinates(&self) -> String {
        format!("{}/{}/{}", self.author, self.name, self.version)
    }
}

impl fmt::Display for ModelRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelRecord({}, {})", self.id, self.coordinates())
    }
}

/// A model row that has not been inserted yet; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewModelRecord {
    /// Publishing author
    pub author: String,

    /// Model name
    pub name: String,

    /// Version string
    pub version: String,

    /// Free-text description
    pub description: String,

    /// Object-store key the blob was written under
    pub blob_key: BlobKey,
}

impl NewModelRecord {
    /// Attach the store-assigned id, producing the persisted record
    pub fn into_record(self, id: i64) -> ModelRecord {
        ModelRecord {
            id,
            author: self.author,
            name: self.name,
            version: self.version,
            description: self.description,
            blob_key: self.blob_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> NewModelRecord {
        NewModelRecord {
            author: "alice".to_string(),
            name: "classifier".to_string(),
            version: "1.0".to_string(),
            description: "A test model".to_string(),
            blob_key: BlobKey::from_string("abc.yaml"),
        }
    }

    #[test]
    fn test_into_record_preserves_fields() {
        let record = sample_row().into_record(7);
        assert_eq!(record.id, 7);
        assert_eq!(record.author, "alice");
        assert_eq!(record.name, "classifier");
        assert_eq!(record.version, "1.0");
        assert_eq!(record.description, "A test model");
        assert_eq!(record.blob_key.as_str(), "abc.yaml");
    }

    #[test]
    fn test_coordinates_format() {
        let record = sample_row().into_record(1);
        assert_eq!(record.coordinates(), "alice/classifier/1.0");
    }
}
