//! Test fixtures
//!
//! Descriptor payloads for integration tests.

use serde_json::{json, Value};

/// A complete descriptor for alice/classifier at the given version
pub fn model_payload(version: &str) -> Value {
    payload_for("alice", "classifier", version)
}

/// A complete descriptor for arbitrary coordinates
pub fn payload_for(author: &str, name: &str, version: &str) -> Value {
    json!({
        "author": author,
        "name": name,
        "version": version,
        "description": format!("Test model {}/{} at {}", author, name, version),
    })
}

/// A complete descriptor carrying fields beyond the required four
pub fn payload_with_extras(version: &str) -> Value {
    json!({
        "author": "alice",
        "name": "classifier",
        "version": version,
        "description": "An image classifier",
        "framework": "pytorch",
        "parameters": 7_000_000,
        "tags": ["vision", "resnet"],
    })
}

/// A descriptor missing the version and description fields
pub fn incomplete_payload() -> Value {
    json!({
        "author": "alice",
        "name": "classifier",
    })
}
