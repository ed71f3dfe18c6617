//! Model descriptor submitted on publish
//!
//! The descriptor is the raw JSON object a client posts. Four fields are
//! required; anything else the client sends rides along untouched and ends
//! up in the stored YAML blob.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RegistryError, Result};

/// Names of the fields every descriptor must carry
pub const REQUIRED_FIELDS: [&str; 4] = ["author", "name", "version", "description"];

/// The four mandatory descriptor fields, borrowed from a validated descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredFields<'a> {
    /// Publishing author
    pub author: &'a str,
    /// Model name
    pub name: &'a str,
    /// Version string
    pub version: &'a str,
    /// Free-text description
    pub description: &'a str,
}

/// The JSON payload submitted on publish.
///
/// Wraps the full object as received, so serializing to YAML keeps every
/// field the client sent rather than just the required four.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelDescriptor {
    fields: Map<String, Value>,
}

impl ModelDescriptor {
    /// Wrap a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(RegistryError::ValidationError(format!(
                "Model descriptor must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Build a descriptor carrying only the four required fields
    pub fn from_parts(
        author: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut fields = Map::new();
        fields.insert("author".to_string(), Value::String(author.into()));
        fields.insert("name".to_string(), Value::String(name.into()));
        fields.insert("version".to_string(), Value::String(version.into()));
        fields.insert("description".to_string(), Value::String(description.into()));
        Self { fields }
    }

    /// Add or replace a field, keeping the rest intact
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// The `author` field, if present as a non-empty string
    pub fn author(&self) -> Option<&str> {
        self.str_field("author")
    }

    /// The `name` field, if present as a non-empty string
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// The `version` field, if present as a non-empty string
    pub fn version(&self) -> Option<&str> {
        self.str_field("version")
    }

    /// The `description` field, if present as a non-empty string
    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    /// Look up an arbitrary field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Number of fields in the descriptor
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the descriptor carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Extract the required fields, checking in one step that each is
    /// present, string-typed, and non-empty. The error names every field
    /// that fails.
    pub fn required_fields(&self) -> Result<RequiredFields<'_>> {
        match (
            self.author(),
            self.name(),
            self.version(),
            self.description(),
        ) {
            (Some(author), Some(name), Some(version), Some(description)) => Ok(RequiredFields {
                author,
                name,
                version,
                description,
            }),
            _ => {
                let missing: Vec<&str> = REQUIRED_FIELDS
                    .iter()
                    .copied()
                    .filter(|field| self.str_field(field).is_none())
                    .collect();
                Err(RegistryError::ValidationError(format!(
                    "Missing required fields in model data: {}",
                    missing.join(", ")
                )))
            }
        }
    }

    /// Check the required fields without borrowing them
    pub fn validate(&self) -> Result<()> {
        self.required_fields().map(|_| ())
    }

    /// Serialize the full descriptor to one YAML document
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.fields)
            .map_err(|e| RegistryError::SerializationError(e.to_string()))
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_accepts_object() {
        let descriptor = ModelDescriptor::from_value(json!({
            "author": "alice",
            "name": "classifier",
            "version": "1.0",
            "description": "A test model",
        }))
        .unwrap();
        assert_eq!(descriptor.author(), Some("alice"));
        assert_eq!(descriptor.len(), 4);
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = ModelDescriptor::from_value(json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, RegistryError::ValidationError(_)));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_validate_passes_with_all_required_fields() {
        let descriptor = ModelDescriptor::from_parts("alice", "classifier", "1.0", "desc");
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn test_required_fields_borrows_each_field() {
        let descriptor = ModelDescriptor::from_parts("alice", "classifier", "1.0", "desc");
        let fields = descriptor.required_fields().unwrap();
        assert_eq!(fields.author, "alice");
        assert_eq!(fields.name, "classifier");
        assert_eq!(fields.version, "1.0");
        assert_eq!(fields.description, "desc");
    }

    #[test]
    fn test_required_fields_names_every_missing_field() {
        let descriptor = ModelDescriptor::from_value(json!({
            "name": "classifier",
        }))
        .unwrap();
        let err = descriptor.required_fields().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("author"));
        assert!(message.contains("version"));
        assert!(message.contains("description"));
        assert!(!message.contains("name"));
    }

    #[test]
    fn test_validate_rejects_missing_field() {
        let descriptor = ModelDescriptor::from_value(json!({
            "author": "alice",
            "name": "classifier",
            "version": "1.0",
        }))
        .unwrap();
        let err = descriptor.validate().unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn test_validate_rejects_empty_field() {
        let descriptor = ModelDescriptor::from_parts("", "classifier", "1.0", "desc");
        let err = descriptor.validate().unwrap_err();
        assert!(err.to_string().contains("author"));
    }

    #[test]
    fn test_validate_rejects_non_string_field() {
        let descriptor = ModelDescriptor::from_value(json!({
            "author": "alice",
            "name": "classifier",
            "version": 1.0,
            "description": "desc",
        }))
        .unwrap();
        let err = descriptor.validate().unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_to_yaml_keeps_extra_fields() {
        let descriptor = ModelDescriptor::from_parts("alice", "classifier", "1.0", "desc")
            .with_field("framework", json!("pytorch"))
            .with_field("parameters", json!(7_000_000));

        let yaml = descriptor.to_yaml().unwrap();
        let decoded: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(decoded["author"], serde_yaml::Value::from("alice"));
        assert_eq!(decoded["framework"], serde_yaml::Value::from("pytorch"));
        assert_eq!(decoded["parameters"], serde_yaml::Value::from(7_000_000));
    }

    #[test]
    fn test_deserializes_from_json_object() {
        let descriptor: ModelDescriptor = serde_json::from_str(
            r#"{"author":"alice","name":"classifier","version":"1.0","description":"d"}"#,
        )
        .unwrap();
        assert_eq!(descriptor.name(), Some("classifier"));
    }
}
