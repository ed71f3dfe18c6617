//! Core domain types for the model registry
//!
//! This crate contains the data structures shared by every layer of the
//! registry: the descriptor submitted on publish, the metadata record that
//! references a stored blob, and the opaque key addressing that blob in the
//! object store.

pub mod descriptor;
pub mod error;
pub mod record;
pub mod types;

// Re-exports for convenience
pub use descriptor::{ModelDescriptor, RequiredFields};
pub use error::{RegistryError, Result};
pub use record::{ModelRecord, NewModelRecord};
pub use types::BlobKey;
