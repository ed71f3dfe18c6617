//! Storage layer for the model registry
//!
//! Two independently-failing backends live behind traits here:
//! - the relational metadata store (PostgreSQL) holding model rows and auth
//!   tokens, and
//! - the object store (any S3-compatible endpoint) holding the serialized
//!   descriptor blobs.
//!
//! In-memory implementations of all three traits back tests and local
//! development.
//!
//! # Example
//!
//! ```rust,no_run
//! use model_registry_store::{create_pool, PoolConfig, PostgresModelRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PoolConfig::new("postgres://localhost/model_registry").max_connections(10);
//! let pool = create_pool(&config).await?;
//! let models = PostgresModelRepository::new(pool);
//! # Ok(())
//! # }
//! ```

// Re-export core domain types for convenience
pub use model_registry_core;

// Public modules
pub mod error;
pub mod memory;
pub mod object;
pub mod pool;
pub mod postgres;
pub mod repository;
pub mod s3;

// Re-exports for convenience
pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryModelRepository, InMemoryObjectStore, InMemoryTokenRepository};
pub use object::{ObjectStore, ObjectStoreConfig};
pub use pool::{create_pool, run_migrations, verify_pool_health, PoolConfig};
pub use postgres::{PostgresModelRepository, PostgresTokenRepository};
pub use repository::{ModelRepository, TokenRepository};
pub use s3::S3ObjectStore;
