//! Server configuration
//!
//! This module handles hierarchical configuration loading from multiple sources:
//! - Default configuration file
//! - Environment-specific configuration file
//! - Environment variables
//! - Command-line arguments

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server settings
    pub server: HttpServerConfig,

    /// Database settings
    pub database: DatabaseConfig,

    /// Object store settings
    #[serde(default)]
    pub object_store: ObjectStoreSettings,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Enable graceful shutdown
    #[serde(default = "default_true")]
    pub graceful_shutdown: bool,

    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_shutdown_timeout() -> u64 {
    30
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            graceful_shutdown: default_true(),
            shutdown_timeout_seconds: default_shutdown_timeout(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connect_timeout_seconds: u64,

    /// Idle timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,

    /// Maximum lifetime of a connection in seconds
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_seconds: u64,

    /// Run migrations on startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_max_lifetime() -> u64 {
    1800
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/model_registry".to_string(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connection_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
            max_lifetime_seconds: default_max_lifetime(),
            run_migrations: default_true(),
        }
    }
}

/// Object store configuration
///
/// Defaults target a local MinIO instance; production deployments override
/// the endpoint and credentials through config files or environment
/// variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStoreSettings {
    /// Endpoint URL of the S3-compatible store
    #[serde(default = "default_object_store_endpoint")]
    pub endpoint: String,

    /// Access key id
    #[serde(default = "default_object_store_access_key")]
    pub access_key: String,

    /// Secret access key
    #[serde(default = "default_object_store_secret_key")]
    pub secret_key: String,

    /// Bucket holding descriptor blobs
    #[serde(default = "default_object_store_bucket")]
    pub bucket: String,

    /// Signing region
    #[serde(default = "default_object_store_region")]
    pub region: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_object_store_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_object_store_endpoint() -> String {
    "http://localhost:9000".to_string()
}

fn default_object_store_access_key() -> String {
    "minio_access_key".to_string()
}

fn default_object_store_secret_key() -> String {
    "minio_secret_key".to_string()
}

fn default_object_store_bucket() -> String {
    "models".to_string()
}

fn default_object_store_region() -> String {
    "us-east-1".to_string()
}

fn default_object_store_timeout() -> u64 {
    30
}

impl Default for ObjectStoreSettings {
    fn default() -> Self {
        Self {
            endpoint: default_object_store_endpoint(),
            access_key: default_object_store_access_key(),
            secret_key: default_object_store_secret_key(),
            bucket: default_object_store_bucket(),
            region: default_object_store_region(),
            request_timeout_seconds: default_object_store_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON formatting
    #[serde(default)]
    pub json_format: bool,

    /// Include timestamps
    #[serde(default = "default_true")]
    pub include_timestamps: bool,

    /// Include thread IDs
    #[serde(default)]
    pub include_thread_ids: bool,

    /// Include target module
    #[serde(default = "default_true")]
    pub include_target: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            include_timestamps: true,
            include_thread_ids: false,
            include_target: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from files and environment
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default configuration file (config/default.toml)
    /// 2. Environment-specific file (config/{env}.toml)
    /// 3. Environment variables (MODEL_REGISTRY_*)
    ///
    /// # Arguments
    ///
    /// * `config_dir` - Directory containing configuration files
    /// * `environment` - Environment name (development, production, etc.)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed
    pub fn load(config_dir: impl Into<PathBuf>, environment: &str) -> Result<Self, ConfigError> {
        let config_dir = config_dir.into();

        let config = Config::builder()
            // Start with default config
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add environment-specific config
            .add_source(File::from(config_dir.join(format!("{}.toml", environment))).required(false))
            // Add environment variables with prefix MODEL_REGISTRY
            // e.g., MODEL_REGISTRY_SERVER__PORT=8080
            .add_source(
                Environment::with_prefix("MODEL_REGISTRY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration with defaults if files don't exist
    pub fn load_or_default(config_dir: impl Into<PathBuf>, environment: &str) -> Self {
        Self::load(config_dir, environment).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load configuration: {}", e);
            eprintln!("Using default configuration");
            Self::default()
        })
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            database: DatabaseConfig::default(),
            object_store: ObjectStoreSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}
