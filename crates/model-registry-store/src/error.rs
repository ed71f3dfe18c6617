//! Store-specific error types and conversions
//!
//! One error type covers both backends this crate talks to: the relational
//! metadata store and the object store. The object-store variants keep
//! "key absent" and "store unreachable" distinguishable, which the resolver
//! depends on to separate dangling references from outages.

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the metadata and object store backends
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(String),

    /// SQL query error
    #[error("Query error: {0}")]
    Query(String),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Invalid row data
    #[error("Invalid data format: {0}")]
    InvalidData(String),

    /// Object store unreachable or returning unexpected responses
    #[error("Object store unavailable: {0}")]
    ObjectStoreUnavailable(String),

    /// No object stored under the requested key
    #[error("Object not found in store: {0}")]
    ObjectMissing(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal store error
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Check if this error means the requested object key does not exist
    pub fn is_object_missing(&self) -> bool {
        matches!(self, StoreError::ObjectMissing(_))
    }

    /// Check if this is a transient error that could be retried
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Connection(_) | StoreError::Pool(_) | StoreError::ObjectStoreUnavailable(_)
        )
    }
}

/// Convert SQLx database errors to our error type
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::Query("Query returned no rows".to_string()),

            sqlx::Error::Database(db_err) => {
                let code = db_err.code();
                let message = db_err.message();

                // PostgreSQL error codes: https://www.postgresql.org/docs/current/errcodes-appendix.html
                match code.as_deref() {
                    // Integrity constraint violations (class 23)
                    Some(code) if code.starts_with("23") => {
                        StoreError::ConstraintViolation(message.to_string())
                    }
                    _ => StoreError::Query(message.to_string()),
                }
            }

            sqlx::Error::PoolTimedOut => StoreError::Pool("Connection pool timeout".to_string()),

            sqlx::Error::PoolClosed => StoreError::Pool("Connection pool closed".to_string()),

            sqlx::Error::Io(io_err) => StoreError::Connection(format!("I/O error: {}", io_err)),

            sqlx::Error::Tls(tls_err) => StoreError::Connection(format!("TLS error: {}", tls_err)),

            sqlx::Error::Protocol(msg) => {
                StoreError::Connection(format!("Protocol error: {}", msg))
            }

            sqlx::Error::ColumnNotFound(col) => {
                StoreError::InvalidData(format!("Column not found: {}", col))
            }

            sqlx::Error::ColumnDecode { index, source } => {
                StoreError::InvalidData(format!("Failed to decode column {}: {}", index, source))
            }

            sqlx::Error::Decode(msg) => StoreError::InvalidData(format!("Decode error: {}", msg)),

            sqlx::Error::Migrate(migrate_err) => StoreError::Migration(format!("{}", migrate_err)),

            _ => StoreError::Internal(format!("{}", err)),
        }
    }
}

/// Convert SQLx migration errors
impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Migration(format!("{}", err))
    }
}

/// Convert URL parse errors from endpoint configuration
impl From<url::ParseError> for StoreError {
    fn from(err: url::ParseError) -> Self {
        StoreError::Configuration(format!("Invalid URL: {}", err))
    }
}

/// Convert HTTP client errors from object store requests
impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::ObjectStoreUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let missing = StoreError::ObjectMissing("abc.yaml".to_string());
        assert!(missing.is_object_missing());
        assert!(!missing.is_transient());

        let unreachable = StoreError::ObjectStoreUnavailable("connection refused".to_string());
        assert!(unreachable.is_transient());
        assert!(!unreachable.is_object_missing());

        let connection = StoreError::Connection("test".to_string());
        assert!(connection.is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::ObjectMissing("abc.yaml".to_string());
        assert_eq!(err.to_string(), "Object not found in store: abc.yaml");

        let err = StoreError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "Query error: syntax error");
    }

    #[test]
    fn test_row_not_found_maps_to_query_error() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Query(_)));
    }
}
