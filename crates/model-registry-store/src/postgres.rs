//! PostgreSQL implementations of the metadata repositories
//!
//! Model rows live in the `models` table and auth tokens in `tokens`.
//! Queries are runtime-bound; the ordering clauses here carry the
//! resolution semantics the services rely on.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};

use model_registry_core::{BlobKey, ModelRecord, NewModelRecord};

use crate::error::StoreResult;
use crate::repository::{ModelRepository, TokenRepository};

/// PostgreSQL implementation of [`ModelRepository`]
#[derive(Debug, Clone)]
pub struct PostgresModelRepository {
    pool: PgPool,
}

impl PostgresModelRepository {
    /// Create a new repository over an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ModelRepository for PostgresModelRepository {
    #[instrument(
        skip(self, record),
        fields(author = %record.author, name = %record.name, version = %record.version)
    )]
    async fn insert(&self, record: NewModelRecord) -> StoreResult<ModelRecord> {
        debug!("Inserting model record");

        let row = sqlx::query(
            r#"
            INSERT INTO models (author, name, version, description, blob_key)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&record.author)
        .bind(&record.name)
        .bind(&record.version)
        .bind(&record.description)
        .bind(record.blob_key.as_str())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id")?;
        debug!(id, "Model record inserted");

        Ok(record.into_record(id))
    }

    #[instrument(skip(self))]
    async fn find_exact(
        &self,
        author: &str,
        name: &str,
        version: &str,
    ) -> StoreResult<Option<ModelRecord>> {
        debug!("Finding model by exact coordinates");

        // Lowest id wins when duplicate rows share the coordinates.
        let row = sqlx::query(
            r#"
            SELECT id, author, name, version, description, blob_key
            FROM models
            WHERE author = $1 AND name = $2 AND version = $3
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(author)
        .bind(name)
        .bind(version)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_record).transpose()
    }

    #[instrument(skip(self))]
    async fn find_latest(&self, author: &str, name: &str) -> StoreResult<Option<ModelRecord>> {
        debug!("Finding latest model version");

        // COLLATE "C" pins byte-wise string ordering regardless of the
        // database locale: "2.0" outranks "10.0".
        let row = sqlx::query(
            r#"
            SELECT id, author, name, version, description, blob_key
            FROM models
            WHERE author = $1 AND name = $2
            ORDER BY version COLLATE "C" DESC, id ASC
            LIMIT 1
            "#,
        )
        .bind(author)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_record).transpose()
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// PostgreSQL implementation of [`TokenRepository`]
#[derive(Debug, Clone)]
pub struct PostgresTokenRepository {
    pool: PgPool,
}

impl PostgresTokenRepository {
    /// Create a new repository over an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
    // skip(token): credential values must never reach logs
    #[instrument(skip(self, token))]
    async fn token_exists(&self, token: &str) -> StoreResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM tokens WHERE token = $1) AS present")
            .bind(token)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("present")?)
    }
}

/// Convert a database row into a [`ModelRecord`]
fn row_to_record(row: PgRow) -> StoreResult<ModelRecord> {
    let id: i64 = row.try_get("id")?;
    let author: String = row.try_get("author")?;
    let name: String = row.try_get("name")?;
    let version: String = row.try_get("version")?;
    let description: String = row.try_get("description")?;
    let blob_key: String = row.try_get("blob_key")?;

    Ok(ModelRecord {
        id,
        author,
        name,
        version,
        description,
        blob_key: BlobKey::from_string(blob_key),
    })
}
