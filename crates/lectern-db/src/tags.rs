//! Tag repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite};
use uuid::Uuid;

use lectern_core::{new_v7, Error, Result, TagRepository};

/// SQLite implementation of TagRepository.
#[derive(Clone)]
pub struct SqliteTagRepository {
    pool: Pool<Sqlite>,
}

impl SqliteTagRepository {
    /// Create a new SqliteTagRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for SqliteTagRepository {
    async fn add(&self, document_id: Uuid, tag: &str) -> Result<bool> {
        if tag.is_empty() {
            return Err(Error::InvalidInput("Tag required".to_string()));
        }

        // Deduplicated per document: the unique (document_id, tag) index
        // turns repeats into no-ops.
        let result = sqlx::query(
            "INSERT INTO tag (id, document_id, tag) VALUES (?, ?, ?)
             ON CONFLICT (document_id, tag) DO NOTHING",
        )
        .bind(new_v7())
        .bind(document_id)
        .bind(tag)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_for_document(&self, document_id: Uuid) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT tag FROM tag WHERE document_id = ? ORDER BY tag")
            .bind(document_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(rows.into_iter().map(|row| row.get("tag")).collect())
    }

    async fn list_all(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT DISTINCT tag FROM tag ORDER BY tag")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(rows.into_iter().map(|row| row.get("tag")).collect())
    }
}
