//! Link repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite};
use uuid::Uuid;

use lectern_core::{new_v7, Error, LinkRepository, Result};

/// SQLite implementation of LinkRepository.
///
/// Links are directed: (A, B) and (B, A) are distinct rows. Neither
/// endpoint is checked for existence.
#[derive(Clone)]
pub struct SqliteLinkRepository {
    pool: Pool<Sqlite>,
}

impl SqliteLinkRepository {
    /// Create a new SqliteLinkRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn create(&self, document_id: Uuid, linked_document_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO document_link (id, document_id, linked_document_id) VALUES (?, ?, ?)
             ON CONFLICT (document_id, linked_document_id) DO NOTHING",
        )
        .bind(new_v7())
        .bind(document_id)
        .bind(linked_document_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_linked(&self, document_id: Uuid) -> Result<Vec<Uuid>> {
        let rows = sqlx::query(
            "SELECT linked_document_id FROM document_link WHERE document_id = ? ORDER BY id",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(rows.into_iter().map(|row| row.get(0)).collect())
    }

    async fn delete_for_document(&self, document_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM document_link WHERE document_id = ? OR linked_document_id = ?")
            .bind(document_id)
            .bind(document_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}
