//! Note repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Row, Sqlite};
use uuid::Uuid;

use lectern_core::{new_v7, Error, NoteItem, NoteRepository, Result};

/// SQLite implementation of NoteRepository.
#[derive(Clone)]
pub struct SqliteNoteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteNoteRepository {
    /// Create a new SqliteNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for SqliteNoteRepository {
    async fn add(&self, document_id: Uuid, body: &str) -> Result<Uuid> {
        if body.is_empty() {
            return Err(Error::InvalidInput("Note text required".to_string()));
        }

        let id = new_v7();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO note (id, document_id, body, created_at_utc) VALUES (?, ?, ?, ?)",
        )
        .bind(id)
        .bind(document_id)
        .bind(body)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(id)
    }

    async fn get_for_document(&self, document_id: Uuid) -> Result<Vec<NoteItem>> {
        let rows = sqlx::query(
            "SELECT id, body, created_at_utc FROM note
             WHERE document_id = ?
             ORDER BY created_at_utc DESC, id DESC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|row| NoteItem {
                id: row.get("id"),
                body: row.get("body"),
                created_at_utc: row.get("created_at_utc"),
            })
            .collect())
    }
}
