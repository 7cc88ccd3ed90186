//! Substring and tag search over document summaries.

use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use lectern_core::{DocumentSummary, Error, Result, SearchRepository};

use crate::documents::{attach_children, row_to_summary, SUMMARY_COLUMNS};
use crate::escape_like;

/// SQLite implementation of SearchRepository.
#[derive(Clone)]
pub struct SqliteSearch {
    pool: Pool<Sqlite>,
}

impl SqliteSearch {
    /// Create a new SqliteSearch with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SearchRepository for SqliteSearch {
    async fn search(
        &self,
        query: Option<&str>,
        tag: Option<&str>,
    ) -> Result<Vec<DocumentSummary>> {
        let tag = tag.filter(|t| !t.is_empty());
        let query = query.filter(|q| !q.is_empty());

        let rows = if let Some(tag) = tag {
            // Tag filter wins: exact match on the tag string.
            sqlx::query(&format!(
                "SELECT DISTINCT {SUMMARY_COLUMNS} FROM document d
                 JOIN tag t ON d.id = t.document_id
                 WHERE t.tag = ?
                 ORDER BY d.uploaded_at_utc DESC, d.id DESC"
            ))
            .bind(tag)
            .fetch_all(&self.pool)
            .await
        } else if let Some(query) = query {
            let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
            sqlx::query(&format!(
                "SELECT DISTINCT {SUMMARY_COLUMNS} FROM document d
                 LEFT JOIN keyword k ON d.id = k.document_id
                 LEFT JOIN tag t ON d.id = t.document_id
                 WHERE LOWER(d.title) LIKE ? ESCAPE '\\'
                    OR LOWER(d.summary) LIKE ? ESCAPE '\\'
                    OR LOWER(k.keyword) LIKE ? ESCAPE '\\'
                    OR LOWER(t.tag) LIKE ? ESCAPE '\\'
                 ORDER BY d.uploaded_at_utc DESC, d.id DESC"
            ))
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query(&format!(
                "SELECT {SUMMARY_COLUMNS} FROM document d
                 ORDER BY d.uploaded_at_utc DESC, d.id DESC"
            ))
            .fetch_all(&self.pool)
            .await
        }
        .map_err(Error::Database)?;

        let mut summaries = rows
            .iter()
            .map(row_to_summary)
            .collect::<Result<Vec<_>>>()?;
        attach_children(&self.pool, &mut summaries).await?;
        Ok(summaries)
    }
}
