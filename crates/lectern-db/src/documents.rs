//! Document repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite};
use uuid::Uuid;

use lectern_core::{
    new_v7, Analysis, CreateDocumentRequest, Document, DocumentDetail, DocumentRepository,
    DocumentSummary, Error, NoteItem, Result,
};

/// Columns selected for list/search views (everything except `content`).
pub(crate) const SUMMARY_COLUMNS: &str =
    "d.id, d.title, d.filename, d.file_path, d.summary, d.topic, d.uploaded_at_utc, d.file_type";

/// SQLite implementation of DocumentRepository.
#[derive(Clone)]
pub struct SqliteDocumentRepository {
    pool: Pool<Sqlite>,
}

impl SqliteDocumentRepository {
    /// Create a new SqliteDocumentRepository with the given connection pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

/// Map a full document row.
pub(crate) fn row_to_document(row: &SqliteRow) -> Result<Document> {
    let file_type: String = row.get("file_type");
    Ok(Document {
        id: row.get("id"),
        title: row.get("title"),
        filename: row.get("filename"),
        file_path: row.get("file_path"),
        content: row.get("content"),
        summary: row.get("summary"),
        topic: row.get("topic"),
        uploaded_at_utc: row.get("uploaded_at_utc"),
        file_type: file_type.parse()?,
    })
}

/// Map a summary row (children attached separately).
pub(crate) fn row_to_summary(row: &SqliteRow) -> Result<DocumentSummary> {
    let file_type: String = row.get("file_type");
    Ok(DocumentSummary {
        id: row.get("id"),
        title: row.get("title"),
        filename: row.get("filename"),
        file_path: row.get("file_path"),
        summary: row.get("summary"),
        topic: row.get("topic"),
        uploaded_at_utc: row.get("uploaded_at_utc"),
        file_type: file_type.parse()?,
        keywords: Vec::new(),
        entities: Vec::new(),
        tags: Vec::new(),
    })
}

/// Fetch a single text column for every row matching a document id.
pub(crate) async fn fetch_values(
    pool: &Pool<Sqlite>,
    sql: &str,
    document_id: Uuid,
) -> Result<Vec<String>> {
    let rows = sqlx::query(sql)
        .bind(document_id)
        .fetch_all(pool)
        .await
        .map_err(Error::Database)?;
    Ok(rows.into_iter().map(|row| row.get(0)).collect())
}

/// Attach keywords/entities/tags to bare summaries.
pub(crate) async fn attach_children(
    pool: &Pool<Sqlite>,
    summaries: &mut [DocumentSummary],
) -> Result<()> {
    for summary in summaries.iter_mut() {
        summary.keywords = fetch_values(
            pool,
            "SELECT keyword FROM keyword WHERE document_id = ? ORDER BY id",
            summary.id,
        )
        .await?;
        summary.entities = fetch_values(
            pool,
            "SELECT entity FROM entity WHERE document_id = ? ORDER BY id",
            summary.id,
        )
        .await?;
        summary.tags = fetch_values(
            pool,
            "SELECT tag FROM tag WHERE document_id = ? ORDER BY tag",
            summary.id,
        )
        .await?;
    }
    Ok(())
}

#[async_trait]
impl DocumentRepository for SqliteDocumentRepository {
    async fn insert_with_analysis(
        &self,
        req: CreateDocumentRequest,
        analysis: &Analysis,
    ) -> Result<Uuid> {
        let id = new_v7();
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        sqlx::query(
            "INSERT INTO document
                 (id, title, filename, file_path, content, summary, topic,
                  uploaded_at_utc, file_type)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.filename)
        .bind(&req.file_path)
        .bind(&req.content)
        .bind(&analysis.summary)
        .bind(&analysis.topic)
        .bind(now)
        .bind(req.file_type.as_str())
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        for keyword in &analysis.keywords {
            sqlx::query("INSERT INTO keyword (id, document_id, keyword) VALUES (?, ?, ?)")
                .bind(new_v7())
                .bind(id)
                .bind(keyword)
                .execute(&mut *tx)
                .await
                .map_err(Error::Database)?;
        }

        for entity in &analysis.entities {
            sqlx::query("INSERT INTO entity (id, document_id, entity) VALUES (?, ?, ?)")
                .bind(new_v7())
                .bind(id)
                .bind(entity)
                .execute(&mut *tx)
                .await
                .map_err(Error::Database)?;
        }

        // The topic doubles as the document's initial tag.
        sqlx::query(
            "INSERT INTO tag (id, document_id, tag) VALUES (?, ?, ?)
             ON CONFLICT (document_id, tag) DO NOTHING",
        )
        .bind(new_v7())
        .bind(id)
        .bind(&analysis.topic)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;
        Ok(id)
    }

    async fn fetch(&self, id: Uuid) -> Result<DocumentDetail> {
        let row = sqlx::query("SELECT * FROM document WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::DocumentNotFound(id))?;
        let document = row_to_document(&row)?;

        let keywords = fetch_values(
            &self.pool,
            "SELECT keyword FROM keyword WHERE document_id = ? ORDER BY id",
            id,
        )
        .await?;
        let entities = fetch_values(
            &self.pool,
            "SELECT entity FROM entity WHERE document_id = ? ORDER BY id",
            id,
        )
        .await?;
        let tags = fetch_values(
            &self.pool,
            "SELECT tag FROM tag WHERE document_id = ? ORDER BY tag",
            id,
        )
        .await?;

        let note_rows = sqlx::query(
            "SELECT id, body, created_at_utc FROM note
             WHERE document_id = ?
             ORDER BY created_at_utc DESC, id DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;
        let notes = note_rows
            .into_iter()
            .map(|row| NoteItem {
                id: row.get("id"),
                body: row.get("body"),
                created_at_utc: row.get("created_at_utc"),
            })
            .collect();

        let link_rows = sqlx::query(
            "SELECT linked_document_id FROM document_link WHERE document_id = ? ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;
        let linked_docs = link_rows.into_iter().map(|row| row.get(0)).collect();

        Ok(DocumentDetail {
            document,
            keywords,
            entities,
            tags,
            notes,
            linked_docs,
        })
    }

    async fn fetch_content(&self, id: Uuid) -> Result<(String, String)> {
        let row = sqlx::query("SELECT title, content FROM document WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::DocumentNotFound(id))?;
        Ok((row.get("title"), row.get("content")))
    }

    async fn list(&self) -> Result<Vec<DocumentSummary>> {
        let rows = sqlx::query(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM document d
             ORDER BY d.uploaded_at_utc DESC, d.id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut summaries = rows
            .iter()
            .map(row_to_summary)
            .collect::<Result<Vec<_>>>()?;
        attach_children(&self.pool, &mut summaries).await?;
        Ok(summaries)
    }

    async fn delete(&self, id: Uuid) -> Result<String> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let row = sqlx::query("SELECT file_path FROM document WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::DocumentNotFound(id))?;
        let file_path: String = row.get("file_path");

        sqlx::query("DELETE FROM document WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        for table in ["keyword", "entity", "tag", "note"] {
            sqlx::query(&format!("DELETE FROM {table} WHERE document_id = ?"))
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(Error::Database)?;
        }
        // Links are removed in either direction.
        sqlx::query("DELETE FROM document_link WHERE document_id = ? OR linked_document_id = ?")
            .bind(id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;
        Ok(file_path)
    }

    async fn replace_analysis(&self, id: Uuid, analysis: &Analysis) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let result = sqlx::query("UPDATE document SET summary = ?, topic = ? WHERE id = ?")
            .bind(&analysis.summary)
            .bind(&analysis.topic)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        if result.rows_affected() == 0 {
            return Err(Error::DocumentNotFound(id));
        }

        sqlx::query("DELETE FROM keyword WHERE document_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        for keyword in &analysis.keywords {
            sqlx::query("INSERT INTO keyword (id, document_id, keyword) VALUES (?, ?, ?)")
                .bind(new_v7())
                .bind(id)
                .bind(keyword)
                .execute(&mut *tx)
                .await
                .map_err(Error::Database)?;
        }

        sqlx::query("DELETE FROM entity WHERE document_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        for entity in &analysis.entities {
            sqlx::query("INSERT INTO entity (id, document_id, entity) VALUES (?, ?, ?)")
                .bind(new_v7())
                .bind(id)
                .bind(entity)
                .execute(&mut *tx)
                .await
                .map_err(Error::Database)?;
        }

        tx.commit().await.map_err(Error::Database)?;
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM document WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.get::<bool, _>(0))
    }
}
