//! Test fixtures for integration tests.
//!
//! Always compiled so integration tests (in `tests/`) can share the
//! in-memory database helper.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::Database;
use lectern_core::{Analysis, CreateDocumentRequest, FileType};

/// Open a fresh in-memory database with migrations applied.
///
/// The pool is pinned to a single connection with idle reclamation disabled:
/// an in-memory SQLite database lives and dies with its connection.
pub async fn memory_database() -> Database {
    let options =
        SqliteConnectOptions::from_str("sqlite::memory:").expect("valid connection string");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");

    let db = Database::new(pool);
    db.migrate().await.expect("failed to run migrations");
    db
}

/// A document insertion request with plausible defaults.
pub fn sample_document(title: &str) -> CreateDocumentRequest {
    CreateDocumentRequest {
        title: title.to_string(),
        filename: format!("20260101_120000_{}.txt", title),
        file_path: format!("uploads/20260101_120000_{}.txt", title),
        content: format!("Extracted text of {}.", title),
        file_type: FileType::Txt,
    }
}

/// An analysis payload with plausible defaults.
pub fn sample_analysis(topic: &str) -> Analysis {
    Analysis {
        summary: format!("A short study of {}.", topic.to_lowercase()),
        keywords: vec!["method".to_string(), "results".to_string()],
        entities: vec!["Example Lab".to_string()],
        topic: topic.to_string(),
    }
}
