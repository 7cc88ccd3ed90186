//! # lectern-db
//!
//! SQLite database layer for lectern.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for documents, tags, notes, and links
//! - Substring/tag search over document summaries
//! - Embedded schema migrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use lectern_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite://lectern.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let docs = db.documents.list().await?;
//!     println!("{} documents", docs.len());
//!     Ok(())
//! }
//! ```

pub mod documents;
pub mod links;
pub mod notes;
pub mod pool;
pub mod search;
pub mod tags;

// Test fixtures for integration tests.
// Always compiled so integration tests (in tests/) can use memory_database.
pub mod test_fixtures;

// Re-export core types
pub use lectern_core::*;

// Re-export repository implementations
pub use documents::SqliteDocumentRepository;
pub use links::SqliteLinkRepository;
pub use notes::SqliteNoteRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use search::SqliteSearch;
pub use tags::SqliteTagRepository;

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Sqlite>,
    /// Document repository for CRUD and analysis replacement.
    pub documents: SqliteDocumentRepository,
    /// Tag repository for per-document tags.
    pub tags: SqliteTagRepository,
    /// Note repository for annotation notes.
    pub notes: SqliteNoteRepository,
    /// Link repository for directed document relations.
    pub links: SqliteLinkRepository,
    /// Substring/tag search provider.
    pub search: SqliteSearch,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Sqlite>) -> Self {
        Self {
            documents: SqliteDocumentRepository::new(pool.clone()),
            tags: SqliteTagRepository::new(pool.clone()),
            notes: SqliteNoteRepository::new(pool.clone()),
            links: SqliteLinkRepository::new(pool.clone()),
            search: SqliteSearch::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Sqlite> {
        &self.pool
    }
}
