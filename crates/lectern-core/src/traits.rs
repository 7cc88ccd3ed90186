//! Core traits for lectern abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// DOCUMENT REPOSITORY
// =============================================================================

/// Repository for document rows and their analysis-derived children.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a new document plus its keyword/entity rows and the topic tag,
    /// all in one transaction. Returns the new document id.
    async fn insert_with_analysis(
        &self,
        req: CreateDocumentRequest,
        analysis: &Analysis,
    ) -> Result<Uuid>;

    /// Fetch a full document: row, keywords, entities, tags, notes
    /// (newest-first), and linked document ids.
    async fn fetch(&self, id: Uuid) -> Result<DocumentDetail>;

    /// Fetch just the title and extracted content (for re-analysis).
    async fn fetch_content(&self, id: Uuid) -> Result<(String, String)>;

    /// List all documents newest-first, children attached, content omitted.
    async fn list(&self) -> Result<Vec<DocumentSummary>>;

    /// Delete a document and every dependent row (keywords, entities, tags,
    /// notes, links in either direction). Returns the stored file path so
    /// the caller can remove the on-disk original.
    async fn delete(&self, id: Uuid) -> Result<String>;

    /// Overwrite summary/topic and replace the keyword and entity sets with
    /// the given analysis. Tags are never touched.
    async fn replace_analysis(&self, id: Uuid, analysis: &Analysis) -> Result<()>;

    /// Check whether a document exists.
    async fn exists(&self, id: Uuid) -> Result<bool>;
}

// =============================================================================
// ANNOTATION REPOSITORIES
// =============================================================================

/// Repository for per-document tags.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Add a tag to a document. Returns `true` if a row was inserted,
    /// `false` if the exact tag was already present (no-op).
    ///
    /// The document id is not checked for existence.
    async fn add(&self, document_id: Uuid, tag: &str) -> Result<bool>;

    /// All tags on one document, alphabetical.
    async fn get_for_document(&self, document_id: Uuid) -> Result<Vec<String>>;

    /// All distinct tag strings across every document, alphabetical.
    async fn list_all(&self) -> Result<Vec<String>>;
}

/// Repository for per-document annotation notes.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Append a note with the current timestamp. Returns the new note id.
    ///
    /// The document id is not checked for existence.
    async fn add(&self, document_id: Uuid, body: &str) -> Result<Uuid>;

    /// All notes on one document, newest first.
    async fn get_for_document(&self, document_id: Uuid) -> Result<Vec<NoteItem>>;
}

/// Repository for directed document-to-document links.
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Create a directed link. Returns `true` if a row was inserted,
    /// `false` if the exact ordered pair already existed (no-op).
    ///
    /// Neither id is checked for existence.
    async fn create(&self, document_id: Uuid, linked_document_id: Uuid) -> Result<bool>;

    /// Outgoing link targets for one document.
    async fn get_linked(&self, document_id: Uuid) -> Result<Vec<Uuid>>;

    /// Delete all links where the document appears as either endpoint.
    async fn delete_for_document(&self, document_id: Uuid) -> Result<()>;
}

// =============================================================================
// SEARCH
// =============================================================================

/// Substring and tag search over document summaries.
#[async_trait]
pub trait SearchRepository: Send + Sync {
    /// Search documents.
    ///
    /// Precedence: a tag filter returns documents carrying that exact tag;
    /// otherwise a query matches case-insensitively as a substring of title,
    /// summary, any keyword, or any tag; otherwise all documents. Results
    /// are newest-first with content omitted.
    async fn search(&self, query: Option<&str>, tag: Option<&str>)
        -> Result<Vec<DocumentSummary>>;
}

// =============================================================================
// INFERENCE BACKEND
// =============================================================================

/// Backend for text generation against a model-completion API.
///
/// Implementations are injected wherever generation is needed so tests can
/// substitute a deterministic mock.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Name of the underlying generation model.
    fn model_name(&self) -> &str;
}
