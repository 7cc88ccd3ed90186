//! Upload ingestion pipeline: validate → store → extract → analyze → persist.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use lectern_core::defaults::STORED_NAME_TIME_FORMAT;
use lectern_core::{
    sanitize_filename, split_extension, Analysis, CreateDocumentRequest, DocumentRepository,
    Error, FileType, Result,
};
use lectern_db::Database;
use lectern_inference::DocumentAnalyzer;

use crate::extract::extract_text;

/// Outcome of a successful ingestion.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub document_id: Uuid,
    pub analysis: Analysis,
}

/// Orchestrates upload → extract → analyze → persist for new documents.
#[derive(Clone)]
pub struct IngestionPipeline {
    db: Database,
    analyzer: DocumentAnalyzer,
    uploads_dir: PathBuf,
}

impl IngestionPipeline {
    /// Create a new pipeline storing originals under `uploads_dir`.
    pub fn new(db: Database, analyzer: DocumentAnalyzer, uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            analyzer,
            uploads_dir: uploads_dir.into(),
        }
    }

    /// Directory holding uploaded originals.
    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Ingest one uploaded file.
    ///
    /// Rejects empty filenames and extensions other than pdf/txt. The
    /// original bytes are persisted first; if extraction then yields
    /// nothing, the stored file is removed again before the error returns.
    /// Analysis never fails (the analyzer is total), so an unreachable
    /// model degrades to the fallback analysis rather than a failed upload.
    #[instrument(skip(self, data), fields(subsystem = "ingest", component = "pipeline", op = "ingest", filename = %original_filename, size_bytes = data.len()))]
    pub async fn ingest(&self, original_filename: &str, data: &[u8]) -> Result<IngestReport> {
        if original_filename.trim().is_empty() {
            return Err(Error::InvalidInput("No file selected".to_string()));
        }
        let file_type = split_extension(original_filename)
            .and_then(|(_, ext)| FileType::from_extension(ext))
            .ok_or_else(|| {
                Error::InvalidInput("File type not allowed (expected pdf or txt)".to_string())
            })?;

        // Timestamp prefix keeps repeated uploads of the same name apart.
        let safe_name = sanitize_filename(original_filename);
        let stored_name = format!("{}{}", Utc::now().format(STORED_NAME_TIME_FORMAT), safe_name);
        let path = self.uploads_dir.join(&stored_name);

        tokio::fs::create_dir_all(&self.uploads_dir).await?;
        tokio::fs::write(&path, data).await?;

        let content = match extract_text(data, file_type) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                self.discard(&path).await;
                return Err(Error::Extraction(
                    "Could not extract text from file".to_string(),
                ));
            }
            Err(e) => {
                self.discard(&path).await;
                return Err(e);
            }
        };

        let title = split_extension(&safe_name)
            .map(|(stem, _)| stem.to_string())
            .unwrap_or_else(|| safe_name.clone());

        let analysis = self.analyzer.analyze(&content, &title).await;

        let document_id = self
            .db
            .documents
            .insert_with_analysis(
                CreateDocumentRequest {
                    title,
                    filename: stored_name,
                    file_path: path.to_string_lossy().into_owned(),
                    content,
                    file_type,
                },
                &analysis,
            )
            .await?;

        info!(
            document_id = %document_id,
            topic = %analysis.topic,
            keyword_count = analysis.keywords.len(),
            "Document ingested"
        );
        Ok(IngestReport {
            document_id,
            analysis,
        })
    }

    /// Remove a stored upload whose extraction failed.
    async fn discard(&self, path: &Path) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), error = %e, "Failed to remove unreadable upload");
        }
    }
}
