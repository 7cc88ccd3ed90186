//! Core data models for lectern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;

/// Recognized upload file types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Txt,
}

impl FileType {
    /// Parse a file extension (case-insensitive, without the dot).
    ///
    /// Returns `None` for anything other than `pdf` or `txt`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Txt => "txt",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FileType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s)
            .ok_or_else(|| crate::Error::InvalidInput(format!("Unknown file type: {}", s)))
    }
}

/// Structured analysis produced for a document by the model backend.
///
/// All four fields are required when parsing model output; a reply missing
/// any of them is treated as a parse failure and replaced by
/// [`Analysis::unavailable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    pub keywords: Vec<String>,
    pub entities: Vec<String>,
    pub topic: String,
}

impl Analysis {
    /// The fallback analysis used whenever the model call or parse fails.
    pub fn unavailable() -> Self {
        Self {
            summary: defaults::FALLBACK_SUMMARY.to_string(),
            keywords: Vec::new(),
            entities: Vec::new(),
            topic: defaults::FALLBACK_TOPIC.to_string(),
        }
    }
}

/// A stored document row: one uploaded research file and its derived
/// metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    /// Title derived from the sanitized filename (extension stripped).
    pub title: String,
    /// Stored filename (timestamp-prefixed, sanitized).
    pub filename: String,
    /// Path of the original file on disk.
    pub file_path: String,
    /// Full extracted plain text.
    pub content: String,
    pub summary: String,
    pub topic: String,
    pub uploaded_at_utc: DateTime<Utc>,
    pub file_type: FileType,
}

/// A document in list/search responses: content omitted, analysis children
/// attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub title: String,
    pub filename: String,
    pub file_path: String,
    pub summary: String,
    pub topic: String,
    pub uploaded_at_utc: DateTime<Utc>,
    pub file_type: FileType,
    pub keywords: Vec<String>,
    pub entities: Vec<String>,
    pub tags: Vec<String>,
}

/// A single annotation note on a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteItem {
    pub id: Uuid,
    pub body: String,
    pub created_at_utc: DateTime<Utc>,
}

/// A full single-document fetch: the row itself plus every dependent
/// relation (notes newest-first, outgoing link targets).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDetail {
    #[serde(flatten)]
    pub document: Document,
    pub keywords: Vec<String>,
    pub entities: Vec<String>,
    pub tags: Vec<String>,
    pub notes: Vec<NoteItem>,
    pub linked_docs: Vec<Uuid>,
}

/// Request for inserting a newly ingested document.
#[derive(Debug, Clone)]
pub struct CreateDocumentRequest {
    pub title: String,
    pub filename: String,
    pub file_path: String,
    pub content: String,
    pub file_type: FileType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(FileType::from_extension("pdf"), Some(FileType::Pdf));
        assert_eq!(FileType::from_extension("PDF"), Some(FileType::Pdf));
        assert_eq!(FileType::from_extension("txt"), Some(FileType::Txt));
        assert_eq!(FileType::from_extension("Txt"), Some(FileType::Txt));
        assert_eq!(FileType::from_extension("docx"), None);
        assert_eq!(FileType::from_extension(""), None);
    }

    #[test]
    fn test_file_type_display_roundtrip() {
        for ft in [FileType::Pdf, FileType::Txt] {
            let parsed: FileType = ft.as_str().parse().unwrap();
            assert_eq!(parsed, ft);
        }
    }

    #[test]
    fn test_file_type_from_str_rejects_unknown() {
        let err = "epub".parse::<FileType>().unwrap_err();
        assert!(err.to_string().contains("Unknown file type"));
    }

    #[test]
    fn test_analysis_unavailable_fallback() {
        let fallback = Analysis::unavailable();
        assert_eq!(fallback.summary, "Analysis unavailable");
        assert_eq!(fallback.topic, "General");
        assert!(fallback.keywords.is_empty());
        assert!(fallback.entities.is_empty());
    }

    #[test]
    fn test_analysis_parse_requires_all_fields() {
        // Missing "topic" must fail, not default.
        let json = r#"{"summary": "s", "keywords": [], "entities": []}"#;
        assert!(serde_json::from_str::<Analysis>(json).is_err());
    }

    #[test]
    fn test_analysis_parse_full() {
        let json = r#"{
            "summary": "Two sentences.",
            "keywords": ["quantum", "computing"],
            "entities": ["IBM"],
            "topic": "Physics"
        }"#;
        let analysis: Analysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.keywords.len(), 2);
        assert_eq!(analysis.topic, "Physics");
    }

    #[test]
    fn test_document_detail_serializes_flat() {
        let detail = DocumentDetail {
            document: Document {
                id: Uuid::nil(),
                title: "paper".to_string(),
                filename: "20260101_000000_paper.txt".to_string(),
                file_path: "uploads/20260101_000000_paper.txt".to_string(),
                content: "body".to_string(),
                summary: "s".to_string(),
                topic: "General".to_string(),
                uploaded_at_utc: Utc::now(),
                file_type: FileType::Txt,
            },
            keywords: vec![],
            entities: vec![],
            tags: vec![],
            notes: vec![],
            linked_docs: vec![],
        };

        let value = serde_json::to_value(&detail).unwrap();
        // The document row is flattened into the top-level object.
        assert_eq!(value["title"], "paper");
        assert_eq!(value["file_type"], "txt");
        assert!(value.get("document").is_none());
        assert!(value.get("content").is_some());
    }
}
