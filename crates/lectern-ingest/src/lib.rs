//! # lectern-ingest
//!
//! Text extraction and the upload ingestion pipeline for lectern.
//!
//! This crate provides:
//! - [`extract::extract_text`], a pure bytes-to-text function for the two
//!   supported upload types (pdf, txt)
//! - [`IngestionPipeline`], the upload → extract → analyze → persist
//!   orchestration

pub mod extract;
pub mod pipeline;

// Re-export core types
pub use lectern_core::*;

pub use extract::extract_text;
pub use pipeline::{IngestReport, IngestionPipeline};
