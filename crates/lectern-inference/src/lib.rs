//! # lectern-inference
//!
//! Model-API backend abstraction for lectern.
//!
//! This crate provides:
//! - The Anthropic messages-API implementation of
//!   [`GenerationBackend`](lectern_core::GenerationBackend)
//! - [`DocumentAnalyzer`], the total analysis function over any backend
//! - A deterministic mock backend for tests (feature `mock`)
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lectern_inference::{AnthropicBackend, DocumentAnalyzer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = Arc::new(AnthropicBackend::from_env());
//!     let analyzer = DocumentAnalyzer::new(backend);
//!     let analysis = analyzer.analyze("document text", "title").await;
//!     println!("topic: {}", analysis.topic);
//! }
//! ```

pub mod analyzer;
pub mod anthropic;

// Mock generation backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use lectern_core::*;

pub use analyzer::DocumentAnalyzer;
pub use anthropic::AnthropicBackend;
