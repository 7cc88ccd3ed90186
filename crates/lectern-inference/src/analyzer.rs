//! Document analysis on top of a generation backend.
//!
//! The analyzer is total: every failure mode of the model call (network
//! error, non-JSON reply, missing fields) collapses into
//! [`Analysis::unavailable`], never an error.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use lectern_core::defaults::ANALYSIS_SAMPLE_CHARS;
use lectern_core::{Analysis, GenerationBackend, Result};

/// Produces `{summary, keywords, entities, topic}` for a document.
///
/// The backend is injected so tests can substitute a deterministic mock.
#[derive(Clone)]
pub struct DocumentAnalyzer {
    backend: Arc<dyn GenerationBackend>,
}

impl DocumentAnalyzer {
    /// Create a new analyzer over the given backend.
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Analyze a document's text. Never fails.
    #[instrument(skip(self, text, title), fields(subsystem = "inference", component = "analyzer", op = "analyze", model = %self.backend.model_name(), text_len = text.len()))]
    pub async fn analyze(&self, text: &str, title: &str) -> Analysis {
        let sample: String = text.chars().take(ANALYSIS_SAMPLE_CHARS).collect();
        let prompt = analysis_prompt(title, &sample);

        match self.backend.generate(&prompt).await {
            Ok(raw) => match parse_analysis(&raw) {
                Ok(analysis) => {
                    debug!(
                        keyword_count = analysis.keywords.len(),
                        entity_count = analysis.entities.len(),
                        topic = %analysis.topic,
                        "Analysis complete"
                    );
                    analysis
                }
                Err(e) => {
                    warn!(error = %e, "Unparsable analysis reply, using fallback");
                    Analysis::unavailable()
                }
            },
            Err(e) => {
                warn!(error = %e, "Generation failed, using fallback");
                Analysis::unavailable()
            }
        }
    }
}

/// Build the fixed analysis prompt for a title and text sample.
pub(crate) fn analysis_prompt(title: &str, sample: &str) -> String {
    format!(
        r#"Analyze this research document titled "{title}".

Text: {sample}

Provide a JSON response with:
{{
  "summary": "2-3 sentence summary",
  "keywords": ["keyword1", "keyword2", "keyword3", "keyword4", "keyword5"],
  "entities": ["entity1", "entity2", "entity3"],
  "topic": "main topic category"
}}

Respond ONLY with valid JSON, no other text."#
    )
}

/// Strip the Markdown code fences some models wrap around JSON replies.
pub(crate) fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a model reply into an [`Analysis`]. All four fields are required.
pub(crate) fn parse_analysis(raw: &str) -> Result<Analysis> {
    let cleaned = strip_code_fences(raw);
    Ok(serde_json::from_str(&cleaned)?)
}
