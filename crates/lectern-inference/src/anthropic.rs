//! Anthropic messages-API inference backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use lectern_core::{defaults, Error, GenerationBackend, Result};

/// Default Anthropic API base URL.
pub const DEFAULT_API_URL: &str = defaults::ANTHROPIC_BASE_URL;

/// Default generation model.
pub const DEFAULT_GEN_MODEL: &str = defaults::GEN_MODEL;

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = defaults::GEN_TIMEOUT_SECS;

/// Anthropic inference backend.
pub struct AnthropicBackend {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    timeout_secs: u64,
}

impl AnthropicBackend {
    /// Create a new Anthropic backend with default settings.
    pub fn new(api_key: String) -> Self {
        Self::with_config(
            DEFAULT_API_URL.to_string(),
            api_key,
            DEFAULT_GEN_MODEL.to_string(),
        )
    }

    /// Create a new Anthropic backend with custom configuration.
    pub fn with_config(base_url: String, api_key: String, model: String) -> Self {
        let timeout_secs = std::env::var("LECTERN_GEN_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(GEN_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            "Initializing Anthropic backend: url={}, model={}",
            base_url, model
        );

        Self {
            client,
            base_url,
            api_key,
            model,
            max_tokens: defaults::GEN_MAX_TOKENS,
            timeout_secs,
        }
    }

    /// Create from environment variables.
    ///
    /// A missing `ANTHROPIC_API_KEY` is not an error here: requests will be
    /// rejected by the API and callers fall back accordingly.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_key = std::env::var("ANTHROPIC_API_KEY").unwrap_or_default();
        let model =
            std::env::var("LECTERN_GEN_MODEL").unwrap_or_else(|_| DEFAULT_GEN_MODEL.to_string());

        Self::with_config(base_url, api_key, model)
    }

    /// Set the response token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// One message in a `/v1/messages` request.
#[derive(Serialize, Deserialize, Clone)]
struct Message {
    role: String,
    content: String,
}

/// Request payload for the Anthropic `/v1/messages` endpoint.
#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

/// One content block in a `/v1/messages` response.
#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Response from the Anthropic `/v1/messages` endpoint.
#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[async_trait]
impl GenerationBackend for AnthropicBackend {
    #[instrument(skip(self, prompt), fields(subsystem = "inference", component = "anthropic", op = "generate", model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();

        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .timeout(Duration::from_secs(self.timeout_secs))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", defaults::ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Anthropic API returned {}: {}",
                status, body
            )));
        }

        let result: MessagesResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        let content = result
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
            .ok_or_else(|| Error::Inference("Response contained no text block".to_string()))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            response_len = content.len(),
            duration_ms = elapsed,
            "Generation complete"
        );
        if elapsed > 30000 {
            warn!(
                duration_ms = elapsed,
                prompt_len = prompt.len(),
                slow = true,
                "Slow generation operation"
            );
        }
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_API_URL, "https://api.anthropic.com");
        assert_eq!(GEN_TIMEOUT_SECS, 120);
    }

    #[test]
    fn test_default_config() {
        let backend = AnthropicBackend::new("key".to_string());
        assert_eq!(backend.base_url, DEFAULT_API_URL);
        assert_eq!(backend.model, DEFAULT_GEN_MODEL);
        assert_eq!(backend.max_tokens, defaults::GEN_MAX_TOKENS);
    }

    #[test]
    fn test_custom_config() {
        let backend = AnthropicBackend::with_config(
            "http://custom:1234".to_string(),
            "secret".to_string(),
            "custom-model".to_string(),
        )
        .with_max_tokens(64);
        assert_eq!(backend.base_url, "http://custom:1234");
        assert_eq!(backend.api_key, "secret");
        assert_eq!(backend.model, "custom-model");
        assert_eq!(backend.max_tokens, 64);
    }

    #[test]
    fn test_model_name_accessor() {
        let backend = AnthropicBackend::with_config(
            "http://test".to_string(),
            "k".to_string(),
            "my-gen-model".to_string(),
        );
        assert_eq!(backend.model_name(), "my-gen-model");
    }

    #[test]
    fn test_messages_request_serialization() {
        let request = MessagesRequest {
            model: "m1".to_string(),
            max_tokens: 1000,
            messages: vec![Message {
                role: "user".to_string(),
                content: "Hello".to_string(),
            }],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"m1\""));
        assert!(json.contains("\"max_tokens\":1000"));
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("Hello"));
    }

    #[test]
    fn test_messages_response_deserialization() {
        let json = r#"{"content": [{"type": "text", "text": "reply"}], "model": "m1"}"#;
        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.content.len(), 1);
        assert_eq!(response.content[0].kind, "text");
        assert_eq!(response.content[0].text, "reply");
    }

    #[test]
    fn test_messages_response_skips_non_text_blocks() {
        let json = r#"{"content": [
            {"type": "thinking"},
            {"type": "text", "text": "the reply"}
        ]}"#;
        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        let text = response
            .content
            .into_iter()
            .find(|b| b.kind == "text")
            .map(|b| b.text);
        assert_eq!(text.as_deref(), Some("the reply"));
    }
}
