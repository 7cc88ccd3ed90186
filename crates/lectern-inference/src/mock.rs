//! Mock generation backend for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lectern_inference::mock::MockBackend;
//!
//! let backend = MockBackend::new().with_fixed_response("{\"ok\": true}");
//! let reply = backend.generate("prompt").await.unwrap();
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use lectern_core::{Error, GenerationBackend, Result};

/// Mock generation backend for testing.
#[derive(Clone)]
pub struct MockBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<String>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    default_response: String,
    fail: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_response: "Mock response".to_string(),
            fail: false,
        }
    }
}

impl MockBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a fixed response for all generation requests.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Make every generation request fail, for testing error handling.
    pub fn failing(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail = true;
        self
    }

    /// Get all prompts seen so far, for assertion.
    pub fn calls(&self) -> Vec<String> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of generation calls made.
    pub fn generate_call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.call_log.lock().unwrap().push(prompt.to_string());

        if self.config.fail {
            return Err(Error::Inference("Simulated failure".to_string()));
        }

        Ok(self.config.default_response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend_fixed_response() {
        let backend = MockBackend::new().with_fixed_response("Custom response");

        let response = backend.generate("test prompt").await.unwrap();
        assert_eq!(response, "Custom response");
    }

    #[tokio::test]
    async fn test_mock_backend_failure() {
        let backend = MockBackend::new().failing();

        let result = backend.generate("test").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_backend_call_logging() {
        let backend = MockBackend::new();

        backend.generate("one").await.unwrap();
        backend.generate("two").await.unwrap();

        assert_eq!(backend.generate_call_count(), 2);
        assert_eq!(backend.calls(), vec!["one".to_string(), "two".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_backend_clones_share_log() {
        let backend = MockBackend::new();
        let clone = backend.clone();

        clone.generate("from clone").await.unwrap();
        assert_eq!(backend.generate_call_count(), 1);
    }

    #[test]
    fn test_mock_backend_model_name() {
        assert_eq!(MockBackend::new().model_name(), "mock-model");
    }
}
