//! TrialScope LLM Provider Layer
//!
//! Pluggable LLM provider implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `trialscope-domain`. It supports multiple chat backends with a common,
//! blocking interface.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//! - `OllamaProvider`: Local Ollama chat API
//! - `LlmBackend`: Runtime choice between the above
//!
//! # Examples
//!
//! ```
//! use trialscope_llm::MockProvider;
//! use trialscope_domain::traits::{ChatPrompt, LlmProvider};
//!
//! let provider = MockProvider::new("relevant");
//! let result = provider.generate(&ChatPrompt::new("system", "user")).unwrap();
//! assert_eq!(result, "relevant");
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod ollama;
pub mod openai;

#[cfg(test)]
mod test_server;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use trialscope_domain::traits::{ChatPrompt, LlmProvider as LlmProviderTrait};

pub use backend::{BackendKind, LlmBackend};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Missing or rejected credentials
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
        } else {
            LlmError::Communication(format!("Request failed: {}", e))
        }
    }
}

/// Map a non-success HTTP status to an error
pub(crate) fn status_error(status: reqwest::StatusCode, body: String, model: &str) -> LlmError {
    match status {
        reqwest::StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
            LlmError::Authentication(format!("HTTP {}: {}", status, body))
        }
        _ => LlmError::Communication(format!("HTTP {}: {}", status, body)),
    }
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network
/// calls. Responses are keyed by the user prompt; every prompt it receives is
/// recorded for later inspection.
///
/// # Examples
///
/// ```
/// use trialscope_llm::MockProvider;
/// use trialscope_domain::traits::{ChatPrompt, LlmProvider};
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// let prompt = ChatPrompt::new("system", "any prompt");
/// assert_eq!(provider.generate(&prompt).unwrap(), "Fixed response");
///
/// // Per-prompt responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.generate(&ChatPrompt::new("s", "prompt1")).unwrap(), "response1");
///
/// // Every call fails
/// let provider = MockProvider::failing();
/// assert!(provider.generate(&prompt).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Option<String>,
    responses: Arc<Mutex<HashMap<String, Option<String>>>>,
    prompts: Arc<Mutex<Vec<ChatPrompt>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Some(response.into()),
            responses: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider whose every call fails
    pub fn failing() -> Self {
        Self {
            default_response: None,
            ..Self::default()
        }
    }

    /// Add a specific response for a given user prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), Some(response.into()));
    }

    /// Configure to return an error for a specific user prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.responses.lock().unwrap().insert(prompt.into(), None);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<ChatPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &ChatPrompt) -> Result<String, Self::Error> {
        self.prompts.lock().unwrap().push(prompt.clone());

        let configured = self.responses.lock().unwrap().get(&prompt.user).cloned();
        match configured.unwrap_or_else(|| self.default_response.clone()) {
            Some(response) => Ok(response),
            None => Err(LlmError::Other("Mock error".to_string())),
        }
    }
}
