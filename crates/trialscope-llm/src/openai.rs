//! OpenAI Provider Implementation
//!
//! Talks to an OpenAI-compatible `/v1/chat/completions` endpoint with a
//! system + user message pair and returns the first choice's content.
//!
//! # Examples
//!
//! ```no_run
//! use trialscope_llm::OpenAiProvider;
//!
//! // Reads the API key from OPENAI_API_KEY
//! let provider = OpenAiProvider::from_env("gpt-3.5-turbo", "OPENAI_API_KEY").unwrap();
//! ```

use crate::{status_error, LlmError, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use trialscope_domain::traits::{ChatPrompt, LlmProvider as LlmProviderTrait};
use tracing::debug;

/// Default OpenAI API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI chat completions provider
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

/// A chat message in the OpenAI wire format
#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL without the `/v1/...` path
    /// - `model`: Model to use (e.g., "gpt-4")
    /// - `api_key`: Bearer token
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, model, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new OpenAI provider with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Create a provider for the default endpoint, reading the key from `key_env`
    pub fn from_env(model: impl Into<String>, key_env: &str) -> Result<Self, LlmError> {
        let api_key = std::env::var(key_env).map_err(|_| {
            LlmError::Authentication(format!("environment variable {} is not set", key_env))
        })?;
        Self::new(DEFAULT_ENDPOINT, model, api_key)
    }

    /// Model this provider sends requests to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one chat completion request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint is unreachable or times out
    /// - The API rejects the key, the model, or the request rate
    /// - The response has no choices or no content
    pub fn chat(&self, prompt: &ChatPrompt) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.endpoint);

        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.user.clone(),
                },
            ],
        };

        debug!(model = %self.model, prompt_len = prompt.user.len(), "sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(status, error_text, &self.model));
        }

        let completion: ChatCompletionResponse = response.json()?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| LlmError::InvalidResponse("Response contained no message content".to_string()))
    }
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &ChatPrompt) -> Result<String, Self::Error> {
        self.chat(prompt)
    }
}
