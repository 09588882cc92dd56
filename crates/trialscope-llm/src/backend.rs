//! Runtime provider selection
//!
//! The CLI picks its provider from configuration, so it needs one concrete
//! type that can be any of them.

use crate::{LlmError, OllamaProvider, OpenAiProvider};
use std::fmt;
use std::str::FromStr;
use trialscope_domain::traits::{ChatPrompt, LlmProvider as LlmProviderTrait};

/// Which provider implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// OpenAI-compatible chat completions
    OpenAi,
    /// Local Ollama
    Ollama,
}

impl BackendKind {
    /// Get the backend name as used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::OpenAi => "openai",
            BackendKind::Ollama => "ollama",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(BackendKind::OpenAi),
            "ollama" => Ok(BackendKind::Ollama),
            other => Err(LlmError::Other(format!("Unknown LLM provider: {}", other))),
        }
    }
}

/// A provider chosen at runtime
pub enum LlmBackend {
    /// OpenAI-compatible chat completions
    OpenAi(OpenAiProvider),
    /// Local Ollama
    Ollama(OllamaProvider),
}

impl LlmBackend {
    /// Model name the backend talks to
    pub fn model(&self) -> &str {
        match self {
            LlmBackend::OpenAi(p) => p.model(),
            LlmBackend::Ollama(p) => p.model(),
        }
    }
}

impl From<OpenAiProvider> for LlmBackend {
    fn from(provider: OpenAiProvider) -> Self {
        LlmBackend::OpenAi(provider)
    }
}

impl From<OllamaProvider> for LlmBackend {
    fn from(provider: OllamaProvider) -> Self {
        LlmBackend::Ollama(provider)
    }
}

impl LlmProviderTrait for LlmBackend {
    type Error = LlmError;

    fn generate(&self, prompt: &ChatPrompt) -> Result<String, Self::Error> {
        match self {
            LlmBackend::OpenAi(p) => p.generate(prompt),
            LlmBackend::Ollama(p) => p.generate(prompt),
        }
    }
}
