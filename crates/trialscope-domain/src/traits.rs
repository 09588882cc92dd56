//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// A single-turn chat request: a fixed system instruction plus a user prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    /// System instruction
    pub system: String,

    /// User message
    pub user: String,
}

impl ChatPrompt {
    /// Create a new chat prompt
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (trialscope-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate the assistant's reply to a chat prompt
    fn generate(&self, prompt: &ChatPrompt) -> Result<String, Self::Error>;
}

/// Trait for the semantic relevance check used as the classifier's last tier
///
/// Implemented by the application layer (trialscope-gatekeeper). An
/// implementation never fails: it resolves its own errors to a boolean
/// according to its failure policy.
pub trait RelevanceOracle {
    /// Whether a trial with this title and description is on-topic
    fn is_relevant(&self, title: &str, description: &str) -> bool;
}

impl<F> RelevanceOracle for F
where
    F: Fn(&str, &str) -> bool,
{
    fn is_relevant(&self, title: &str, description: &str) -> bool {
        self(title, description)
    }
}
