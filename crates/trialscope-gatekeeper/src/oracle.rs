//! LLM-backed relevance oracle

use crate::prompt::{is_relevant_reply, relevance_prompt};
use crate::OracleFailurePolicy;
use std::fmt::Display;
use tracing::{debug, warn};
use trialscope_domain::traits::{LlmProvider, RelevanceOracle};

/// Relevance oracle that asks a language model for a one-word verdict
///
/// The provider is injected, so tests can pass a mock. Provider failures
/// never surface to the caller: they are logged and resolved by the
/// configured `OracleFailurePolicy` (fail-open unless told otherwise).
pub struct LlmRelevanceOracle<L> {
    provider: L,
    failure_policy: OracleFailurePolicy,
}

impl<L> LlmRelevanceOracle<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a fail-open oracle around a provider
    pub fn new(provider: L) -> Self {
        Self {
            provider,
            failure_policy: OracleFailurePolicy::default(),
        }
    }

    /// Set the failure policy
    pub fn with_failure_policy(mut self, failure_policy: OracleFailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }
}

impl<L> RelevanceOracle for LlmRelevanceOracle<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    fn is_relevant(&self, title: &str, description: &str) -> bool {
        match self.provider.generate(&relevance_prompt(title, description)) {
            Ok(reply) => {
                debug!(title, reply = %reply.trim(), "relevance verdict");
                is_relevant_reply(&reply)
            }
            Err(e) => {
                let fallback = self.failure_policy.fallback();
                warn!(title, error = %e, fallback, "relevance check failed");
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialscope_llm::MockProvider;

    #[test]
    fn test_relevant_reply() {
        let oracle = LlmRelevanceOracle::new(MockProvider::new("Relevant"));
        assert!(oracle.is_relevant("Diabetic Back Pain", "lumbar pain in diabetics"));
    }

    #[test]
    fn test_irrelevant_reply() {
        let oracle = LlmRelevanceOracle::new(MockProvider::new("irrelevant"));
        assert!(!oracle.is_relevant("Cardiac Rehab", "heart failure"));
    }

    #[test]
    fn test_unexpected_reply_is_irrelevant() {
        let oracle = LlmRelevanceOracle::new(MockProvider::new("It might be relevant."));
        assert!(!oracle.is_relevant("Eye Study", ""));
    }

    #[test]
    fn test_failure_fails_open_by_default() {
        let oracle = LlmRelevanceOracle::new(MockProvider::failing());
        assert!(oracle.is_relevant("Diabetic Neuropathy Pain Study", ""));
    }

    #[test]
    fn test_failure_fails_closed_when_configured() {
        let oracle = LlmRelevanceOracle::new(MockProvider::failing())
            .with_failure_policy(OracleFailurePolicy::FailClosed);
        assert!(!oracle.is_relevant("Diabetic Neuropathy Pain Study", ""));
    }

    #[test]
    fn test_sends_relevance_prompt() {
        let provider = MockProvider::new("relevant");
        let oracle = LlmRelevanceOracle::new(provider.clone());
        oracle.is_relevant("Hearing and Balance", "vestibular rehab");

        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], relevance_prompt("Hearing and Balance", "vestibular rehab"));
    }
}
