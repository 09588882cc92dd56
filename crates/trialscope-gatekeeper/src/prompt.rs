//! LLM prompt for the relevance check

use trialscope_domain::traits::ChatPrompt;

/// System instruction for relevance classification
pub const RELEVANCE_SYSTEM_PROMPT: &str =
    "You are an assistant specializing in evaluating clinical trial relevance.";

const RELEVANCE_INSTRUCTIONS: &str = "Given the following clinical trial title and brief description, \
determine if the trial is relevant to spinal health, particularly involving the spine or lumbar region. \
Respond with 'relevant' or 'irrelevant'.";

/// Build the relevance prompt for one trial
pub fn relevance_prompt(title: &str, description: &str) -> ChatPrompt {
    let user = format!(
        "{}\n\nTitle: {}\nDescription: {}\n",
        RELEVANCE_INSTRUCTIONS, title, description
    );
    ChatPrompt::new(RELEVANCE_SYSTEM_PROMPT, user)
}

/// Interpret the model's reply: exactly "relevant" after trim + lowercase
pub(crate) fn is_relevant_reply(reply: &str) -> bool {
    reply.trim().to_lowercase() == "relevant"
}
