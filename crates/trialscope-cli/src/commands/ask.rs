//! Ask command and the trial Q&A assistant.

use super::trial_by_number;
use crate::cli::AskArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fmt::Display;
use std::io::Write;
use tracing::{debug, warn};
use trialscope_domain::traits::{ChatPrompt, LlmProvider};
use trialscope_domain::TrialCatalog;

/// System instruction for trial Q&A
pub const ANSWER_SYSTEM_PROMPT: &str =
    "You are a helpful assistant knowledgeable about clinical trials.";

/// Reply shown when the model cannot be reached
pub const ANSWER_FAILURE_MESSAGE: &str = "An error occurred while communicating with the AI.";

/// Build the Q&A prompt for a rendered trial and a question
pub fn answer_prompt(trial_text: &str, question: &str) -> ChatPrompt {
    ChatPrompt::new(
        ANSWER_SYSTEM_PROMPT,
        format!(
            "Here is detailed information about a clinical trial:\n\n{}\n\nNow, answer the following question:\n{}",
            trial_text, question
        ),
    )
}

/// Answers free-form questions about one trial's text
pub struct TrialAssistant<L> {
    provider: L,
}

impl<L> TrialAssistant<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create an assistant around a provider.
    pub fn new(provider: L) -> Self {
        Self { provider }
    }

    /// Answer a question. Never fails: errors are logged and replaced by
    /// `ANSWER_FAILURE_MESSAGE`.
    pub fn answer(&self, trial_text: &str, question: &str) -> String {
        match self.provider.generate(&answer_prompt(trial_text, question)) {
            Ok(reply) => {
                debug!(question, "answer received");
                reply.trim().to_string()
            }
            Err(e) => {
                warn!(error = %e, "question answering failed");
                ANSWER_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

/// Execute the ask command.
pub fn execute_ask<L, W>(
    args: &AskArgs,
    catalog: &TrialCatalog,
    assistant: &TrialAssistant<L>,
    formatter: &Formatter,
    out: &mut W,
) -> Result<()>
where
    L: LlmProvider,
    L::Error: Display,
    W: Write,
{
    let question = args.question_text();
    if question.trim().is_empty() {
        return Err(CliError::InvalidInput("Question must not be empty".to_string()));
    }

    let record = trial_by_number(catalog, args.number)?;
    let answer = assistant.answer(&record.render(), &question);
    writeln!(out, "{}", formatter.answer(&question, &answer)?)?;
    Ok(())
}
