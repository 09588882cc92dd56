//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trialscope_llm::BackendKind;

/// TrialScope - Filter and explore clinical trials for spinal research.
#[derive(Debug, Parser)]
#[command(name = "trialscope")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Clinical-trial JSON export to load
    #[arg(short = 'i', long = "file", global = true, env = "TRIALSCOPE_FILE")]
    pub file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// LLM provider
    #[arg(long, value_enum, global = true)]
    pub provider: Option<CliProvider>,

    /// LLM API base URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Model used for relevance checks
    #[arg(long, global = true)]
    pub relevance_model: Option<String>,

    /// Model used to answer questions about a trial
    #[arg(long, global = true)]
    pub answer_model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Console text (default)
    Plain,
    /// Table format
    Table,
    /// JSON format
    Json,
}

/// LLM provider options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliProvider {
    /// OpenAI chat completions
    Openai,
    /// Local Ollama
    Ollama,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the relevant trials
    List,

    /// List the excluded trials grouped by reason
    Excluded,

    /// Search relevant trials for a keyword
    Search(SearchArgs),

    /// Show the full record of one trial
    Show(ShowArgs),

    /// Ask a question about one trial
    Ask(AskArgs),

    /// Enter the interactive menu (default)
    Repl,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Keyword to look for in title, summary and conditions
    pub keyword: String,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Trial number as printed by `list`
    pub number: usize,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Trial number as printed by `list`
    pub number: usize,

    /// The question
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

impl AskArgs {
    /// The question words joined back into one line
    pub fn question_text(&self) -> String {
        self.question.join(" ")
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Plain => crate::config::OutputFormat::Plain,
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<CliProvider> for BackendKind {
    fn from(provider: CliProvider) -> Self {
        match provider {
            CliProvider::Openai => BackendKind::OpenAi,
            CliProvider::Ollama => BackendKind::Ollama,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["trialscope"]);
        assert!(cli.command.is_none());
        assert!(!cli.no_color);
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from(["trialscope", "search", "stenosis"]);
        match cli.command {
            Some(Command::Search(args)) => assert_eq!(args.keyword, "stenosis"),
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_ask_joins_question() {
        let cli = Cli::parse_from(["trialscope", "ask", "2", "who", "can", "enrol?"]);
        match cli.command {
            Some(Command::Ask(args)) => {
                assert_eq!(args.number, 2);
                assert_eq!(args.question_text(), "who can enrol?");
            }
            _ => panic!("Expected Ask command"),
        }
    }

    #[test]
    fn test_ask_requires_question() {
        assert!(Cli::try_parse_from(["trialscope", "ask", "2"]).is_err());
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::parse_from([
            "trialscope",
            "list",
            "--file",
            "studies.json",
            "--provider",
            "ollama",
            "--relevance-model",
            "llama3",
            "--format",
            "table",
        ]);
        assert_eq!(cli.file, Some(PathBuf::from("studies.json")));
        assert_eq!(cli.provider.map(BackendKind::from), Some(BackendKind::Ollama));
        assert_eq!(cli.relevance_model.as_deref(), Some("llama3"));
        assert!(matches!(cli.format, Some(CliFormat::Table)));
        assert!(matches!(cli.command, Some(Command::List)));
    }

    #[test]
    fn test_show_rejects_non_number() {
        assert!(Cli::try_parse_from(["trialscope", "show", "first"]).is_err());
    }
}
