//! Configuration management for the CLI.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use trialscope_extractor::{ExtractionFailurePolicy, ProcessorConfig};
use trialscope_gatekeeper::{ExclusionRules, OracleFailurePolicy};
use trialscope_llm::{openai, BackendKind, DEFAULT_TIMEOUT_SECS};

const CONFIG_DIR: &str = ".trialscope";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Input file settings
    #[serde(default)]
    pub input: InputConfig,

    /// Language model settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Filtering policies and rules
    #[serde(default)]
    pub filter: FilterConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Input file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path of the clinical-trial JSON export
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

/// Language model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name (`openai` or `ollama`)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// API base URL; the provider's default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model for the relevance check
    #[serde(default = "default_relevance_model")]
    pub relevance_model: String,

    /// Model for trial Q&A
    #[serde(default = "default_answer_model")]
    pub answer_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Filtering policies and rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Outcome of a failed relevance check
    #[serde(default)]
    pub oracle_failure: OracleFailurePolicy,

    /// Handling of trials that cannot be extracted
    #[serde(default)]
    pub extraction_failure: ExtractionFailurePolicy,

    /// Custom exclusion term lists; built-in lists when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<ExclusionRules>,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Line editor history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Console text
    Plain,
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Directory holding the config and history files.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(CONFIG_DIR))
    }

    /// Default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Line editor history path.
    pub fn history_path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("history.txt"))
    }

    /// Load configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the given or default config file, writing defaults if it is missing.
    pub fn load_or_create(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::path()?,
        };

        if path.exists() {
            debug!(path = %path.display(), "loading config");
            return Self::load_from(&path);
        }

        let config = Self::default();
        if let Err(e) = config.save_to(&path) {
            warn!(path = %path.display(), error = %e, "could not write default config");
        }
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        self.backend_kind()?;
        if self.llm.timeout_secs == 0 {
            return Err(CliError::Config("llm.timeout_secs must be positive".into()));
        }
        if let Some(rules) = &self.filter.rules {
            rules.validate()?;
        }
        Ok(())
    }

    /// Apply command-line overrides.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(file) = &cli.file {
            self.input.path = file.clone();
        }
        if let Some(provider) = cli.provider {
            self.llm.provider = BackendKind::from(provider).to_string();
        }
        if let Some(endpoint) = &cli.endpoint {
            self.llm.endpoint = Some(endpoint.clone());
        }
        if let Some(model) = &cli.relevance_model {
            self.llm.relevance_model = model.clone();
        }
        if let Some(model) = &cli.answer_model {
            self.llm.answer_model = model.clone();
        }
        if let Some(format) = cli.format {
            self.settings.format = format.into();
        }
        if cli.no_color {
            self.settings.color = false;
        }
    }

    /// The configured provider.
    pub fn backend_kind(&self) -> Result<BackendKind> {
        self.llm
            .provider
            .parse()
            .map_err(|_| CliError::Config(format!("Unknown LLM provider '{}'", self.llm.provider)))
    }

    /// Exclusion rules in effect.
    pub fn exclusion_rules(&self) -> ExclusionRules {
        self.filter.rules.clone().unwrap_or_default()
    }

    /// Batch processor configuration.
    pub fn processor_config(&self) -> ProcessorConfig {
        ProcessorConfig {
            extraction_failure: self.filter.extraction_failure,
        }
    }
}

impl LlmConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: None,
            api_key_env: default_api_key_env(),
            relevance_model: default_relevance_model(),
            answer_model: default_answer_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: default_true(),
            format: default_format(),
            history_size: default_history_size(),
        }
    }
}

fn default_input_path() -> PathBuf {
    PathBuf::from("ctg-studies.json")
}

fn default_provider() -> String {
    BackendKind::OpenAi.to_string()
}

fn default_api_key_env() -> String {
    openai::DEFAULT_API_KEY_ENV.to_string()
}

fn default_relevance_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_answer_model() -> String {
    "gpt-4".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Plain
}

fn default_history_size() -> usize {
    1000
}
