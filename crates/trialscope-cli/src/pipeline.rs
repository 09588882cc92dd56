//! Wiring from configuration to a loaded catalog.

use crate::config::LlmConfig;
use crate::error::{CliError, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;
use trialscope_domain::traits::RelevanceOracle;
use trialscope_domain::TrialCatalog;
use trialscope_extractor::{load_studies, BatchProcessor};
use trialscope_llm::{ollama, openai, BackendKind, LlmBackend, OllamaProvider, OpenAiProvider};

/// Build a provider for one model.
pub fn build_backend(llm: &LlmConfig, kind: BackendKind, model: &str) -> Result<LlmBackend> {
    let backend: LlmBackend = match kind {
        BackendKind::OpenAi => {
            let api_key = std::env::var(&llm.api_key_env).map_err(|_| {
                CliError::Config(format!("environment variable {} is not set", llm.api_key_env))
            })?;
            let endpoint = llm.endpoint.as_deref().unwrap_or(openai::DEFAULT_ENDPOINT);
            OpenAiProvider::with_timeout(endpoint, model, api_key, llm.timeout())?.into()
        }
        BackendKind::Ollama => {
            let endpoint = llm.endpoint.as_deref().unwrap_or(ollama::DEFAULT_ENDPOINT);
            OllamaProvider::with_timeout(endpoint, model, llm.timeout())?.into()
        }
    };
    info!(provider = %kind, model, "LLM backend ready");
    Ok(backend)
}

/// Load the input file and partition its trials.
///
/// Progress lines go to `progress`. A missing input file is reported there
/// and yields `None`.
pub fn load_catalog<O, W>(
    path: &Path,
    processor: &BatchProcessor<O>,
    progress: &mut W,
) -> Result<Option<TrialCatalog>>
where
    O: RelevanceOracle,
    W: Write,
{
    if !path.exists() {
        writeln!(
            progress,
            "JSON file not found at {}. Please check the path.",
            path.display()
        )?;
        return Ok(None);
    }

    writeln!(progress, "Loading JSON data...")?;
    let studies = load_studies(path)?;

    writeln!(progress, "Parsing trials...")?;
    let report = processor.process(&studies);
    if !report.dropped.is_empty() {
        info!(dropped = report.dropped.len(), "trials dropped during extraction");
    }
    writeln!(progress, "Total relevant trials parsed: {}", report.kept.len())?;

    Ok(Some(report.into_catalog()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use trialscope_extractor::ProcessorConfig;
    use trialscope_gatekeeper::{ExclusionRules, Gatekeeper};

    fn processor() -> BatchProcessor<impl Fn(&str, &str) -> bool> {
        BatchProcessor::new(
            Gatekeeper::new(ExclusionRules::default(), |_: &str, _: &str| true),
            ProcessorConfig::default(),
        )
    }

    #[test]
    fn test_missing_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctg-studies.json");
        let mut progress = Vec::<u8>::new();

        let catalog = load_catalog(&path, &processor(), &mut progress).unwrap();
        assert!(catalog.is_none());
        let text = String::from_utf8(progress).unwrap();
        assert_eq!(
            text,
            format!("JSON file not found at {}. Please check the path.\n", path.display())
        );
    }

    #[test]
    fn test_progress_lines() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"protocolSection": {{"identificationModule": {{"nctId": "NCT1", "briefTitle": "Back School"}}}}}},
                {{"protocolSection": {{"identificationModule": {{"nctId": "NCT2", "briefTitle": "Spinal Fusion"}}}}}}
            ]"#
        )
        .unwrap();
        let mut progress = Vec::<u8>::new();

        let catalog = load_catalog(file.path(), &processor(), &mut progress)
            .unwrap()
            .unwrap();
        assert_eq!(catalog.kept().len(), 1);
        assert_eq!(catalog.excluded().len(), 1);
        assert_eq!(
            String::from_utf8(progress).unwrap(),
            "Loading JSON data...\nParsing trials...\nTotal relevant trials parsed: 1\n"
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ broken").unwrap();
        let result = load_catalog(file.path(), &processor(), &mut Vec::<u8>::new());
        assert!(matches!(result, Err(CliError::Extractor(_))));
    }

    #[test]
    fn test_ollama_backend_needs_no_key() {
        let llm = LlmConfig {
            provider: "ollama".to_string(),
            ..LlmConfig::default()
        };
        let backend = build_backend(&llm, BackendKind::Ollama, "llama3").unwrap();
        assert_eq!(backend.model(), "llama3");
    }

    #[test]
    fn test_openai_backend_requires_key() {
        let llm = LlmConfig {
            api_key_env: "TRIALSCOPE_TEST_UNSET_KEY_VAR".to_string(),
            ..LlmConfig::default()
        };
        let result = build_backend(&llm, BackendKind::OpenAi, "gpt-4");
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
