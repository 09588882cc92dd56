//! Configuration for the Batch Processor

use serde::{Deserialize, Serialize};

/// What happens to a trial whose document cannot be extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionFailurePolicy {
    /// Log it and leave it out of both collections
    #[default]
    Drop,

    /// Log it and list it as excluded with the extraction error as reason
    Audit,
}

/// Configuration for the Batch Processor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Handling of per-trial extraction failures
    #[serde(default)]
    pub extraction_failure: ExtractionFailurePolicy,
}

impl ProcessorConfig {
    /// Configuration that audits extraction failures instead of dropping them
    pub fn audited() -> Self {
        Self {
            extraction_failure: ExtractionFailurePolicy::Audit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_drops_failures() {
        assert_eq!(
            ProcessorConfig::default().extraction_failure,
            ExtractionFailurePolicy::Drop
        );
    }

    #[test]
    fn test_from_toml() {
        let config: ProcessorConfig = toml::from_str(r#"extraction_failure = "audit""#).unwrap();
        assert_eq!(config, ProcessorConfig::audited());

        let config: ProcessorConfig = toml::from_str("").unwrap();
        assert_eq!(config, ProcessorConfig::default());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(toml::from_str::<ProcessorConfig>(r#"extraction_failure = "ignore""#).is_err());
    }

    #[test]
    fn test_toml_output_names_policy() {
        let text = toml::to_string(&ProcessorConfig::audited()).unwrap();
        assert!(text.contains(r#"extraction_failure = "audit""#));
    }
}
