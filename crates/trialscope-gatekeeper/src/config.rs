//! Gatekeeper configuration

use crate::GatekeeperError;
use serde::{Deserialize, Serialize};

/// Term lists driving the exclusion rules
///
/// All matching is case-insensitive substring matching; terms are stored
/// lowercase by `normalized`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionRules {
    /// Title terms that exclude a trial outright (procedure-focused studies)
    pub denied_title_terms: Vec<String>,

    /// Title terms naming spinal regions outside the research focus
    pub other_region_terms: Vec<String>,

    /// Term in title or summary that rescues an other-region trial
    pub focus_region_term: String,

    /// Title terms that trigger the relevance oracle
    pub suspect_title_terms: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            denied_title_terms: to_strings(&["fusion", "surgery", "screw", "discectomy"]),
            other_region_terms: to_strings(&["cervical", "thoracic"]),
            focus_region_term: "lumbar".to_string(),
            suspect_title_terms: to_strings(&[
                "diabetic",
                "eye",
                "hearing",
                "pulmonary",
                "cardiac",
                "psych",
                "dermatology",
            ]),
        }
    }
}

fn to_strings(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

fn lowercase_all(terms: &[String]) -> Vec<String> {
    terms.iter().map(|t| t.trim().to_lowercase()).collect()
}

impl ExclusionRules {
    /// Validate the rules
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        let lists = [
            ("denied_title_terms", &self.denied_title_terms),
            ("other_region_terms", &self.other_region_terms),
            ("suspect_title_terms", &self.suspect_title_terms),
        ];

        for (name, terms) in lists {
            if terms.is_empty() {
                return Err(GatekeeperError::Config(format!("{} must not be empty", name)));
            }
            if terms.iter().any(|t| t.trim().is_empty()) {
                return Err(GatekeeperError::Config(format!("{} contains a blank term", name)));
            }
        }

        if self.focus_region_term.trim().is_empty() {
            return Err(GatekeeperError::Config(
                "focus_region_term must not be blank".to_string(),
            ));
        }

        Ok(())
    }

    /// Lowercased copy, used for matching against lowercased text
    pub fn normalized(&self) -> Self {
        Self {
            denied_title_terms: lowercase_all(&self.denied_title_terms),
            other_region_terms: lowercase_all(&self.other_region_terms),
            focus_region_term: self.focus_region_term.trim().to_lowercase(),
            suspect_title_terms: lowercase_all(&self.suspect_title_terms),
        }
    }
}

/// What the relevance oracle answers when the language model cannot be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OracleFailurePolicy {
    /// Treat the trial as relevant (it stays in the kept set)
    #[default]
    FailOpen,

    /// Treat the trial as irrelevant (it is excluded)
    FailClosed,
}

impl OracleFailurePolicy {
    /// Relevance to report when the check could not be completed
    pub fn fallback(&self) -> bool {
        matches!(self, OracleFailurePolicy::FailOpen)
    }
}
