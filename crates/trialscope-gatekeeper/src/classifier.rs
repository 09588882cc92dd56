//! Exclusion rule evaluation

use crate::{ExclusionRules, GatekeeperError};
use trialscope_domain::traits::RelevanceOracle;
use trialscope_domain::ExclusionReason;

/// Final decision for one trial
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The trial goes into the kept collection
    Keep,

    /// The trial goes into the excluded collection
    Exclude(ExclusionReason),
}

impl Verdict {
    /// Whether the trial is kept
    pub fn is_keep(&self) -> bool {
        matches!(self, Verdict::Keep)
    }
}

/// Outcome of the deterministic keyword rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening {
    /// No rule matched
    Clear,

    /// A keyword rule excluded the trial
    Excluded(ExclusionReason),

    /// The title looks off-topic; the relevance oracle decides
    NeedsReview,
}

/// The Gatekeeper classifies trials as kept or excluded
///
/// Rules run in a fixed order and the first match wins:
/// 1. denylisted title term
/// 2. other-region title term without the focus term in title or summary
/// 3. suspect title term, confirmed irrelevant by the oracle
pub struct Gatekeeper<O> {
    rules: ExclusionRules,
    oracle: O,
}

impl<O: RelevanceOracle> Gatekeeper<O> {
    /// Create a new Gatekeeper.
    ///
    /// Rules are lowercased once here; pass them through
    /// `ExclusionRules::validate` (or use `try_new`) when they come from
    /// user configuration.
    pub fn new(rules: ExclusionRules, oracle: O) -> Self {
        Self {
            rules: rules.normalized(),
            oracle,
        }
    }

    /// Create a new Gatekeeper after validating the rules
    pub fn try_new(rules: ExclusionRules, oracle: O) -> Result<Self, GatekeeperError> {
        rules.validate()?;
        Ok(Self::new(rules, oracle))
    }

    /// Apply the keyword rules only. Pure; never consults the oracle.
    pub fn screen(&self, title: &str, summary: &str) -> Screening {
        let title = title.to_lowercase();
        let summary = summary.to_lowercase();
        let rules = &self.rules;

        if contains_any(&title, &rules.denied_title_terms) {
            return Screening::Excluded(ExclusionReason::TitleDenylist {
                terms: rules.denied_title_terms.clone(),
            });
        }

        if contains_any(&title, &rules.other_region_terms)
            && !title.contains(&rules.focus_region_term)
            && !summary.contains(&rules.focus_region_term)
        {
            return Screening::Excluded(ExclusionReason::RegionOnly);
        }

        if contains_any(&title, &rules.suspect_title_terms) {
            return Screening::NeedsReview;
        }

        Screening::Clear
    }

    /// Classify one trial, asking the oracle only when the title is suspect
    pub fn classify(&self, title: &str, summary: &str) -> Verdict {
        match self.screen(title, summary) {
            Screening::Clear => Verdict::Keep,
            Screening::Excluded(reason) => Verdict::Exclude(reason),
            Screening::NeedsReview => {
                if self.oracle.is_relevant(title, summary) {
                    Verdict::Keep
                } else {
                    Verdict::Exclude(ExclusionReason::DeemedIrrelevant)
                }
            }
        }
    }
}

fn contains_any(text: &str, terms: &[String]) -> bool {
    terms.iter().any(|term| text.contains(term.as_str()))
}
