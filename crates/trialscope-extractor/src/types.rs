//! Batch results

use trialscope_domain::{ExclusionRecord, TrialCatalog, TrialRecord};

/// A trial that failed extraction and was left out of both collections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedTrial {
    /// Identifier, when one could be read from the document
    pub nct_id: Option<String>,

    /// Extraction error message
    pub error: String,
}

/// Outcome of one batch run
///
/// Every input document lands in exactly one of `kept`, `excluded` or
/// `dropped`, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Trials that passed the exclusion rules
    pub kept: Vec<TrialRecord>,

    /// Trials excluded, with their reasons
    pub excluded: Vec<ExclusionRecord>,

    /// Trials that failed extraction under the drop policy
    pub dropped: Vec<DroppedTrial>,

    /// Number of input documents
    pub total: usize,
}

impl BatchReport {
    /// Whether every input document is accounted for
    pub fn is_balanced(&self) -> bool {
        self.kept.len() + self.excluded.len() + self.dropped.len() == self.total
    }

    /// Hand the kept and excluded collections over to the query layer
    pub fn into_catalog(self) -> TrialCatalog {
        TrialCatalog::new(self.kept, self.excluded)
    }
}
