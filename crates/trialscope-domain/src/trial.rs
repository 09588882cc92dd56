//! Trial module - the flattened record kept for exploration

use std::fmt;

/// A clinical trial that passed the exclusion rules.
///
/// Every field is a plain display string. Absent source data is represented
/// by an empty string, never by a missing value, so the record can be
/// rendered and searched without further checks. Records are never mutated
/// after extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrialRecord {
    /// ClinicalTrials.gov identifier (expected unique, not enforced)
    pub nct_id: String,

    /// Brief title
    pub title: String,

    /// Overall recruitment status
    pub status: String,

    /// Study start date as written in the source
    pub start_date: String,

    /// Primary completion date as written in the source
    pub primary_completion_date: String,

    /// Brief summary text
    pub brief_summary: String,

    /// Conditions, joined with `", "`
    pub conditions: String,

    /// Central contacts, each `name (role): phone / email`, joined with `"; "`
    pub contact_info: String,

    /// Locations, each `facility, city, state, country`, joined with `"; "`
    pub location: String,

    /// Free-text eligibility criteria
    pub eligibility_criteria: String,
}

impl TrialRecord {
    /// Render the full record as the fixed multi-line text block.
    ///
    /// The same text is shown to the user and sent to the language model as
    /// question-answering context.
    ///
    /// # Examples
    ///
    /// ```
    /// use trialscope_domain::TrialRecord;
    ///
    /// let record = TrialRecord {
    ///     nct_id: "NCT1".to_string(),
    ///     ..TrialRecord::default()
    /// };
    /// let text = record.render();
    /// assert!(text.starts_with("NCTId: NCT1\nTitle: \n"));
    /// assert!(text.ends_with("Eligibility Criteria: \n"));
    /// ```
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Labelled fields in display order
    pub fn labelled_fields(&self) -> [(&'static str, &str); 10] {
        [
            ("NCTId", &self.nct_id),
            ("Title", &self.title),
            ("Status", &self.status),
            ("Start Date", &self.start_date),
            ("Primary Completion Date", &self.primary_completion_date),
            ("Brief Summary", &self.brief_summary),
            ("Conditions", &self.conditions),
            ("Contact Info", &self.contact_info),
            ("Location", &self.location),
            ("Eligibility Criteria", &self.eligibility_criteria),
        ]
    }
}

impl fmt::Display for TrialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.labelled_fields() {
            writeln!(f, "{}: {}", label, value)?;
        }
        Ok(())
    }
}
