//! Exclusion module - audit records for filtered-out trials

use std::fmt;

/// Why a trial was excluded from the kept collection.
///
/// `Display` renders the human-readable text shown in the excluded listing.
/// Grouping is done on that text, so two reasons with equal text belong to
/// the same group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExclusionReason {
    /// Title contains one of the denylisted procedure terms
    TitleDenylist {
        /// The configured denylist, in the order it is reported
        terms: Vec<String>,
    },

    /// Title names only the cervical or thoracic spine
    RegionOnly,

    /// The relevance oracle judged the trial off-topic
    DeemedIrrelevant,

    /// The source document could not be extracted (audit policy only)
    ///
    /// The error text is carried for callers but not rendered, so every
    /// failed document lands in one group.
    ExtractionFailed {
        /// Extraction error message
        detail: String,
    },
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::TitleDenylist { terms } => {
                write!(f, "Title contains {}", quoted_list(terms))
            }
            ExclusionReason::RegionOnly => f.write_str("Only targets cervical or thoracic spine"),
            ExclusionReason::DeemedIrrelevant => f.write_str("Deemed irrelevant by AI"),
            ExclusionReason::ExtractionFailed { .. } => f.write_str("Extraction failed"),
        }
    }
}

/// `'a'`, `'a' or 'b'`, `'a', 'b', or 'c'`
fn quoted_list(terms: &[String]) -> String {
    let quoted: Vec<String> = terms.iter().map(|t| format!("'{}'", t)).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} or {}", first, second),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

/// A trial that was filtered out, kept for the audit listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRecord {
    /// ClinicalTrials.gov identifier (may be empty)
    pub nct_id: String,

    /// Brief title (may be empty)
    pub title: String,

    /// Why the trial was excluded
    pub reason: ExclusionReason,
}

impl ExclusionRecord {
    /// Create a new exclusion record
    pub fn new(nct_id: impl Into<String>, title: impl Into<String>, reason: ExclusionReason) -> Self {
        Self {
            nct_id: nct_id.into(),
            title: title.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_denylist_text() {
        let reason = ExclusionReason::TitleDenylist {
            terms: terms(&["fusion", "surgery", "screw", "discectomy"]),
        };
        assert_eq!(
            reason.to_string(),
            "Title contains 'fusion', 'surgery', 'screw', or 'discectomy'"
        );
    }

    #[test]
    fn test_short_denylists() {
        let one = ExclusionReason::TitleDenylist { terms: terms(&["fusion"]) };
        assert_eq!(one.to_string(), "Title contains 'fusion'");

        let two = ExclusionReason::TitleDenylist { terms: terms(&["fusion", "screw"]) };
        assert_eq!(two.to_string(), "Title contains 'fusion' or 'screw'");
    }

    #[test]
    fn test_fixed_reason_texts() {
        assert_eq!(
            ExclusionReason::RegionOnly.to_string(),
            "Only targets cervical or thoracic spine"
        );
        assert_eq!(
            ExclusionReason::DeemedIrrelevant.to_string(),
            "Deemed irrelevant by AI"
        );
        let failed = ExclusionReason::ExtractionFailed {
            detail: "bad type".to_string(),
        };
        assert_eq!(failed.to_string(), "Extraction failed");

        let other = ExclusionReason::ExtractionFailed {
            detail: "missing path".to_string(),
        };
        assert_eq!(failed.to_string(), other.to_string());
    }
}
