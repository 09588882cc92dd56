//! Catalog module - read-only queries over one run's kept/excluded partition

use crate::{ExclusionRecord, TrialRecord};
use std::fmt;

/// The two disjoint collections produced by one filtering run.
///
/// Both collections keep input order and are never mutated after
/// construction; every query re-derives its result from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrialCatalog {
    kept: Vec<TrialRecord>,
    excluded: Vec<ExclusionRecord>,
}

/// A searchable field of a kept trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// The brief title
    Title,
    /// The brief summary
    BriefSummary,
    /// The joined conditions
    Conditions,
}

impl SearchField {
    /// All searchable fields, in reporting order
    pub const ALL: [SearchField; 3] = [
        SearchField::Title,
        SearchField::BriefSummary,
        SearchField::Conditions,
    ];

    /// Display label of the field
    pub fn label(&self) -> &'static str {
        match self {
            SearchField::Title => "Title",
            SearchField::BriefSummary => "Brief Summary",
            SearchField::Conditions => "Conditions",
        }
    }

    fn value<'a>(&self, record: &'a TrialRecord) -> &'a str {
        match self {
            SearchField::Title => &record.title,
            SearchField::BriefSummary => &record.brief_summary,
            SearchField::Conditions => &record.conditions,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One kept trial that matched a keyword search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch<'a> {
    /// 1-based position in the kept list (same numbering as `list_kept`)
    pub position: usize,

    /// The matching trial
    pub record: &'a TrialRecord,

    /// Every field the keyword was found in, in `SearchField::ALL` order
    pub fields: Vec<SearchField>,
}

/// Excluded trials sharing one reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionGroup<'a> {
    /// Reason text shared by all members
    pub reason: String,

    /// Members in original order
    pub members: Vec<&'a ExclusionRecord>,
}

impl TrialCatalog {
    /// Create a catalog from the kept and excluded collections
    pub fn new(kept: Vec<TrialRecord>, excluded: Vec<ExclusionRecord>) -> Self {
        Self { kept, excluded }
    }

    /// Kept trials in stored order
    pub fn kept(&self) -> &[TrialRecord] {
        &self.kept
    }

    /// Excluded trials in stored order
    pub fn excluded(&self) -> &[ExclusionRecord] {
        &self.excluded
    }

    /// Get a kept trial by 0-based index
    pub fn get(&self, index: usize) -> Option<&TrialRecord> {
        self.kept.get(index)
    }

    /// Lazily list the kept trials as `(1-based index, title)` pairs.
    ///
    /// The iterator borrows the catalog and can be re-created at any time.
    pub fn list_kept(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.kept
            .iter()
            .enumerate()
            .map(|(idx, record)| (idx + 1, record.title.as_str()))
    }

    /// Render the full record at a 0-based index
    pub fn render(&self, index: usize) -> Option<String> {
        self.kept.get(index).map(TrialRecord::render)
    }

    /// Case-insensitive substring search over title, summary and conditions.
    ///
    /// Each field is checked independently, so one trial reports every field
    /// that contains the keyword.
    pub fn search(&self, keyword: &str) -> Vec<KeywordMatch<'_>> {
        let needle = keyword.to_lowercase();

        self.kept
            .iter()
            .enumerate()
            .filter_map(|(idx, record)| {
                let fields: Vec<SearchField> = SearchField::ALL
                    .into_iter()
                    .filter(|field| field.value(record).to_lowercase().contains(&needle))
                    .collect();

                if fields.is_empty() {
                    None
                } else {
                    Some(KeywordMatch {
                        position: idx + 1,
                        record,
                        fields,
                    })
                }
            })
            .collect()
    }

    /// Group excluded trials by reason, in first-seen reason order
    pub fn excluded_by_reason(&self) -> Vec<ExclusionGroup<'_>> {
        let mut groups: Vec<ExclusionGroup<'_>> = Vec::new();

        for record in &self.excluded {
            let reason = record.reason.to_string();
            match groups.iter_mut().find(|g| g.reason == reason) {
                Some(group) => group.members.push(record),
                None => groups.push(ExclusionGroup {
                    reason,
                    members: vec![record],
                }),
            }
        }

        groups
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn record_strategy() -> impl Strategy<Value = TrialRecord> {
        ("[a-zA-Z ]{0,20}", "[a-zA-Z ]{0,20}", "[a-zA-Z ]{0,20}").prop_map(|(title, summary, conditions)| {
            TrialRecord {
                title,
                brief_summary: summary,
                conditions,
                ..TrialRecord::default()
            }
        })
    }

    proptest! {
        /// Property: search is case-insensitive in the keyword
        #[test]
        fn test_search_case_insensitive(
            records in prop::collection::vec(record_strategy(), 0..8),
            keyword in "[a-z]{1,4}",
        ) {
            let catalog = TrialCatalog::new(records, Vec::new());
            let lower: Vec<_> = catalog.search(&keyword).iter().map(|m| m.position).collect();
            let upper: Vec<_> = catalog.search(&keyword.to_uppercase()).iter().map(|m| m.position).collect();
            prop_assert_eq!(lower, upper);
        }

        /// Property: positions are strictly increasing and within the kept list
        #[test]
        fn test_search_positions_in_range(
            records in prop::collection::vec(record_strategy(), 0..8),
            keyword in "[a-z]{1,2}",
        ) {
            let catalog = TrialCatalog::new(records, Vec::new());
            let positions: Vec<_> = catalog.search(&keyword).iter().map(|m| m.position).collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(positions.iter().all(|p| *p >= 1 && *p <= catalog.kept().len()));
        }
    }
}
