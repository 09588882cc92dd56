//! TrialScope Domain Layer
//!
//! This crate contains the core data model for TrialScope. It has ZERO
//! external dependencies and defines the value objects, read-only query
//! operations, and trait interfaces that the other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **TrialRecord**: a flattened, display-ready view of one clinical study
//! - **ExclusionRecord**: a study that was filtered out, with its reason
//! - **TrialCatalog**: the kept/excluded partition produced by one run
//! - **Traits**: `LlmProvider` and `RelevanceOracle` seams for infrastructure
//!
//! ## Example
//!
//! ```
//! use trialscope_domain::{TrialCatalog, TrialRecord};
//!
//! let record = TrialRecord {
//!     nct_id: "NCT00000001".to_string(),
//!     title: "Lumbar Stenosis Exercise Study".to_string(),
//!     ..TrialRecord::default()
//! };
//! let catalog = TrialCatalog::new(vec![record], Vec::new());
//!
//! let listed: Vec<_> = catalog.list_kept().collect();
//! assert_eq!(listed, vec![(1, "Lumbar Stenosis Exercise Study")]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod exclusion;
pub mod traits;
pub mod trial;

// Re-exports for convenience
pub use catalog::{ExclusionGroup, KeywordMatch, SearchField, TrialCatalog};
pub use exclusion::{ExclusionReason, ExclusionRecord};
pub use trial::TrialRecord;
