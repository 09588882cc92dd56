//! TrialScope Extractor
//!
//! Turns a clinical-trial JSON export into the kept and excluded collections.
//!
//! # Architecture
//!
//! ```text
//! JSON file → load_studies → extract_trial → Gatekeeper → BatchReport → TrialCatalog
//! ```
//!
//! Loading, field extraction and batch processing are separate steps so each
//! can be exercised on its own. Extraction failures are per trial and never
//! abort a batch.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use trialscope_extractor::{BatchProcessor, ProcessorConfig};
//! use trialscope_gatekeeper::{ExclusionRules, Gatekeeper};
//!
//! let gatekeeper = Gatekeeper::new(ExclusionRules::default(), |_: &str, _: &str| true);
//! let processor = BatchProcessor::new(gatekeeper, ProcessorConfig::default());
//!
//! let studies = vec![json!({
//!     "protocolSection": {
//!         "identificationModule": { "nctId": "NCT00000001", "briefTitle": "Walking for Back Pain" }
//!     }
//! })];
//!
//! let catalog = processor.process(&studies).into_catalog();
//! assert_eq!(catalog.kept().len(), 1);
//! ```

#![warn(missing_docs)]

mod config;
mod document;
mod error;
mod fields;
mod processor;
mod types;

pub use config::{ExtractionFailurePolicy, ProcessorConfig};
pub use document::{load_studies, studies_from_value};
pub use error::ExtractorError;
pub use fields::{extract_trial, peek_nct_id, peek_title};
pub use processor::BatchProcessor;
pub use types::{BatchReport, DroppedTrial};
