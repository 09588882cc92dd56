//! TrialScope Gatekeeper
//!
//! Decides which trials are kept for exploration and which are excluded.
//!
//! The Gatekeeper provides:
//! - Ordered keyword rules over a trial's title and summary
//! - A relevance oracle fallback for titles that look off-topic
//! - An LLM-backed oracle adapter with a configurable failure policy
//!
//! # Examples
//!
//! ```
//! use trialscope_gatekeeper::{ExclusionRules, Gatekeeper, Verdict};
//!
//! // Any `Fn(&str, &str) -> bool` can stand in for the relevance oracle
//! let gatekeeper = Gatekeeper::new(ExclusionRules::default(), |_: &str, _: &str| true);
//!
//! let verdict = gatekeeper.classify("Lumbar Fusion Outcomes", "");
//! assert!(matches!(verdict, Verdict::Exclude(_)));
//! assert_eq!(gatekeeper.classify("Yoga for Low Back Pain", ""), Verdict::Keep);
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod oracle;
mod prompt;

pub use classifier::{Gatekeeper, Screening, Verdict};
pub use config::{ExclusionRules, OracleFailurePolicy};
pub use error::GatekeeperError;
pub use oracle::LlmRelevanceOracle;
pub use prompt::{relevance_prompt, RELEVANCE_SYSTEM_PROMPT};
