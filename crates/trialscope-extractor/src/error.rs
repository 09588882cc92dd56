//! Error types for the Extractor

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during loading and extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Input file does not exist
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// I/O error while reading the input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// A field had a different JSON type than expected
    #[error("Unexpected type at '{path}': expected {expected}, found {found}")]
    UnexpectedType {
        /// Dotted path of the offending value
        path: String,
        /// Expected JSON type
        expected: &'static str,
        /// Actual JSON type
        found: &'static str,
    },
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
