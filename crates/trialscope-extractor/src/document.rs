//! Input document loading

use crate::ExtractorError;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read and parse the input file, returning the trial documents it holds
pub fn load_studies(path: &Path) -> Result<Vec<Value>, ExtractorError> {
    if !path.exists() {
        return Err(ExtractorError::InputNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&text)?;
    let studies = studies_from_value(document);
    debug!(path = %path.display(), count = studies.len(), "loaded studies");
    Ok(studies)
}

/// Pull the trial list out of a parsed document
///
/// Accepts the `FullStudiesResponse.FullStudies` envelope or a bare array.
/// Any other shape is logged and yields no trials.
pub fn studies_from_value(document: Value) -> Vec<Value> {
    match document {
        Value::Array(studies) => studies,
        Value::Object(mut map) => {
            let studies = map
                .remove("FullStudiesResponse")
                .and_then(|mut response| response.get_mut("FullStudies").map(Value::take));
            match studies {
                Some(Value::Array(studies)) => studies,
                _ => {
                    warn!("Unexpected JSON structure: no FullStudiesResponse.FullStudies list");
                    Vec::new()
                }
            }
        }
        other => {
            warn!(found = crate::fields::type_name(&other), "Unexpected JSON structure at top level");
            Vec::new()
        }
    }
}
