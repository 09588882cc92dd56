//! Field extraction from one trial document
//!
//! A trial document is a deeply nested JSON object whose shape is only
//! partially known. Missing keys (and JSON `null`) anywhere along a path
//! degrade to empty defaults; a value of the wrong JSON type is an error that
//! names the path.

use crate::ExtractorError;
use serde_json::Value;
use trialscope_domain::TrialRecord;

const CONDITION_SEPARATOR: &str = ", ";
const ENTRY_SEPARATOR: &str = "; ";
const MISSING_CONTACT_DETAIL: &str = "N/A";

/// Extract the flat record from one trial document
pub fn extract_trial(trial: &Value) -> Result<TrialRecord, ExtractorError> {
    let root = Node::root(trial).require_object()?;
    let protocol = root.child("protocolSection")?;

    let identification = protocol.child("identificationModule")?;
    let status = protocol.child("statusModule")?;
    let description = protocol.child("descriptionModule")?;
    let conditions = protocol.child("conditionsModule")?;
    let contacts_locations = protocol.child("contactsLocationsModule")?;
    let eligibility = protocol.child("eligibilityModule")?;

    Ok(TrialRecord {
        nct_id: identification.child("nctId")?.text()?,
        title: identification.child("briefTitle")?.text()?,
        status: status.child("overallStatus")?.text()?,
        start_date: status.child("startDateStruct")?.child("date")?.text()?,
        primary_completion_date: status
            .child("primaryCompletionDateStruct")?
            .child("date")?
            .text()?,
        brief_summary: description.child("briefSummary")?.text()?,
        conditions: join_conditions(&conditions.child("conditions")?)?,
        contact_info: join_contacts(&contacts_locations.child("centralContacts")?)?,
        location: join_locations(&contacts_locations.child("locations")?)?,
        eligibility_criteria: eligibility.child("eligibilityCriteria")?.text()?,
    })
}

/// Best-effort identifier lookup, for logging documents that failed extraction
pub fn peek_nct_id(trial: &Value) -> Option<String> {
    trial
        .pointer("/protocolSection/identificationModule/nctId")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Best-effort title lookup for documents that failed extraction
pub fn peek_title(trial: &Value) -> Option<String> {
    trial
        .pointer("/protocolSection/identificationModule/briefTitle")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn join_conditions(list: &Node<'_>) -> Result<String, ExtractorError> {
    let conditions = list
        .items()?
        .iter()
        .map(Node::require_text)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(conditions.join(CONDITION_SEPARATOR))
}

/// `name (role): phone / email` per contact
fn join_contacts(list: &Node<'_>) -> Result<String, ExtractorError> {
    let mut entries = Vec::new();
    for item in list.items()? {
        let contact = item.require_object()?;
        entries.push(format!(
            "{} ({}): {} / {}",
            contact.child("name")?.scalar_or("")?,
            contact.child("role")?.scalar_or("")?,
            contact.child("phone")?.scalar_or(MISSING_CONTACT_DETAIL)?,
            contact.child("email")?.scalar_or(MISSING_CONTACT_DETAIL)?,
        ));
    }
    Ok(entries.join(ENTRY_SEPARATOR))
}

/// `facility, city, state, country` per location
fn join_locations(list: &Node<'_>) -> Result<String, ExtractorError> {
    let mut entries = Vec::new();
    for item in list.items()? {
        let location = item.require_object()?;
        entries.push(format!(
            "{}, {}, {}, {}",
            location.child("facility")?.scalar_or("")?,
            location.child("city")?.scalar_or("")?,
            location.child("state")?.scalar_or("")?,
            location.child("country")?.scalar_or("")?,
        ));
    }
    Ok(entries.join(ENTRY_SEPARATOR))
}

/// A possibly-absent position in the document, with its path for errors
#[derive(Debug, Clone)]
struct Node<'a> {
    value: Option<&'a Value>,
    path: String,
}

impl<'a> Node<'a> {
    fn root(value: &'a Value) -> Self {
        Self {
            value: Some(value),
            path: "$".to_string(),
        }
    }

    /// Present, non-null value
    fn present(&self) -> Option<&'a Value> {
        self.value.filter(|v| !v.is_null())
    }

    fn mismatch(&self, expected: &'static str, found: &Value) -> ExtractorError {
        ExtractorError::UnexpectedType {
            path: self.path.clone(),
            expected,
            found: type_name(found),
        }
    }

    /// Descend into an object key; absent parents give absent children
    fn child(&self, key: &str) -> Result<Node<'a>, ExtractorError> {
        let path = format!("{}.{}", self.path, key);
        match self.present() {
            None => Ok(Node { value: None, path }),
            Some(Value::Object(map)) => Ok(Node {
                value: map.get(key),
                path,
            }),
            Some(other) => Err(self.mismatch("object", other)),
        }
    }

    /// Fail unless this is an object (absent and null included)
    fn require_object(&self) -> Result<Node<'a>, ExtractorError> {
        match self.value {
            Some(Value::Object(_)) => Ok(self.clone()),
            Some(other) => Err(self.mismatch("object", other)),
            None => Err(self.mismatch("object", &Value::Null)),
        }
    }

    /// String value, or empty when absent
    fn text(&self) -> Result<String, ExtractorError> {
        match self.present() {
            None => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(self.mismatch("string", other)),
        }
    }

    /// String value; absent or null is an error
    fn require_text(&self) -> Result<String, ExtractorError> {
        match self.value {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(self.mismatch("string", other)),
            None => Err(self.mismatch("string", &Value::Null)),
        }
    }

    /// Any scalar rendered as text, or `default` when absent
    fn scalar_or(&self, default: &str) -> Result<String, ExtractorError> {
        match self.present() {
            None => Ok(default.to_string()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(other) => Err(self.mismatch("scalar", other)),
        }
    }

    /// Array elements, or none when absent
    fn items(&self) -> Result<Vec<Node<'a>>, ExtractorError> {
        match self.present() {
            None => Ok(Vec::new()),
            Some(Value::Array(values)) => Ok(values
                .iter()
                .enumerate()
                .map(|(idx, value)| Node {
                    value: Some(value),
                    path: format!("{}[{}]", self.path, idx),
                })
                .collect()),
            Some(other) => Err(self.mismatch("array", other)),
        }
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
