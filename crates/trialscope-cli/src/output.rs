//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style, Width},
};
use trialscope_domain::{KeywordMatch, TrialCatalog, TrialRecord};

const TABLE_TITLE_WIDTH: usize = 60;
const TABLE_VALUE_WIDTH: usize = 80;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the numbered list of kept trials.
    pub fn trial_list(&self, catalog: &TrialCatalog) -> Result<String> {
        match self.format {
            OutputFormat::Plain => {
                let mut out = self.heading("List of Relevant Clinical Trials:");
                for (number, title) in catalog.list_kept() {
                    out.push_str(&format!("\n{}. {}", number, title));
                }
                Ok(out)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["#", "NCTId", "Title"]);
                for (idx, record) in catalog.kept().iter().enumerate() {
                    builder.push_record([
                        (idx + 1).to_string(),
                        record.nct_id.clone(),
                        record.title.clone(),
                    ]);
                }
                Ok(self.table(builder, TABLE_TITLE_WIDTH))
            }
            OutputFormat::Json => {
                let trials: Vec<serde_json::Value> = catalog
                    .kept()
                    .iter()
                    .enumerate()
                    .map(|(idx, record)| {
                        json!({
                            "number": idx + 1,
                            "nct_id": record.nct_id,
                            "title": record.title,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&trials)?)
            }
        }
    }

    /// Format the excluded trials grouped by reason.
    pub fn exclusions(&self, catalog: &TrialCatalog) -> Result<String> {
        let groups = catalog.excluded_by_reason();

        match self.format {
            OutputFormat::Plain => {
                if groups.is_empty() {
                    return Ok(self.colorize("No trials were excluded.", "yellow"));
                }
                let mut out = self.heading("List of Excluded Trials by Reason:");
                for group in &groups {
                    out.push_str(&format!("\n\n{}", self.colorize(&format!("Reason: {}", group.reason), "magenta")));
                    for member in &group.members {
                        out.push_str(&format!("\n- {} (NCTId: {})", member.title, member.nct_id));
                    }
                }
                Ok(out)
            }
            OutputFormat::Table => {
                if groups.is_empty() {
                    return Ok(self.colorize("No trials were excluded.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Reason", "NCTId", "Title"]);
                for group in &groups {
                    for member in &group.members {
                        builder.push_record([
                            group.reason.as_str(),
                            member.nct_id.as_str(),
                            member.title.as_str(),
                        ]);
                    }
                }
                Ok(self.table(builder, TABLE_TITLE_WIDTH))
            }
            OutputFormat::Json => {
                let groups: Vec<serde_json::Value> = groups
                    .iter()
                    .map(|group| {
                        json!({
                            "reason": group.reason,
                            "trials": group.members.iter().map(|m| json!({
                                "nct_id": m.nct_id,
                                "title": m.title,
                            })).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&groups)?)
            }
        }
    }

    /// Format keyword search results.
    ///
    /// The keyword is echoed lowercased, the form it is matched in.
    pub fn search_results(&self, keyword: &str, matches: &[KeywordMatch<'_>]) -> Result<String> {
        let keyword = keyword.to_lowercase();

        match self.format {
            OutputFormat::Plain | OutputFormat::Table if matches.is_empty() => Ok(self.colorize(
                &format!("No trials found containing the keyword '{}'.", keyword),
                "yellow",
            )),
            OutputFormat::Plain => {
                let mut out = self.heading(&format!("Trials containing the keyword '{}':", keyword));
                for found in matches {
                    out.push_str(&format!(
                        "\n{}. {} (NCTId: {})",
                        found.position, found.record.title, found.record.nct_id
                    ));
                    for field in &found.fields {
                        out.push_str(&format!("\n  * Found in {}", field));
                    }
                }
                Ok(out)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["#", "NCTId", "Title", "Found In"]);
                for found in matches {
                    let fields: Vec<&str> = found.fields.iter().map(|f| f.label()).collect();
                    builder.push_record([
                        found.position.to_string(),
                        found.record.nct_id.clone(),
                        found.record.title.clone(),
                        fields.join(", "),
                    ]);
                }
                Ok(self.table(builder, TABLE_TITLE_WIDTH))
            }
            OutputFormat::Json => {
                let results: Vec<serde_json::Value> = matches
                    .iter()
                    .map(|found| {
                        json!({
                            "number": found.position,
                            "nct_id": found.record.nct_id,
                            "title": found.record.title,
                            "found_in": found.fields.iter().map(|f| f.label()).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "keyword": keyword,
                    "matches": results,
                }))?)
            }
        }
    }

    /// Format the full record of one trial.
    pub fn trial(&self, record: &TrialRecord) -> Result<String> {
        match self.format {
            OutputFormat::Plain => Ok(record.render()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (label, value) in record.labelled_fields() {
                    builder.push_record([label, value]);
                }
                Ok(self.table(builder, TABLE_VALUE_WIDTH))
            }
            OutputFormat::Json => {
                let fields: serde_json::Map<String, serde_json::Value> = record
                    .labelled_fields()
                    .into_iter()
                    .map(|(label, value)| (label.to_string(), json!(value)))
                    .collect();
                Ok(serde_json::to_string_pretty(&fields)?)
            }
        }
    }

    /// Format an answer from the assistant.
    pub fn answer(&self, question: &str, answer: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "question": question,
                "answer": answer,
            }))?),
            _ => Ok(format!("{}\n{}", self.heading("ChatGPT Response:"), answer)),
        }
    }

    /// Format a section heading.
    pub fn heading(&self, text: &str) -> String {
        self.colorize(text, "cyan")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(message, "yellow")
    }

    fn table(&self, builder: Builder, wrap_width: usize) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Width::wrap(wrap_width)))
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}
