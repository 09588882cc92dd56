//! List command implementation.

use crate::error::Result;
use crate::output::Formatter;
use std::io::Write;
use trialscope_domain::TrialCatalog;

/// Execute the list command.
pub fn execute_list<W: Write>(catalog: &TrialCatalog, formatter: &Formatter, out: &mut W) -> Result<()> {
    writeln!(out, "{}", formatter.trial_list(catalog)?)?;
    Ok(())
}
