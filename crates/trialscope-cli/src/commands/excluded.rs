//! Excluded command implementation.

use crate::error::Result;
use crate::output::Formatter;
use std::io::Write;
use trialscope_domain::TrialCatalog;

/// Execute the excluded command.
pub fn execute_excluded<W: Write>(
    catalog: &TrialCatalog,
    formatter: &Formatter,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", formatter.exclusions(catalog)?)?;
    Ok(())
}
