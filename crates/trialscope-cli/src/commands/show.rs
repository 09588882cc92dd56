//! Show command implementation.

use super::trial_by_number;
use crate::cli::ShowArgs;
use crate::error::Result;
use crate::output::Formatter;
use std::io::Write;
use trialscope_domain::TrialCatalog;

/// Execute the show command.
pub fn execute_show<W: Write>(
    args: &ShowArgs,
    catalog: &TrialCatalog,
    formatter: &Formatter,
    out: &mut W,
) -> Result<()> {
    let record = trial_by_number(catalog, args.number)?;
    writeln!(out, "{}", formatter.trial(record)?)?;
    Ok(())
}
