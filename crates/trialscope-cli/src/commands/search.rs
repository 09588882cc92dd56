//! Search command implementation.

use crate::cli::SearchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::io::Write;
use trialscope_domain::TrialCatalog;

/// Execute the search command.
pub fn execute_search<W: Write>(
    args: &SearchArgs,
    catalog: &TrialCatalog,
    formatter: &Formatter,
    out: &mut W,
) -> Result<()> {
    if args.keyword.trim().is_empty() {
        return Err(CliError::InvalidInput("Please enter a valid keyword.".to_string()));
    }

    let matches = catalog.search(&args.keyword);
    writeln!(out, "{}", formatter.search_results(&args.keyword, &matches)?)?;
    Ok(())
}
