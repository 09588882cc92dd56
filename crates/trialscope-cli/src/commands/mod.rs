//! Command implementations.
//!
//! Each one-shot subcommand writes its output to the given writer so the
//! interactive session and the tests can reuse it.

pub mod ask;
pub mod excluded;
pub mod list;
pub mod search;
pub mod show;

pub use self::ask::{execute_ask, TrialAssistant};
pub use self::excluded::execute_excluded;
pub use self::list::execute_list;
pub use self::search::execute_search;
pub use self::show::execute_show;

use crate::error::{CliError, Result};
use trialscope_domain::{TrialCatalog, TrialRecord};

/// Look up a kept trial by its 1-based list number.
pub(crate) fn trial_by_number(catalog: &TrialCatalog, number: usize) -> Result<&TrialRecord> {
    number
        .checked_sub(1)
        .and_then(|idx| catalog.get(idx))
        .ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Trial number must be between 1 and {}, got {}",
                catalog.kept().len(),
                number
            ))
        })
}
