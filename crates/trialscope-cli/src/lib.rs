//! TrialScope CLI library.
//!
//! This library provides the pieces of the `trialscope` binary: argument
//! parsing, configuration, output formatting, the one-shot commands and the
//! interactive menu session.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod session;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
