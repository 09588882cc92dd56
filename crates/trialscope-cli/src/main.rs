//! TrialScope CLI - filter a clinical-trial export and explore what is left.

use clap::Parser;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;
use trialscope_cli::commands::{self, TrialAssistant};
use trialscope_cli::config::{Config, OutputFormat};
use trialscope_cli::pipeline;
use trialscope_cli::session::{EditorPrompter, Session};
use trialscope_cli::{Cli, Command, Formatter};
use trialscope_extractor::BatchProcessor;
use trialscope_gatekeeper::{Gatekeeper, LlmRelevanceOracle};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> trialscope_cli::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_create(cli.config.as_deref())?;
    config.apply_overrides(&cli);
    config.validate()?;

    let formatter = Formatter::new(config.settings.format, config.settings.color);
    let backend_kind = config.backend_kind()?;

    let relevance = pipeline::build_backend(&config.llm, backend_kind, &config.llm.relevance_model)?;
    let oracle = LlmRelevanceOracle::new(relevance).with_failure_policy(config.filter.oracle_failure);
    let gatekeeper = Gatekeeper::try_new(config.exclusion_rules(), oracle)?;
    let processor = BatchProcessor::new(gatekeeper, config.processor_config());

    // Keep JSON on stdout parseable
    let catalog = if config.settings.format == OutputFormat::Json {
        pipeline::load_catalog(&config.input.path, &processor, &mut io::stderr())?
    } else {
        pipeline::load_catalog(&config.input.path, &processor, &mut io::stdout())?
    };
    let Some(catalog) = catalog else {
        return Ok(());
    };

    let mut out = io::stdout().lock();
    let answer_backend =
        || pipeline::build_backend(&config.llm, backend_kind, &config.llm.answer_model);

    match cli.command {
        None | Some(Command::Repl) => {
            if catalog.kept().is_empty() {
                writeln!(out, "No relevant trials found.")?;
                return Ok(());
            }

            let assistant = TrialAssistant::new(answer_backend()?);
            let mut prompter =
                EditorPrompter::new(config.settings.history_size, Config::history_path().ok())?;
            let mut session = Session::new(&catalog, &assistant, &formatter, out);
            let result = session.run(&mut prompter);
            prompter.save_history();
            result?;
        }
        Some(Command::List) => commands::execute_list(&catalog, &formatter, &mut out)?,
        Some(Command::Excluded) => commands::execute_excluded(&catalog, &formatter, &mut out)?,
        Some(Command::Search(args)) => {
            commands::execute_search(&args, &catalog, &formatter, &mut out)?
        }
        Some(Command::Show(args)) => commands::execute_show(&args, &catalog, &formatter, &mut out)?,
        Some(Command::Ask(args)) => {
            let assistant = TrialAssistant::new(answer_backend()?);
            commands::execute_ask(&args, &catalog, &assistant, &formatter, &mut out)?;
        }
    }

    Ok(())
}
