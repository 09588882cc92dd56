//! Interactive menu session.
//!
//! A blocking loop over the main menu. Line input comes from a [`Prompter`]
//! (the rustyline editor in production, scripted lines in tests) and all
//! output goes to one writer. The trial selected for Q&A is an explicit
//! value carried by the loop.

use crate::commands::TrialAssistant;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config as EditorConfig, Editor};
use std::collections::VecDeque;
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};
use trialscope_domain::traits::LlmProvider;
use trialscope_domain::TrialCatalog;

/// Main menu prompt
pub const MENU_PROMPT: &str = "Enter the number to choose an option, or type 'exit' to leave: ";
/// Trial selection prompt
pub const TRIAL_PROMPT: &str =
    "Enter the number of the trial to view its information (or press Enter to return to the main menu): ";
/// Q&A prompt
pub const QUESTION_PROMPT: &str =
    "Ask a question about this trial or type 'back' to return to the main menu: ";
/// Keyword prompt
pub const KEYWORD_PROMPT: &str = "Enter a keyword to search for: ";
/// Pause after the excluded listing
pub const PAUSE_PROMPT: &str = "Press Enter to return to the main menu...";

const MAIN_MENU: &str = "Main Menu:\n\
    1. View relevant clinical trials\n\
    2. View excluded trials\n\
    3. Search for a keyword in relevant trials";
const INVALID_CHOICE: &str = "Invalid input. Please enter a valid number or type 'exit' to leave.";
const INVALID_KEYWORD: &str = "Please enter a valid keyword.";
const GOODBYE: &str = "Exiting the program.";

/// Source of input lines.
pub trait Prompter {
    /// Show `prompt` and read one line; `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Line editor backed prompter with persistent history.
pub struct EditorPrompter {
    editor: Editor<(), DefaultHistory>,
    history_path: Option<PathBuf>,
}

impl EditorPrompter {
    /// Create a prompter, loading history from `history_path` if given.
    pub fn new(history_size: usize, history_path: Option<PathBuf>) -> Result<Self> {
        let config = EditorConfig::builder()
            .max_history_size(history_size)?
            .auto_add_history(false)
            .build();
        let mut editor = Editor::with_config(config)?;

        if let Some(path) = &history_path {
            if let Err(e) = editor.load_history(path) {
                debug!(path = %path.display(), error = %e, "no history loaded");
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }

    /// Write history back to disk.
    pub fn save_history(&mut self) {
        if let Some(path) = &self.history_path {
            if let Some(parent) = path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    warn!(error = %e, "could not create history directory");
                    return;
                }
            }
            if let Err(e) = self.editor.save_history(path) {
                warn!(path = %path.display(), error = %e, "could not save history");
            }
        }
    }
}

impl Prompter for EditorPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str()).ok();
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(CliError::Editor(e)),
        }
    }
}

/// Prompter that replays fixed lines, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedPrompter {
    /// Create a prompter from input lines.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines not consumed yet.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

/// The trial currently open for questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// 1-based list number
    pub number: usize,

    /// Rendered record sent as Q&A context
    pub context: String,
}

/// A parsed main menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// List kept trials and pick one
    ViewKept,
    /// List excluded trials
    ViewExcluded,
    /// Keyword search
    Search,
    /// Leave the program
    Exit,
    /// Anything else
    Invalid,
}

impl MenuChoice {
    /// Parse one line of menu input.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.eq_ignore_ascii_case("exit") {
            return MenuChoice::Exit;
        }
        match input {
            "1" => MenuChoice::ViewKept,
            "2" => MenuChoice::ViewExcluded,
            "3" => MenuChoice::Search,
            _ => MenuChoice::Invalid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// The interactive session over one catalog.
pub struct Session<'a, L, W> {
    catalog: &'a TrialCatalog,
    assistant: &'a TrialAssistant<L>,
    formatter: &'a Formatter,
    out: W,
}

impl<'a, L, W> Session<'a, L, W>
where
    L: LlmProvider,
    L::Error: Display,
    W: Write,
{
    /// Create a session writing to `out`.
    pub fn new(
        catalog: &'a TrialCatalog,
        assistant: &'a TrialAssistant<L>,
        formatter: &'a Formatter,
        out: W,
    ) -> Self {
        Self {
            catalog,
            assistant,
            formatter,
            out,
        }
    }

    /// Consume the session, returning its writer.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `exit` or end of input.
    ///
    /// Returns the selection that was active when the session ended.
    pub fn run<P: Prompter>(&mut self, prompter: &mut P) -> Result<Option<Selection>> {
        let mut selection: Option<Selection> = None;

        loop {
            writeln!(self.out, "\n{}", self.formatter.heading(MAIN_MENU))?;
            let Some(input) = self.prompt(prompter, MENU_PROMPT)? else {
                break;
            };

            let flow = match MenuChoice::parse(&input) {
                MenuChoice::Exit => {
                    writeln!(self.out, "{}", GOODBYE)?;
                    Flow::Stop
                }
                MenuChoice::ViewKept => match self.choose_trial(prompter)? {
                    (Flow::Continue, Some(chosen)) => {
                        let flow = self.question_loop(prompter, &chosen)?;
                        selection = Some(chosen);
                        flow
                    }
                    (flow, _) => flow,
                },
                MenuChoice::ViewExcluded => self.show_excluded(prompter)?,
                MenuChoice::Search => self.search(prompter)?,
                MenuChoice::Invalid => {
                    writeln!(self.out, "{}", self.formatter.warning(INVALID_CHOICE))?;
                    Flow::Continue
                }
            };

            if flow == Flow::Stop {
                break;
            }
        }

        self.out.flush()?;
        Ok(selection)
    }

    fn prompt<P: Prompter>(&mut self, prompter: &mut P, prompt: &str) -> Result<Option<String>> {
        writeln!(self.out)?;
        self.out.flush()?;
        prompter.read_line(prompt)
    }

    /// List the kept trials and read a trial number.
    ///
    /// Blank, non-numeric and out-of-range input all return to the menu.
    fn choose_trial<P: Prompter>(&mut self, prompter: &mut P) -> Result<(Flow, Option<Selection>)> {
        let catalog = self.catalog;
        writeln!(self.out, "\n{}", self.formatter.trial_list(catalog)?)?;
        let Some(input) = self.prompt(prompter, TRIAL_PROMPT)? else {
            return Ok((Flow::Stop, None));
        };

        let input = input.trim();
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Ok((Flow::Continue, None));
        }
        let Some((number, record)) = input
            .parse::<usize>()
            .ok()
            .and_then(|n| Some((n, catalog.get(n.checked_sub(1)?)?)))
        else {
            return Ok((Flow::Continue, None));
        };

        writeln!(self.out, "{}", self.formatter.trial(record)?)?;
        Ok((
            Flow::Continue,
            Some(Selection {
                number,
                context: record.render(),
            }),
        ))
    }

    fn question_loop<P: Prompter>(&mut self, prompter: &mut P, selection: &Selection) -> Result<Flow> {
        loop {
            let Some(question) = self.prompt(prompter, QUESTION_PROMPT)? else {
                return Ok(Flow::Stop);
            };
            let question = question.trim();
            if question.eq_ignore_ascii_case("back") {
                return Ok(Flow::Continue);
            }
            if question.is_empty() {
                continue;
            }

            debug!(trial = selection.number, "question asked");
            let answer = self.assistant.answer(&selection.context, question);
            writeln!(self.out, "\n{}", self.formatter.answer(question, &answer)?)?;
        }
    }

    fn show_excluded<P: Prompter>(&mut self, prompter: &mut P) -> Result<Flow> {
        writeln!(self.out, "\n{}", self.formatter.exclusions(self.catalog)?)?;
        if self.catalog.excluded().is_empty() {
            return Ok(Flow::Continue);
        }

        match self.prompt(prompter, PAUSE_PROMPT)? {
            Some(_) => Ok(Flow::Continue),
            None => Ok(Flow::Stop),
        }
    }

    fn search<P: Prompter>(&mut self, prompter: &mut P) -> Result<Flow> {
        let Some(keyword) = self.prompt(prompter, KEYWORD_PROMPT)? else {
            return Ok(Flow::Stop);
        };

        if keyword.trim().is_empty() {
            writeln!(self.out, "{}", self.formatter.warning(INVALID_KEYWORD))?;
        } else {
            let matches = self.catalog.search(&keyword);
            writeln!(self.out, "\n{}", self.formatter.search_results(&keyword, &matches)?)?;
        }
        Ok(Flow::Continue)
    }
}
