//! Integration tests: input file through the commands and the menu session

use std::io::Write;
use tempfile::NamedTempFile;
use trialscope_cli::cli::{AskArgs, SearchArgs, ShowArgs};
use trialscope_cli::commands::{self, TrialAssistant};
use trialscope_cli::config::OutputFormat;
use trialscope_cli::pipeline::load_catalog;
use trialscope_cli::session::{ScriptedPrompter, Session, MENU_PROMPT};
use trialscope_cli::{CliError, Formatter};
use trialscope_domain::TrialCatalog;
use trialscope_extractor::{BatchProcessor, ProcessorConfig};
use trialscope_gatekeeper::{ExclusionRules, Gatekeeper, LlmRelevanceOracle};
use trialscope_llm::MockProvider;

const STUDIES: &str = r#"[
  {"protocolSection": {
    "identificationModule": {"nctId": "NCT20000001", "briefTitle": "Pilates for Chronic Low Back Pain"},
    "statusModule": {"overallStatus": "RECRUITING"},
    "descriptionModule": {"briefSummary": "Pilates classes twice weekly."},
    "conditionsModule": {"conditions": ["Low Back Pain"]},
    "eligibilityModule": {"eligibilityCriteria": "Adults with back pain for 3 months"}
  }},
  {"protocolSection": {
    "identificationModule": {"nctId": "NCT20000002", "briefTitle": "Pedicle Screw Fixation"}
  }},
  {"protocolSection": {
    "identificationModule": {"nctId": "NCT20000003", "briefTitle": "Cardiac Output During Spinal Anaesthesia"}
  }},
  {"protocolSection": {
    "identificationModule": {"nctId": "NCT20000004", "briefTitle": "Lumbar Stenosis Walking Study"},
    "conditionsModule": {"conditions": ["Spinal Stenosis"]}
  }}
]"#;

fn catalog() -> TrialCatalog {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(STUDIES.as_bytes()).unwrap();

    let oracle = LlmRelevanceOracle::new(MockProvider::new("irrelevant"));
    let processor = BatchProcessor::new(
        Gatekeeper::new(ExclusionRules::default(), oracle),
        ProcessorConfig::default(),
    );
    load_catalog(file.path(), &processor, &mut Vec::<u8>::new())
        .unwrap()
        .unwrap()
}

fn plain() -> Formatter {
    Formatter::new(OutputFormat::Plain, false)
}

#[test]
fn test_list_command() {
    let mut out = Vec::new();
    commands::execute_list(&catalog(), &plain(), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "List of Relevant Clinical Trials:\n\
         1. Pilates for Chronic Low Back Pain\n\
         2. Lumbar Stenosis Walking Study\n"
    );
}

#[test]
fn test_excluded_command() {
    let mut out = Vec::new();
    commands::execute_excluded(&catalog(), &plain(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains(
        "Reason: Title contains 'fusion', 'surgery', 'screw', or 'discectomy'\n\
         - Pedicle Screw Fixation (NCTId: NCT20000002)"
    ));
    assert!(text.contains(
        "Reason: Deemed irrelevant by AI\n\
         - Cardiac Output During Spinal Anaesthesia (NCTId: NCT20000003)"
    ));
}

#[test]
fn test_search_command() {
    let mut out = Vec::new();
    let args = SearchArgs {
        keyword: "Stenosis".to_string(),
    };
    commands::execute_search(&args, &catalog(), &plain(), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Trials containing the keyword 'stenosis':\n\
         2. Lumbar Stenosis Walking Study (NCTId: NCT20000004)\n  \
         * Found in Title\n  \
         * Found in Conditions\n"
    );
}

#[test]
fn test_search_rejects_blank_keyword() {
    let args = SearchArgs {
        keyword: "  ".to_string(),
    };
    let result = commands::execute_search(&args, &catalog(), &plain(), &mut Vec::<u8>::new());
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
}

#[test]
fn test_show_command() {
    let catalog = catalog();
    let mut out = Vec::new();
    commands::execute_show(&ShowArgs { number: 1 }, &catalog, &plain(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("NCTId: NCT20000001\nTitle: Pilates for Chronic Low Back Pain\nStatus: RECRUITING\n"));

    let result = commands::execute_show(&ShowArgs { number: 3 }, &catalog, &plain(), &mut Vec::<u8>::new());
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
    let result = commands::execute_show(&ShowArgs { number: 0 }, &catalog, &plain(), &mut Vec::<u8>::new());
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
}

#[test]
fn test_ask_command() {
    let catalog = catalog();
    let provider = MockProvider::new("Adults with three months of back pain.");
    let assistant = TrialAssistant::new(provider.clone());
    let args = AskArgs {
        number: 1,
        question: vec!["Who".to_string(), "qualifies?".to_string()],
    };

    let mut out = Vec::new();
    commands::execute_ask(&args, &catalog, &assistant, &plain(), &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "ChatGPT Response:\nAdults with three months of back pain.\n"
    );
    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].user.contains("NCTId: NCT20000001\n"));
    assert!(prompts[0].user.ends_with("Now, answer the following question:\nWho qualifies?"));
}

#[test]
fn test_full_session() {
    let catalog = catalog();
    let provider = MockProvider::new("Twice a week.");
    let assistant = TrialAssistant::new(provider.clone());
    let formatter = plain();
    let mut prompter = ScriptedPrompter::new([
        "3", "pilates", "2", "", "1", "1", "How often?", "back", "hello", "exit",
    ]);

    let mut session = Session::new(&catalog, &assistant, &formatter, Vec::new());
    let selection = session.run(&mut prompter).unwrap();
    let text = String::from_utf8(session.into_output()).unwrap();

    assert!(text.contains("1. Pilates for Chronic Low Back Pain (NCTId: NCT20000001)\n  * Found in Title"));
    assert!(text.contains("List of Excluded Trials by Reason:"));
    assert!(text.contains("ChatGPT Response:\nTwice a week.\n"));
    assert!(text.contains("Invalid input. Please enter a valid number or type 'exit' to leave."));
    assert!(text.ends_with("Exiting the program.\n"));

    assert_eq!(selection.map(|s| s.number), Some(1));
    assert_eq!(provider.call_count(), 1);
    assert_eq!(prompter.remaining(), 0);
    assert_eq!(prompter.prompts().first().map(String::as_str), Some(MENU_PROMPT));
}
