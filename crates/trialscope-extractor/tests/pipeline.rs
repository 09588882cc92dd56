//! End-to-end tests: file on disk to catalog

use std::io::Write;
use tempfile::NamedTempFile;
use trialscope_domain::SearchField;
use trialscope_extractor::{load_studies, BatchProcessor, ExtractorError, ProcessorConfig};
use trialscope_gatekeeper::{ExclusionRules, Gatekeeper, LlmRelevanceOracle};
use trialscope_llm::MockProvider;

const FIXTURE: &str = r#"{
  "FullStudiesResponse": {
    "FullStudies": [
      {
        "protocolSection": {
          "identificationModule": { "nctId": "NCT10000001", "briefTitle": "Exercise Therapy for Chronic Low Back Pain" },
          "statusModule": {
            "overallStatus": "RECRUITING",
            "startDateStruct": { "date": "2024-01-15" },
            "primaryCompletionDateStruct": { "date": "2026-06" }
          },
          "descriptionModule": { "briefSummary": "Graded exercise for lumbar pain." },
          "conditionsModule": { "conditions": ["Low Back Pain"] },
          "eligibilityModule": { "eligibilityCriteria": "Adults 18-65" }
        }
      },
      {
        "protocolSection": {
          "identificationModule": { "nctId": "NCT10000002", "briefTitle": "Minimally Invasive Discectomy" }
        }
      },
      {
        "protocolSection": {
          "identificationModule": { "nctId": "NCT10000003", "briefTitle": "Thoracic Mobility in Athletes" },
          "descriptionModule": { "briefSummary": "Upper back range of motion." }
        }
      },
      {
        "protocolSection": {
          "identificationModule": { "nctId": "NCT10000004", "briefTitle": "Pulmonary Function After Scoliosis Bracing" }
        }
      },
      {
        "protocolSection": {
          "identificationModule": { "nctId": "NCT10000005", "briefTitle": "Diabetic Patients with Sciatica" },
          "conditionsModule": { "conditions": ["Sciatica", "Diabetes"] }
        }
      },
      {
        "protocolSection": {
          "identificationModule": { "nctId": "NCT10000006" },
          "conditionsModule": { "conditions": "Sciatica" }
        }
      }
    ]
  }
}"#;

fn fixture_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(FIXTURE.as_bytes()).unwrap();
    file
}

fn oracle() -> LlmRelevanceOracle<MockProvider> {
    let mut provider = MockProvider::new("relevant");
    provider.add_response(
        &trialscope_gatekeeper::relevance_prompt("Pulmonary Function After Scoliosis Bracing", "").user,
        "irrelevant",
    );
    LlmRelevanceOracle::new(provider)
}

#[test]
fn test_file_to_catalog() {
    let file = fixture_file();
    let studies = load_studies(file.path()).unwrap();
    assert_eq!(studies.len(), 6);

    let gatekeeper = Gatekeeper::new(ExclusionRules::default(), oracle());
    let processor = BatchProcessor::new(gatekeeper, ProcessorConfig::default());
    let report = processor.process(&studies);

    assert!(report.is_balanced());
    assert_eq!(report.dropped.len(), 1);
    assert_eq!(report.dropped[0].nct_id.as_deref(), Some("NCT10000006"));

    let catalog = report.into_catalog();
    let titles: Vec<_> = catalog.list_kept().collect();
    assert_eq!(
        titles,
        [
            (1, "Exercise Therapy for Chronic Low Back Pain"),
            (2, "Diabetic Patients with Sciatica"),
        ]
    );

    let groups = catalog.excluded_by_reason();
    let reasons: Vec<_> = groups.iter().map(|g| g.reason.as_str()).collect();
    assert_eq!(
        reasons,
        [
            "Title contains 'fusion', 'surgery', 'screw', or 'discectomy'",
            "Only targets cervical or thoracic spine",
            "Deemed irrelevant by AI",
        ]
    );

    let rendered = catalog.render(0).unwrap();
    assert!(rendered.starts_with("NCTId: NCT10000001\n"));
    assert!(rendered.contains("Start Date: 2024-01-15\n"));
    assert!(rendered.ends_with("Eligibility Criteria: Adults 18-65\n"));

    let matches = catalog.search("SCIATICA");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].position, 2);
    assert_eq!(matches[0].fields, vec![SearchField::Title, SearchField::Conditions]);
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_studies(&dir.path().join("ctg-studies.json")).unwrap_err();
    assert!(matches!(err, ExtractorError::InputNotFound(_)));
}
