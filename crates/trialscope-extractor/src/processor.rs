//! Batch Processor: extract then classify every trial document

use crate::fields::{extract_trial, peek_nct_id, peek_title};
use crate::{BatchReport, DroppedTrial, ExtractionFailurePolicy, ProcessorConfig};
use serde_json::Value;
use tracing::{debug, info, warn};
use trialscope_domain::traits::RelevanceOracle;
use trialscope_domain::{ExclusionReason, ExclusionRecord};
use trialscope_gatekeeper::{Gatekeeper, Verdict};

/// Runs the extractor and the Gatekeeper over a batch of trial documents
pub struct BatchProcessor<O> {
    gatekeeper: Gatekeeper<O>,
    config: ProcessorConfig,
}

impl<O: RelevanceOracle> BatchProcessor<O> {
    /// Create a processor with the given configuration
    pub fn new(gatekeeper: Gatekeeper<O>, config: ProcessorConfig) -> Self {
        Self { gatekeeper, config }
    }

    /// Process every document in input order
    ///
    /// A document that fails extraction never aborts the batch; it is
    /// dropped or audited according to `ExtractionFailurePolicy`.
    pub fn process(&self, studies: &[Value]) -> BatchReport {
        let mut report = BatchReport {
            total: studies.len(),
            ..BatchReport::default()
        };

        for study in studies {
            let record = match extract_trial(study) {
                Ok(record) => record,
                Err(e) => {
                    let nct_id = peek_nct_id(study);
                    warn!(
                        nct_id = nct_id.as_deref().unwrap_or("unknown"),
                        error = %e,
                        "Error parsing trial"
                    );
                    match self.config.extraction_failure {
                        ExtractionFailurePolicy::Drop => report.dropped.push(DroppedTrial {
                            nct_id,
                            error: e.to_string(),
                        }),
                        ExtractionFailurePolicy::Audit => {
                            report.excluded.push(ExclusionRecord::new(
                                nct_id.unwrap_or_default(),
                                peek_title(study).unwrap_or_default(),
                                ExclusionReason::ExtractionFailed {
                                    detail: e.to_string(),
                                },
                            ))
                        }
                    }
                    continue;
                }
            };

            match self.gatekeeper.classify(&record.title, &record.brief_summary) {
                Verdict::Keep => report.kept.push(record),
                Verdict::Exclude(reason) => {
                    debug!(nct_id = %record.nct_id, %reason, "trial excluded");
                    report
                        .excluded
                        .push(ExclusionRecord::new(record.nct_id, record.title, reason));
                }
            }
        }

        info!(
            total = report.total,
            kept = report.kept.len(),
            excluded = report.excluded.len(),
            dropped = report.dropped.len(),
            "batch processed"
        );
        report
    }
}
