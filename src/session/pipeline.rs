//! The calculation step: score, submit, record, analyze.

use tracing::{info, warn};

use crate::analysis::NarrativeAnalyzer;
use crate::ledger::{CompletionLedger, LedgerStore};
use crate::scoring::ScoreVector;
use crate::submission::ResultSubmitter;

/// Prefix of every user-visible failure message.
pub const ERROR_PREFIX: &str = "Sorry, there was an issue processing your results. Details: ";

/// External services the calculation step talks to.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub submitter: &'a dyn ResultSubmitter,
    pub analyzer: &'a dyn NarrativeAnalyzer,
    pub ledger_store: &'a LedgerStore,
}

/// Terminal outcome of one calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub scores: ScoreVector,
    pub narrative: Option<String>,
    pub error: Option<String>,
}

/// Submit `scores`, record completion and request the narrative, in that order.
///
/// The analysis call is only made once submission succeeded. Any failure
/// ends the run with the scores intact and a message; nothing
/// escapes as an error. Returns the outcome and the (possibly updated) ledger.
pub async fn finalize(
    username: &str,
    scores: ScoreVector,
    ledger: CompletionLedger,
    collaborators: Collaborators<'_>,
) -> (Outcome, CompletionLedger) {
    let instrument = scores.instrument();

    if let Err(e) = collaborators
        .submitter
        .submit(username, instrument, &scores)
        .await
    {
        warn!(username = %username, instrument = %instrument, error = %e, "Submission failed");
        return (failed(scores, e), ledger);
    }

    let ledger = ledger.record_completion(username, instrument);
    collaborators.ledger_store.persist(&ledger).await;

    match collaborators.analyzer.analyze(&scores).await {
        Ok(narrative) => {
            info!(
                username = %username,
                instrument = %instrument,
                chars = narrative.len(),
                "Narrative analysis generated"
            );
            let outcome = Outcome {
                scores,
                narrative: Some(narrative),
                error: None,
            };
            (outcome, ledger)
        }
        Err(e) => {
            warn!(username = %username, instrument = %instrument, error = %e, "Narrative analysis failed");
            (failed(scores, e), ledger)
        }
    }
}

fn failed(scores: ScoreVector, error: impl std::fmt::Display) -> Outcome {
    Outcome {
        scores,
        narrative: None,
        error: Some(format!("{}{}", ERROR_PREFIX, error)),
    }
}
