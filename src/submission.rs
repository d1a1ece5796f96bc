//! Result submission collaborator.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::SubmissionConfig;
use crate::error::{SubmissionError, SubmissionResult};
use crate::instruments::Instrument;
use crate::scoring::ScoreVector;
use crate::storage::{Storage, Submission};

/// Accepts a finished score vector on behalf of the hiring backend.
#[async_trait]
pub trait ResultSubmitter: Send + Sync {
    /// Submit `scores` for `username`. A single attempt; failures are returned as-is.
    async fn submit(
        &self,
        username: &str,
        instrument: Instrument,
        scores: &ScoreVector,
    ) -> SubmissionResult<()>;
}

/// Submitter that records each submission in local storage after a
/// simulated network delay.
#[derive(Clone)]
pub struct StorageSubmitter {
    storage: Arc<dyn Storage>,
    latency: Duration,
}

impl StorageSubmitter {
    pub fn new(storage: Arc<dyn Storage>, config: &SubmissionConfig) -> Self {
        Self {
            storage,
            latency: Duration::from_millis(config.latency_ms),
        }
    }
}

#[async_trait]
impl ResultSubmitter for StorageSubmitter {
    async fn submit(
        &self,
        username: &str,
        instrument: Instrument,
        scores: &ScoreVector,
    ) -> SubmissionResult<()> {
        let start = Instant::now();

        if scores.instrument() != instrument {
            return Err(SubmissionError::Rejected {
                message: format!(
                    "scores belong to {} but submission is for {}",
                    scores.instrument(),
                    instrument
                ),
            });
        }

        let submission = Submission::new(username, scores)?;
        debug!(
            submission_id = %submission.id,
            username = %submission.username,
            instrument = %instrument,
            "Submitting assessment results"
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.storage.record_submission(&submission).await?;

        info!(
            submission_id = %submission.id,
            instrument = %instrument,
            latency_ms = start.elapsed().as_millis(),
            "Assessment results submitted"
        );

        Ok(())
    }
}
