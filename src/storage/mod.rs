//! Storage layer for assessment persistence.
//!
//! A small key-value table holds process-wide records such as the
//! completion ledger; a submissions table keeps every submitted score
//! vector.

mod sqlite;

pub use sqlite::SqliteStorage;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StorageResult;
use crate::instruments::Instrument;
use crate::scoring::ScoreVector;

/// A recorded result submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Unique submission identifier.
    pub id: String,
    /// Trimmed username of the respondent.
    pub username: String,
    /// Instrument that was taken.
    pub instrument: Instrument,
    /// Score vector as a `{ "Trait": value }` JSON map.
    pub scores: serde_json::Value,
    /// When the results were submitted.
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Create a submission record stamped with the current time.
    pub fn new(username: impl Into<String>, scores: &ScoreVector) -> StorageResult<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            instrument: scores.instrument(),
            scores: serde_json::to_value(scores)?,
            submitted_at: Utc::now(),
        })
    }
}

/// Persistence operations used by the ledger and the submission collaborator.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the raw value stored under `key`.
    async fn get_value(&self, key: &str) -> StorageResult<Option<String>>;
    /// Insert or replace the value stored under `key`.
    async fn put_value(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Record a submission.
    async fn record_submission(&self, submission: &Submission) -> StorageResult<()>;
    /// All submissions for `username`, oldest first.
    async fn list_submissions(&self, username: &str) -> StorageResult<Vec<Submission>>;
}
