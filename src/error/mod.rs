use thiserror::Error;

use crate::instruments::Instrument;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Storage layer errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database connection failed: {message}")]
    Connection { message: String },

    #[error("Query failed: {message}")]
    Query { message: String },

    #[error("Migration failed: {message}")]
    Migration { message: String },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Narrative analysis (LLM) errors
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Model returned no text")]
    EmptyCompletion,

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result submission errors
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Submission rejected: {message}")]
    Rejected { message: String },

    #[error("Failed to record submission: {0}")]
    Storage(#[from] StorageError),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Results are not ready for export")]
    NotReady,

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a caller must not start an attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BeginRejection {
    #[error("Username must be longer than 2 characters")]
    InvalidUsername,

    #[error("{username} has already completed the {instrument} assessment")]
    AlreadyCompleted {
        username: String,
        instrument: Instrument,
    },

    #[error("An assessment is already underway")]
    SessionBusy,
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Result type alias for submission operations
pub type SubmissionResult<T> = Result<T, SubmissionError>;
