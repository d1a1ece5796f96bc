//! # Noesis Assessment
//!
//! Forced-choice personality assessments in the terminal. A user picks the
//! word "most like me" and "least like me" from each group of four, the
//! answers are reduced to a per-trait score vector, the result is submitted,
//! and a language model writes an interpretation that can be exported as
//! Markdown.
//!
//! ## Instruments
//!
//! - **DISC**: Dominance, Influence, Steadiness, Conscientiousness (10 questions)
//! - **Herrmann**: Analytical, Sequential, Interpersonal, Imaginative (7 questions)
//!
//! ## Architecture
//!
//! ```text
//! Terminal → Session (state machine) → score → submit → ledger → Gemini (HTTP)
//!                                                 ↓
//!                                          SQLite (ledger, submissions)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use noesis_assessment::{AppState, Config, Instrument, Session};
//! use noesis_assessment::analysis::GeminiClient;
//! use noesis_assessment::export::Exporter;
//! use noesis_assessment::storage::SqliteStorage;
//! use noesis_assessment::submission::StorageSubmitter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let storage = Arc::new(SqliteStorage::new(&config.database).await?);
//!     let analyzer = Arc::new(GeminiClient::new(&config.analysis, config.request.clone())?);
//!     let submitter = Arc::new(StorageSubmitter::new(storage.clone(), &config.submission));
//!     let mut app = AppState::new(storage, submitter, analyzer, Exporter::new(&config.export)).await;
//!
//!     let mut session = Session::new();
//!     app.begin(&mut session, "Jane Doe", Instrument::Disc)?;
//!     // ... select answers and advance through every question ...
//!     app.calculate(&mut session).await;
//!     println!("{:?}", session.scores());
//!     Ok(())
//! }
//! ```

/// Narrative analysis collaborator and Gemini client.
pub mod analysis;
/// Most/least answers and the answer store.
pub mod answers;
/// Process-wide application state.
pub mod app;
/// Command-line front end.
pub mod cli;
/// Configuration management.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Markdown export of results.
pub mod export;
/// DISC and Herrmann question banks.
pub mod instruments;
/// Completion ledger and its persistence.
pub mod ledger;
/// Prompt templates for narrative analysis.
pub mod prompts;
/// Scoring engine.
pub mod scoring;
/// Assessment session state machine.
pub mod session;
/// SQLite storage layer for persistence.
pub mod storage;
/// Result submission collaborator.
pub mod submission;

pub use app::AppState;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use instruments::Instrument;
pub use session::Session;
