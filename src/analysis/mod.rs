//! Narrative analysis collaborator.
//!
//! Turns a finished score vector into a free-form Markdown interpretation
//! by asking a Gemini model. The returned text is not validated.

mod client;
mod types;


pub use client::GeminiClient;
pub use types::{
    Candidate, Content, ContentRole, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, Part, UsageMetadata,
};

use async_trait::async_trait;

use crate::error::AnalysisResult;
use crate::scoring::ScoreVector;

/// Produces a written interpretation of a score vector.
#[async_trait]
pub trait NarrativeAnalyzer: Send + Sync {
    /// Interpret `scores`. A single attempt; any failure is returned.
    async fn analyze(&self, scores: &ScoreVector) -> AnalysisResult<String>;
}
