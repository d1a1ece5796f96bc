use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use super::types::{GenerateContentRequest, GenerateContentResponse};
use super::NarrativeAnalyzer;
use crate::config::{AnalysisConfig, RequestConfig};
use crate::error::{AnalysisError, AnalysisResult};
use crate::prompts::analysis_prompt;
use crate::scoring::ScoreVector;

/// Client for the Gemini `generateContent` API
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: Option<f64>,
    max_output_tokens: Option<u32>,
    request_config: RequestConfig,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: &AnalysisConfig, request_config: RequestConfig) -> AnalysisResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_config.timeout_ms))
            .build()
            .map_err(AnalysisError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            request_config,
        })
    }

    /// Run a single generation request and return the first candidate's text
    pub async fn generate(&self, request: &GenerateContentRequest) -> AnalysisResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let start = Instant::now();

        match self.execute_request(&url, request).await {
            Ok(text) => {
                info!(
                    model = %self.model,
                    latency_ms = start.elapsed().as_millis(),
                    "Gemini generation succeeded"
                );
                Ok(text)
            }
            Err(e) => {
                error!(
                    model = %self.model,
                    error = %e,
                    latency_ms = start.elapsed().as_millis(),
                    "Gemini generation failed"
                );
                Err(e)
            }
        }
    }

    /// Execute a single request (internal)
    async fn execute_request(
        &self,
        url: &str,
        request: &GenerateContentRequest,
    ) -> AnalysisResult<String> {
        debug!(
            model = %self.model,
            contents = request.contents.len(),
            "Calling Gemini"
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let generated: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                AnalysisError::InvalidResponse {
                    message: format!("Failed to parse response: {}", e),
                }
            }
        })?;

        generated.text().ok_or(AnalysisError::EmptyCompletion)
    }

    /// Build the request for `prompt` with the configured sampling settings
    pub fn request_for(&self, prompt: impl Into<String>) -> GenerateContentRequest {
        let mut request = GenerateContentRequest::from_prompt(prompt);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_output_tokens) = self.max_output_tokens {
            request = request.with_max_output_tokens(max_output_tokens);
        }
        request
    }

    fn transport_error(&self, e: reqwest::Error) -> AnalysisError {
        if e.is_timeout() {
            AnalysisError::Timeout {
                timeout_ms: self.request_config.timeout_ms,
            }
        } else {
            AnalysisError::Http(e)
        }
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl NarrativeAnalyzer for GeminiClient {
    async fn analyze(&self, scores: &ScoreVector) -> AnalysisResult<String> {
        let request = self.request_for(analysis_prompt(scores));
        self.generate(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = AnalysisConfig {
            api_key: "test_key".to_string(),
            base_url: "https://generativelanguage.googleapis.com/".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: None,
            max_output_tokens: None,
        };

        let client = GeminiClient::new(&config, RequestConfig::default()).unwrap();
        assert_eq!(client.base_url(), "https://generativelanguage.googleapis.com");
        assert_eq!(client.model(), "gemini-2.5-flash");
        assert!(client.request_for("hi").generation_config.is_none());
    }

    #[test]
    fn test_request_carries_configured_sampling() {
        let config = AnalysisConfig {
            api_key: "test_key".to_string(),
            base_url: "http://localhost".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: Some(0.4),
            max_output_tokens: None,
        };

        let client = GeminiClient::new(&config, RequestConfig::default()).unwrap();
        let generation = client.request_for("hi").generation_config.unwrap();
        assert_eq!(generation.temperature, Some(0.4));
        assert_eq!(generation.max_output_tokens, None);
    }
}
