use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub request: RequestConfig,
    pub submission: SubmissionConfig,
    pub export: ExportConfig,
}

/// Narrative analysis (Gemini) API configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Sampling temperature sent with each request, if set
    pub temperature: Option<f64>,
    /// Output token cap sent with each request, if set
    pub max_output_tokens: Option<u32>,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub timeout_ms: u64,
}

/// Result submission configuration
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    /// Simulated network latency awaited per submission (0 disables it)
    pub latency_ms: u64,
}

/// Document export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let analysis = AnalysisConfig {
            api_key: env::var("GEMINI_API_KEY").map_err(|_| AppError::Config {
                message: "GEMINI_API_KEY is required".to_string(),
            })?,
            base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            temperature: optional_var("GEMINI_TEMPERATURE"),
            max_output_tokens: optional_var("GEMINI_MAX_OUTPUT_TOKENS"),
        };

        let database = DatabaseConfig {
            path: PathBuf::from(
                env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/noesis.db".to_string()),
            ),
            max_connections: parsed_var("DATABASE_MAX_CONNECTIONS", 5),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            timeout_ms: parsed_var("REQUEST_TIMEOUT_MS", 30000),
        };

        let submission = SubmissionConfig {
            latency_ms: parsed_var("SUBMISSION_LATENCY_MS", 500),
        };

        let export = ExportConfig {
            dir: PathBuf::from(env::var("EXPORT_DIR").unwrap_or_else(|_| "./exports".to_string())),
        };

        Ok(Config {
            analysis,
            database,
            logging,
            request,
            submission,
            export,
        })
    }
}

/// Parse `key`; `None` when unset or malformed.
fn optional_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

/// Parse `key`, falling back to `default` when unset or malformed.
fn parsed_var<T: FromStr>(key: &str, default: T) -> T {
    optional_var(key).unwrap_or(default)
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { timeout_ms: 30000 }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self { latency_ms: 500 }
    }
}
