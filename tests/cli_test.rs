//! Integration tests for the interactive terminal quiz
//!
//! Feeds scripted input through an in-memory terminal and checks the
//! resulting output, ledger and exported report.

use serde_json::json;
use std::sync::Arc;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use noesis_assessment::analysis::GeminiClient;
use noesis_assessment::app::AppState;
use noesis_assessment::cli::{execute_status, run_take, TakeOutcome, Terminal};
use noesis_assessment::config::{AnalysisConfig, ExportConfig, RequestConfig, SubmissionConfig};
use noesis_assessment::error::BeginRejection;
use noesis_assessment::export::Exporter;
use noesis_assessment::instruments::Instrument;
use noesis_assessment::storage::SqliteStorage;
use noesis_assessment::submission::StorageSubmitter;

async fn create_app(base_url: &str, export_dir: &std::path::Path) -> AppState {
    let storage = Arc::new(SqliteStorage::new_in_memory().await.unwrap());
    let analyzer = GeminiClient::new(
        &AnalysisConfig {
            api_key: "test-api-key".to_string(),
            base_url: base_url.to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: None,
            max_output_tokens: None,
        },
        RequestConfig { timeout_ms: 5000 },
    )
    .unwrap();
    let submitter = StorageSubmitter::new(storage.clone(), &SubmissionConfig { latency_ms: 0 });
    let exporter = Exporter::new(&ExportConfig {
        dir: export_dir.to_path_buf(),
    });

    AppState::new(storage, Arc::new(submitter), Arc::new(analyzer), exporter).await
}

async fn mount_analysis(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": text}]}, "finishReason": "STOP"}]
        })))
        .mount(server)
        .await;
}

/// Script that answers every Herrmann question with 1 as most and 4 as least.
fn herrmann_script() -> String {
    let mut script = String::new();
    for _ in 0..Instrument::Herrmann.len() {
        script.push_str("m 1\nl 4\nn\n");
    }
    script
}

#[tokio::test]
async fn test_full_run_exports_report() {
    let server = MockServer::start().await;
    mount_analysis(&server, "## Primary Thinking Style\nAnalytical.").await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = create_app(&server.uri(), dir.path()).await;

    let script = herrmann_script();
    let mut terminal = Terminal::new(script.as_bytes(), Vec::new());
    let outcome = run_take(&mut app, &mut terminal, "Jane Doe", Instrument::Herrmann, true)
        .await
        .unwrap();

    let expected_path = dir.path().join("noesis_hiring_herrmann_jane_doe.md");
    assert_eq!(
        outcome,
        TakeOutcome::Finished {
            exported: Some(expected_path.clone()),
            error: None,
        }
    );

    let output = String::from_utf8(terminal.into_writer()).unwrap();
    assert!(output.contains("Question 1 of 7"));
    assert!(output.contains("Question 7 of 7 (100%)"));
    assert!(output.contains("- Analytical: 7"));
    assert!(output.contains("- Imaginative: -7"));
    assert!(output.contains("Primary: Analytical"));

    let report = std::fs::read_to_string(expected_path).unwrap();
    assert!(report.contains("**Assessment Type:** Herrmann Model"));
    assert!(report.contains("- Sequential: 0"));
    assert!(report.ends_with("## Primary Thinking Style\nAnalytical."));

    assert!(app.ledger().is_completed("Jane Doe", Instrument::Herrmann));
    let status = execute_status(&app, "Jane Doe").await.unwrap();
    assert!(status.message.contains("submitted herrmann on"));
}

#[tokio::test]
async fn test_incomplete_answer_blocks_next_and_back_is_clamped() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = create_app(&server.uri(), dir.path()).await;

    let script = "b\nn\nm 1\nm 9\nn\nq\n";
    let mut terminal = Terminal::new(script.as_bytes(), Vec::new());
    let outcome = run_take(&mut app, &mut terminal, "Jane Doe", Instrument::Disc, false)
        .await
        .unwrap();

    assert_eq!(outcome, TakeOutcome::Aborted);
    let output = String::from_utf8(terminal.into_writer()).unwrap();
    assert!(output.contains("Already at the first question."));
    assert!(output.contains("Pick one word for most and a different one for least first."));
    assert!(output.contains("Option must be 1-4, got '9'"));
    assert!(output.contains("1. Adventurous [most]"));
    assert!(!output.contains("Question 2 of 10"));
    assert!(!app.ledger().is_completed("Jane Doe", Instrument::Disc));
}

#[tokio::test]
async fn test_analysis_failure_reports_error_without_export() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = create_app(&server.uri(), dir.path()).await;

    let script = herrmann_script();
    let mut terminal = Terminal::new(script.as_bytes(), Vec::new());
    let outcome = run_take(&mut app, &mut terminal, "Jane Doe", Instrument::Herrmann, true)
        .await
        .unwrap();

    match outcome {
        TakeOutcome::Finished { exported, error } => {
            assert!(exported.is_none());
            assert!(error.unwrap().contains("API error: 500 - boom"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    let output = String::from_utf8(terminal.into_writer()).unwrap();
    assert!(output.contains("- Analytical: 7"));
    assert!(output.contains("Sorry, there was an issue processing your results."));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_completed_instrument_is_rejected() {
    let server = MockServer::start().await;
    mount_analysis(&server, "Done.").await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = create_app(&server.uri(), dir.path()).await;

    let script = herrmann_script();
    let mut terminal = Terminal::new(script.as_bytes(), Vec::new());
    run_take(&mut app, &mut terminal, "Jane Doe", Instrument::Herrmann, false)
        .await
        .unwrap();

    let mut terminal = Terminal::new(&b""[..], Vec::new());
    let outcome = run_take(&mut app, &mut terminal, " Jane Doe ", Instrument::Herrmann, false)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        TakeOutcome::Rejected(BeginRejection::AlreadyCompleted {
            username: "Jane Doe".to_string(),
            instrument: Instrument::Herrmann,
        })
    );
    let output = String::from_utf8(terminal.into_writer()).unwrap();
    assert!(output.contains("Cannot start: Jane Doe has already completed the herrmann assessment"));
}

#[tokio::test]
async fn test_short_username_is_rejected() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let mut app = create_app(&server.uri(), dir.path()).await;

    let mut terminal = Terminal::new(&b""[..], Vec::new());
    let outcome = run_take(&mut app, &mut terminal, " Al ", Instrument::Disc, false)
        .await
        .unwrap();

    assert_eq!(outcome, TakeOutcome::Rejected(BeginRejection::InvalidUsername));
}
