use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use noesis_assessment::{
    analysis::GeminiClient,
    app::AppState,
    cli::{
        execute_questions, execute_status, run_take, Cli, CliResult, Commands, TakeOutcome,
        Terminal,
    },
    config::{Config, LogFormat},
    export::Exporter,
    storage::SqliteStorage,
    submission::StorageSubmitter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Printing the bank needs no configuration or services
    if let Commands::Questions { instrument } = cli.command {
        let result = execute_questions(instrument);
        println!("{}", result.message);
        return Ok(());
    }

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Noesis assessment starting..."
    );

    // Initialize storage
    let storage = match SqliteStorage::new(&config.database).await {
        Ok(s) => {
            info!(path = %config.database.path.display(), "Database initialized");
            Arc::new(s)
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize database");
            return Err(e.into());
        }
    };

    // Initialize analysis client
    let analyzer = match GeminiClient::new(&config.analysis, config.request.clone()) {
        Ok(c) => {
            info!(base_url = %config.analysis.base_url, model = %config.analysis.model, "Gemini client initialized");
            Arc::new(c)
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize Gemini client");
            return Err(e.into());
        }
    };

    let submitter = Arc::new(StorageSubmitter::new(storage.clone(), &config.submission));
    let exporter = Exporter::new(&config.export);
    let mut app = AppState::new(storage, submitter, analyzer, exporter).await;

    let result = match cli.command {
        Commands::Take {
            user,
            instrument,
            no_export,
        } => {
            let mut terminal =
                Terminal::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
            match run_take(&mut app, &mut terminal, &user, instrument, !no_export).await? {
                TakeOutcome::Finished { error: None, .. } => CliResult::success(""),
                TakeOutcome::Finished { error: Some(_), .. } => CliResult::error(""),
                TakeOutcome::Aborted => CliResult::error("Assessment abandoned."),
                TakeOutcome::Rejected(_) => CliResult::error(""),
            }
        }
        Commands::Status { user } => execute_status(&app, &user).await?,
        Commands::Questions { instrument } => execute_questions(instrument),
    };

    if !result.message.is_empty() {
        println!("{}", result.message);
    }

    info!("Shutdown complete");
    std::process::exit(result.exit_code);
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
