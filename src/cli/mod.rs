//! Command-line front end.

mod quiz;

pub use quiz::{run_take, QuizCommand, TakeOutcome, Terminal};

use clap::{Parser, Subcommand};

use crate::app::AppState;
use crate::error::AppResult;
use crate::instruments::Instrument;

/// Noesis Hiring assessments in the terminal.
#[derive(Parser, Debug)]
#[command(name = "noesis", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Take an assessment interactively
    Take {
        /// Your full name
        #[arg(long)]
        user: String,

        /// Instrument to take: disc or herrmann
        #[arg(long)]
        instrument: Instrument,

        /// Skip writing the Markdown report
        #[arg(long)]
        no_export: bool,
    },

    /// Show which assessments a user has completed
    Status {
        /// Full name to look up
        #[arg(long)]
        user: String,
    },

    /// Print the question bank of an instrument
    Questions {
        /// Instrument to print: disc or herrmann
        #[arg(long)]
        instrument: Instrument,
    },
}

/// Result of CLI command execution.
pub struct CliResult {
    /// Exit code (0 = success)
    pub exit_code: i32,
    /// Output message
    pub message: String,
}

impl CliResult {
    /// Create a success result with the given message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            message: message.into(),
        }
    }

    /// Create an error result with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            exit_code: 1,
            message: message.into(),
        }
    }
}

/// Report a user's completed instruments and submission history.
pub async fn execute_status(app: &AppState, user: &str) -> AppResult<CliResult> {
    let username = user.trim();
    let completed = app.ledger().completed(username);
    let submissions = app.storage.list_submissions(username).await?;

    let mut lines = vec![format!("Assessments for {}:", username)];
    for instrument in Instrument::ALL {
        let status = if completed.contains(&instrument) {
            "completed"
        } else {
            "available"
        };
        lines.push(format!("  {:<16} {}", instrument.display_name(), status));
    }
    for submission in &submissions {
        lines.push(format!(
            "  submitted {} on {}",
            submission.instrument,
            submission.submitted_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    Ok(CliResult::success(lines.join("\n")))
}

/// List every question and its words, tagged with the trait each scores.
pub fn execute_questions(instrument: Instrument) -> CliResult {
    let mut lines = vec![format!(
        "{} ({} questions)",
        instrument.display_name(),
        instrument.len()
    )];
    for question in instrument.questions() {
        let words = question
            .options
            .iter()
            .map(|opt| format!("{} ({})", opt.word, opt.label))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("  {:>2}. {}", question.id, words));
    }
    CliResult::success(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_take() {
        let cli = Cli::try_parse_from([
            "noesis",
            "take",
            "--user",
            "Jane Doe",
            "--instrument",
            "herrmann",
        ])
        .unwrap();

        match cli.command {
            Commands::Take {
                user,
                instrument,
                no_export,
            } => {
                assert_eq!(user, "Jane Doe");
                assert_eq!(instrument, Instrument::Herrmann);
                assert!(!no_export);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_instrument() {
        let result = Cli::try_parse_from(["noesis", "questions", "--instrument", "mbti"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_execute_questions() {
        let result = execute_questions(Instrument::Disc);
        assert_eq!(result.exit_code, 0);
        assert!(result.message.starts_with("DISC Assessment (10 questions)"));
        assert!(result.message.contains("Adventurous (Dominance)"));
    }
}
