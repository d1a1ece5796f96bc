//! Markdown export of finished results.

use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tracing::info;

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::instruments::Instrument;
use crate::scoring::ScoreVector;

/// Everything an exported document contains.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub username: &'a str,
    pub scores: &'a ScoreVector,
    pub narrative: &'a str,
}

impl Report<'_> {
    pub fn instrument(&self) -> Instrument {
        self.scores.instrument()
    }

    /// Deterministic file name: `noesis_hiring_<instrument>_<safe username>.md`.
    pub fn file_name(&self) -> String {
        format!(
            "noesis_hiring_{}_{}.md",
            self.instrument().as_str(),
            sanitize_username(self.username)
        )
    }

    /// Render the Markdown document dated `date`.
    pub fn render(&self, date: NaiveDate) -> String {
        let scores = self
            .scores
            .iter()
            .map(|(label, value)| format!("- {}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "# Noesis Hiring Assessment Results for {username}\n\n\
             **Assessment Type:** {kind}\n\
             **Date:** {date}\n\n\
             ---\n\n\
             ## Scores\n\n\
             {scores}\n\n\
             ---\n\n\
             ## Personalized Analysis\n\n\
             {narrative}",
            username = self.username,
            kind = self.instrument().display_name(),
            date = date.format("%Y-%m-%d"),
            scores = scores,
            narrative = self.narrative,
        )
        .trim()
        .to_string()
    }
}

/// Replace every character outside `[A-Za-z0-9]` with `_` and lower-case the rest.
pub fn sanitize_username(username: &str) -> String {
    username
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Writes rendered reports into a directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            dir: config.dir.clone(),
        }
    }

    /// Render `report` with today's local date and write it, returning the file path.
    pub async fn write(&self, report: &Report<'_>) -> Result<PathBuf, ExportError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(report.file_name());
        let body = report.render(Local::now().date_naive());
        tokio::fs::write(&path, body).await?;

        info!(
            path = %path.display(),
            instrument = %report.instrument(),
            "Results exported"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{Answer, AnswerStore};
    use crate::scoring::score;
    use pretty_assertions::assert_eq;

    fn disc_scores() -> ScoreVector {
        let mut answers = AnswerStore::new();
        answers.set(
            1,
            Answer::new(Some("Adventurous"), Some("Analytical")).unwrap(),
        );
        score(Instrument::Disc, &answers)
    }

    #[test]
    fn test_sanitize_username() {
        assert_eq!(sanitize_username("Jane Doe"), "jane_doe");
        assert_eq!(sanitize_username("O'Brien-Smith 3"), "o_brien_smith_3");
        assert_eq!(sanitize_username("Zoë"), "zo_");
    }

    #[test]
    fn test_file_name() {
        let scores = disc_scores();
        let report = Report {
            username: "Jane Doe",
            scores: &scores,
            narrative: "",
        };
        assert_eq!(report.file_name(), "noesis_hiring_disc_jane_doe.md");
    }

    #[test]
    fn test_render_layout() {
        let scores = disc_scores();
        let report = Report {
            username: "Jane Doe",
            scores: &scores,
            narrative: "## Primary Profile\nDriven.",
        };
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let expected = "# Noesis Hiring Assessment Results for Jane Doe\n\n\
**Assessment Type:** DISC Assessment\n\
**Date:** 2026-10-19\n\n\
---\n\n\
## Scores\n\n\
- Dominance: 1\n\
- Influence: 0\n\
- Steadiness: 0\n\
- Conscientiousness: -1\n\n\
---\n\n\
## Personalized Analysis\n\n\
## Primary Profile\nDriven.";

        assert_eq!(report.render(date), expected);
    }

    #[tokio::test]
    async fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(&ExportConfig {
            dir: dir.path().join("nested"),
        });
        let scores = disc_scores();
        let report = Report {
            username: "Jane Doe",
            scores: &scores,
            narrative: "Narrative body",
        };

        let path = exporter.write(&report).await.unwrap();

        assert_eq!(path.file_name().unwrap(), "noesis_hiring_disc_jane_doe.md");
        let body = std::fs::read_to_string(path).unwrap();
        assert!(body.starts_with("# Noesis Hiring Assessment Results for Jane Doe"));
        assert!(body.ends_with("Narrative body"));
    }
}
