//! Interactive quiz over a line-oriented terminal.

use std::path::PathBuf;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::answers::Side;
use crate::app::AppState;
use crate::error::BeginRejection;
use crate::instruments::{Instrument, Question};
use crate::session::{Phase, Session};

/// One line of user input while a question is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCommand {
    /// Pick option `n` (0-based) as most like me.
    Most(usize),
    /// Pick option `n` (0-based) as least like me.
    Least(usize),
    Next,
    Back,
    Quit,
}

impl FromStr for QuizCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_lowercase();
        let index = parts
            .next()
            .map(|n| match n.parse::<usize>() {
                Ok(n @ 1..=4) => Ok(n - 1),
                _ => Err(format!("Option must be 1-4, got '{}'", n)),
            })
            .transpose()?;

        match (verb.as_str(), index) {
            ("m" | "most", Some(i)) => Ok(QuizCommand::Most(i)),
            ("l" | "least", Some(i)) => Ok(QuizCommand::Least(i)),
            ("n" | "next", None) => Ok(QuizCommand::Next),
            ("b" | "back", None) => Ok(QuizCommand::Back),
            ("q" | "quit", None) => Ok(QuizCommand::Quit),
            _ => Err(format!("Unrecognised command: '{}'", s.trim())),
        }
    }
}

/// How an interactive run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TakeOutcome {
    /// The attempt was not allowed to start.
    Rejected(BeginRejection),
    /// The user quit or input ended before the last question.
    Aborted,
    /// Results were produced, possibly with an error.
    Finished {
        exported: Option<PathBuf>,
        error: Option<String>,
    },
}

/// Line-oriented input/output pair.
pub struct Terminal<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Next non-empty line, or `None` at end of input.
    async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line).await? == 0 {
                return Ok(None);
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    pub async fn say(&mut self, text: &str) -> std::io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Run one full attempt for `username` on `instrument`.
pub async fn run_take<R, W>(
    app: &mut AppState,
    terminal: &mut Terminal<R, W>,
    username: &str,
    instrument: Instrument,
    export: bool,
) -> std::io::Result<TakeOutcome>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session::new();
    if let Err(rejection) = app.begin(&mut session, username, instrument) {
        terminal.say(&format!("Cannot start: {}", rejection)).await?;
        return Ok(TakeOutcome::Rejected(rejection));
    }

    terminal
        .say(&format!(
            "{}\n{}\nCommands: m <1-4> (most), l <1-4> (least), n (next), b (back), q (quit)",
            instrument.display_name(),
            instrument.description()
        ))
        .await?;

    while let Some(question) = session.current_question() {
        render_question(terminal, &session, question).await?;

        let Some(line) = terminal.read_line().await? else {
            warn!("Input ended mid-assessment");
            return Ok(TakeOutcome::Aborted);
        };

        let command = match line.parse::<QuizCommand>() {
            Ok(command) => command,
            Err(message) => {
                terminal.say(&message).await?;
                continue;
            }
        };
        debug!(?command, "Quiz command");

        let applied = match command {
            QuizCommand::Most(i) => session.select(Side::Most, question.options[i].word),
            QuizCommand::Least(i) => session.select(Side::Least, question.options[i].word),
            QuizCommand::Next => session.advance(),
            QuizCommand::Back => session.back(),
            QuizCommand::Quit => return Ok(TakeOutcome::Aborted),
        };
        if !applied {
            match command {
                QuizCommand::Next => {
                    terminal
                        .say("Pick one word for most and a different one for least first.")
                        .await?
                }
                QuizCommand::Back => terminal.say("Already at the first question.").await?,
                _ => {}
            }
        }
    }

    if session.is_calculating() {
        terminal
            .say("Finalizing your profile... submitting results and generating personalized analysis.")
            .await?;
        app.calculate(&mut session).await;
    }

    render_results(terminal, &session).await?;

    let exported = match session.report() {
        Ok(report) if export => match app.exporter.write(&report).await {
            Ok(path) => {
                terminal
                    .say(&format!("Saved report to {}", path.display()))
                    .await?;
                Some(path)
            }
            Err(e) => {
                terminal.say(&format!("Export failed: {}", e)).await?;
                None
            }
        },
        _ => None,
    };

    Ok(TakeOutcome::Finished {
        exported,
        error: session.error().map(str::to_string),
    })
}

async fn render_question<R, W>(
    terminal: &mut Terminal<R, W>,
    session: &Session,
    question: &Question,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let answer = session.current_answer();
    let mut text = String::new();

    if let Some(progress) = session.progress() {
        text.push_str(&format!(
            "\nQuestion {} of {} ({:.0}%)\nFrom this group, which word describes you...\n",
            progress.position,
            progress.total,
            progress.percent()
        ));
    }
    for (i, word) in question.words().enumerate() {
        let marker = match (answer.most() == Some(word), answer.least() == Some(word)) {
            (true, _) => " [most]",
            (_, true) => " [least]",
            _ => "",
        };
        text.push_str(&format!("  {}. {}{}\n", i + 1, word, marker));
    }

    terminal.say(text.trim_end()).await
}

async fn render_results<R, W>(
    terminal: &mut Terminal<R, W>,
    session: &Session,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let Phase::Results {
        scores,
        narrative,
        error,
    } = session.phase()
    else {
        return Ok(());
    };

    let mut text = String::from("\nYour scores:\n");
    for (label, value) in scores.iter() {
        text.push_str(&format!("- {}: {}\n", label, value));
    }
    if let Some(primary) = scores.primary() {
        text.push_str(&format!("Primary: {}\n", primary));
    }
    match (narrative, error) {
        (_, Some(error)) => text.push_str(&format!("\n{}\n", error)),
        (Some(narrative), None) => text.push_str(&format!("\n{}\n", narrative)),
        (None, None) => {}
    }

    terminal.say(text.trim_end()).await
}
