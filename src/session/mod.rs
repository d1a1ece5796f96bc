//! Screen-flow state machine for one assessment attempt.
//!
//! ```text
//! Start --begin--> InProgress --advance (last)--> Calculating --calculate--> Results
//!                  ^   |  answer/select/back/advance                              |
//!                  +---+                                                          |
//! Start <------------------------------- restart --------------------------------+
//! ```
//!
//! Disallowed transitions are no-ops that return `false`; none of them
//! is an error.

mod pipeline;

pub use pipeline::{finalize, Collaborators, Outcome, ERROR_PREFIX};

use tracing::{debug, info};

use crate::answers::{Answer, AnswerStore, Side};
use crate::error::{BeginRejection, ExportError};
use crate::export::Report;
use crate::instruments::{Instrument, Question};
use crate::ledger::CompletionLedger;
use crate::scoring::{score, ScoreVector};

/// Usernames must be longer than this once trimmed.
pub const MIN_USERNAME_CHARS: usize = 2;

/// Current screen and the data it owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Start,
    InProgress {
        instrument: Instrument,
        cursor: usize,
        answers: AnswerStore,
    },
    Calculating {
        instrument: Instrument,
        answers: AnswerStore,
        scores: Option<ScoreVector>,
    },
    Results {
        scores: ScoreVector,
        narrative: Option<String>,
        error: Option<String>,
    },
}

/// Quiz progress, for "Question n of N" and progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.position as f64 / self.total as f64 * 100.0
    }
}

/// Trimmed username if it is long enough to start an attempt.
pub fn validate_username(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (trimmed.chars().count() > MIN_USERNAME_CHARS).then_some(trimmed)
}

/// Caller-side gate for [`Session::begin`].
///
/// Rejects short usernames and instruments the user already completed.
/// Returns the trimmed username to begin with.
pub fn check_begin<'a>(
    ledger: &CompletionLedger,
    username: &'a str,
    instrument: Instrument,
) -> Result<&'a str, BeginRejection> {
    let username = validate_username(username).ok_or(BeginRejection::InvalidUsername)?;
    if ledger.is_completed(username, instrument) {
        return Err(BeginRejection::AlreadyCompleted {
            username: username.to_string(),
            instrument,
        });
    }
    Ok(username)
}

/// One user's pass through an instrument.
#[derive(Debug, Clone, Default)]
pub struct Session {
    username: Option<String>,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Instrument of the current attempt, if one is underway or finished.
    pub fn instrument(&self) -> Option<Instrument> {
        match &self.phase {
            Phase::Start => None,
            Phase::InProgress { instrument, .. } | Phase::Calculating { instrument, .. } => {
                Some(*instrument)
            }
            Phase::Results { scores, .. } => Some(scores.instrument()),
        }
    }

    /// Start a fresh attempt.
    ///
    /// Only valid from `Start` with a valid username. Completion is not
    /// checked here; callers gate with [`check_begin`].
    pub fn begin(&mut self, username: &str, instrument: Instrument) -> bool {
        if !matches!(self.phase, Phase::Start) {
            return false;
        }
        let Some(username) = validate_username(username) else {
            return false;
        };

        info!(username = %username, instrument = %instrument, "Assessment started");
        self.username = Some(username.to_string());
        self.phase = Phase::InProgress {
            instrument,
            cursor: 0,
            answers: AnswerStore::new(),
        };
        true
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        match &self.phase {
            Phase::InProgress {
                instrument, cursor, ..
            } => instrument.questions().get(*cursor),
            _ => None,
        }
    }

    /// Answer stored for the current question, or an empty one.
    pub fn current_answer(&self) -> Answer {
        match (&self.phase, self.current_question()) {
            (Phase::InProgress { answers, .. }, Some(question)) => {
                answers.get(question.id).cloned().unwrap_or_default()
            }
            _ => Answer::default(),
        }
    }

    pub fn progress(&self) -> Option<Progress> {
        match &self.phase {
            Phase::InProgress {
                instrument, cursor, ..
            } => Some(Progress {
                position: cursor + 1,
                total: instrument.len(),
            }),
            _ => None,
        }
    }

    /// Store `answer` for `question_id`, replacing any previous answer.
    ///
    /// Ignored unless in progress and `question_id` belongs to the instrument.
    pub fn answer(&mut self, question_id: u32, answer: Answer) -> bool {
        let Phase::InProgress {
            instrument,
            answers,
            ..
        } = &mut self.phase
        else {
            return false;
        };
        if instrument.question(question_id).is_none() {
            return false;
        }

        answers.set(question_id, answer);
        true
    }

    /// Pick `word` on `side` for the current question.
    pub fn select(&mut self, side: Side, word: &str) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        if question.option(word).is_none() {
            return false;
        }

        let next = self.current_answer().select(side, word);
        self.answer(question.id, next)
    }

    /// Move to the next question, or to `Calculating` after the last one.
    ///
    /// Refused while the current answer is incomplete.
    pub fn advance(&mut self) -> bool {
        if !self.current_answer().is_complete() {
            return false;
        }
        let Phase::InProgress {
            instrument,
            cursor,
            answers,
        } = &mut self.phase
        else {
            return false;
        };

        if *cursor + 1 < instrument.len() {
            *cursor += 1;
            debug!(cursor = *cursor, "Advanced to next question");
        } else {
            let instrument = *instrument;
            let answers = std::mem::take(answers);
            info!(instrument = %instrument, "All questions answered, calculating");
            self.phase = Phase::Calculating {
                instrument,
                answers,
                scores: None,
            };
        }
        true
    }

    /// Go back one question. A no-op on the first question.
    pub fn back(&mut self) -> bool {
        match &mut self.phase {
            Phase::InProgress { cursor, .. } if *cursor > 0 => {
                *cursor -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn is_calculating(&self) -> bool {
        matches!(self.phase, Phase::Calculating { .. })
    }

    /// Run the calculation step and move to `Results`.
    ///
    /// Takes the ledger by value and hands back the updated one. Outside
    /// `Calculating` the ledger is returned untouched.
    pub async fn calculate(
        &mut self,
        ledger: CompletionLedger,
        collaborators: Collaborators<'_>,
    ) -> CompletionLedger {
        let Phase::Calculating {
            instrument,
            answers,
            scores,
        } = &mut self.phase
        else {
            return ledger;
        };

        let computed = score(*instrument, answers);
        *scores = Some(computed.clone());

        let username = self.username.clone().unwrap_or_default();
        let (outcome, ledger) = finalize(&username, computed, ledger, collaborators).await;

        self.phase = Phase::Results {
            scores: outcome.scores,
            narrative: outcome.narrative,
            error: outcome.error,
        };
        ledger
    }

    pub fn scores(&self) -> Option<&ScoreVector> {
        match &self.phase {
            Phase::Calculating { scores, .. } => scores.as_ref(),
            Phase::Results { scores, .. } => Some(scores),
            _ => None,
        }
    }

    pub fn narrative(&self) -> Option<&str> {
        match &self.phase {
            Phase::Results { narrative, .. } => narrative.as_deref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Results { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Export is available once a narrative exists and no error was recorded.
    pub fn can_export(&self) -> bool {
        self.report().is_ok()
    }

    /// The exportable report for finished, successful results.
    pub fn report(&self) -> Result<Report<'_>, ExportError> {
        match &self.phase {
            Phase::Results {
                scores,
                narrative: Some(narrative),
                error: None,
            } => Ok(Report {
                username: self.username.as_deref().unwrap_or_default(),
                scores,
                narrative,
            }),
            _ => Err(ExportError::NotReady),
        }
    }

    /// Return to `Start`, clearing everything but the ledger (which the session never owns).
    ///
    /// Refused while calculating; an in-flight calculation cannot be cancelled.
    pub fn restart(&mut self) -> bool {
        if self.is_calculating() {
            return false;
        }
        info!("Session restarted");
        *self = Self::new();
        true
    }

    /// Jump straight to `Calculating` with whatever has been answered.
    #[cfg(test)]
    pub(crate) fn force_complete(&mut self) {
        if let Phase::InProgress {
            instrument,
            answers,
            ..
        } = &mut self.phase
        {
            let instrument = *instrument;
            let answers = std::mem::take(answers);
            self.phase = Phase::Calculating {
                instrument,
                answers,
                scores: None,
            };
        }
    }
}
