//! Per-question most/least selections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which column a word is being picked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// "Most like me"
    Most,
    /// "Least like me"
    Least,
}

impl Side {
    /// The opposing column.
    pub fn other(self) -> Side {
        match self {
            Side::Most => Side::Least,
            Side::Least => Side::Most,
        }
    }
}

/// A user's selection for a single question.
///
/// `most` and `least` never name the same word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AnswerSlots")]
pub struct Answer {
    most: Option<String>,
    least: Option<String>,
}

/// Unchecked wire form of [`Answer`].
#[derive(Deserialize)]
struct AnswerSlots {
    most: Option<String>,
    least: Option<String>,
}

impl TryFrom<AnswerSlots> for Answer {
    type Error = String;

    fn try_from(slots: AnswerSlots) -> Result<Self, Self::Error> {
        Answer::new(slots.most.as_deref(), slots.least.as_deref()).ok_or_else(|| {
            format!(
                "'{}' cannot be both most and least",
                slots.most.unwrap_or_default()
            )
        })
    }
}

impl Answer {
    /// Build an answer from both slots. Returns `None` when both name the same word.
    pub fn new(most: Option<&str>, least: Option<&str>) -> Option<Self> {
        if most.is_some() && most == least {
            return None;
        }
        Some(Self {
            most: most.map(str::to_string),
            least: least.map(str::to_string),
        })
    }

    pub fn most(&self) -> Option<&str> {
        self.most.as_deref()
    }

    pub fn least(&self) -> Option<&str> {
        self.least.as_deref()
    }

    /// Word selected on `side`, if any.
    pub fn get(&self, side: Side) -> Option<&str> {
        match side {
            Side::Most => self.most(),
            Side::Least => self.least(),
        }
    }

    /// Both slots are filled.
    pub fn is_complete(&self) -> bool {
        self.most.is_some() && self.least.is_some()
    }

    /// Pick `word` on `side`, clearing the opposite slot if it held the same word.
    pub fn select(&self, side: Side, word: &str) -> Answer {
        let mut next = self.clone();
        if next.get(side.other()) == Some(word) {
            *next.slot_mut(side.other()) = None;
        }
        *next.slot_mut(side) = Some(word.to_string());
        next
    }

    fn slot_mut(&mut self, side: Side) -> &mut Option<String> {
        match side {
            Side::Most => &mut self.most,
            Side::Least => &mut self.least,
        }
    }
}

/// Answers keyed by question id. Absent keys are unanswered questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    answers: BTreeMap<u32, Answer>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: u32) -> Option<&Answer> {
        self.answers.get(&question_id)
    }

    /// Replace whatever was stored for `question_id`.
    pub fn set(&mut self, question_id: u32, answer: Answer) {
        self.answers.insert(question_id, answer);
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

}
