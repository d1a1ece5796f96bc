//! Question banks for the two supported instruments.
//!
//! Both banks are static and immutable. Every question offers four words,
//! one per trait of its instrument, so the trait labels within a question
//! are pairwise distinct.

mod banks;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use banks::{DISC_QUESTIONS, HERRMANN_QUESTIONS};

/// One of the two fixed question sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    /// Four-factor behavioural style model.
    Disc,
    /// Four-quadrant thinking style model.
    Herrmann,
}

/// A scored dimension. DISC and Herrmann each own four of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TraitLabel {
    Dominance,
    Influence,
    Steadiness,
    Conscientiousness,
    Analytical,
    Sequential,
    Interpersonal,
    Imaginative,
}

/// A selectable word tagged with the trait it scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordOption {
    pub word: &'static str,
    pub label: TraitLabel,
}

/// One forced-choice word group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Identifier, unique within its instrument.
    pub id: u32,
    pub options: [WordOption; 4],
}

const DISC_TRAITS: [TraitLabel; 4] = [
    TraitLabel::Dominance,
    TraitLabel::Influence,
    TraitLabel::Steadiness,
    TraitLabel::Conscientiousness,
];

const HERRMANN_TRAITS: [TraitLabel; 4] = [
    TraitLabel::Analytical,
    TraitLabel::Sequential,
    TraitLabel::Interpersonal,
    TraitLabel::Imaginative,
];

impl Instrument {
    /// Every supported instrument, in menu order.
    pub const ALL: [Instrument; 2] = [Instrument::Disc, Instrument::Herrmann];

    /// Stable identifier used in storage and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Instrument::Disc => "disc",
            Instrument::Herrmann => "herrmann",
        }
    }

    /// Human-readable name used in exported documents.
    pub fn display_name(&self) -> &'static str {
        match self {
            Instrument::Disc => "DISC Assessment",
            Instrument::Herrmann => "Herrmann Model",
        }
    }

    /// Short description shown on the start screen.
    pub fn description(&self) -> &'static str {
        match self {
            Instrument::Disc => "Understand your behavioral style. The DISC model focuses on Dominance, Influence, Steadiness, and Conscientiousness.",
            Instrument::Herrmann => "Discover your thinking preferences across the Analytical, Sequential, Interpersonal, and Imaginative quadrants.",
        }
    }

    /// The traits scored by this instrument, in report order.
    pub fn traits(&self) -> &'static [TraitLabel] {
        match self {
            Instrument::Disc => &DISC_TRAITS,
            Instrument::Herrmann => &HERRMANN_TRAITS,
        }
    }

    /// The ordered question sequence.
    pub fn questions(&self) -> &'static [Question] {
        match self {
            Instrument::Disc => &DISC_QUESTIONS,
            Instrument::Herrmann => &HERRMANN_QUESTIONS,
        }
    }

    /// Look up a question by its identifier.
    pub fn question(&self, id: u32) -> Option<&'static Question> {
        self.questions().iter().find(|q| q.id == id)
    }

    /// Number of questions in the instrument.
    pub fn len(&self) -> usize {
        self.questions().len()
    }

    /// Always false; both banks are populated.
    pub fn is_empty(&self) -> bool {
        self.questions().is_empty()
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Instrument {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disc" => Ok(Instrument::Disc),
            "herrmann" => Ok(Instrument::Herrmann),
            _ => Err(format!("Unknown instrument: {}", s)),
        }
    }
}

impl TraitLabel {
    /// Display name, identical to the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            TraitLabel::Dominance => "Dominance",
            TraitLabel::Influence => "Influence",
            TraitLabel::Steadiness => "Steadiness",
            TraitLabel::Conscientiousness => "Conscientiousness",
            TraitLabel::Analytical => "Analytical",
            TraitLabel::Sequential => "Sequential",
            TraitLabel::Interpersonal => "Interpersonal",
            TraitLabel::Imaginative => "Imaginative",
        }
    }

    /// Instrument that scores this trait.
    pub fn instrument(&self) -> Instrument {
        match self {
            TraitLabel::Dominance
            | TraitLabel::Influence
            | TraitLabel::Steadiness
            | TraitLabel::Conscientiousness => Instrument::Disc,
            _ => Instrument::Herrmann,
        }
    }

    /// Herrmann quadrant colour, if this is a Herrmann quadrant.
    pub fn colour(&self) -> Option<&'static str> {
        match self {
            TraitLabel::Analytical => Some("Blue"),
            TraitLabel::Sequential => Some("Green"),
            TraitLabel::Interpersonal => Some("Red"),
            TraitLabel::Imaginative => Some("Yellow"),
            _ => None,
        }
    }
}

impl fmt::Display for TraitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Question {
    /// Find the option carrying `word`, if any.
    pub fn option(&self, word: &str) -> Option<&WordOption> {
        self.options.iter().find(|opt| opt.word == word)
    }

    /// The words of this question, in display order.
    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.options.iter().map(|opt| opt.word)
    }
}
