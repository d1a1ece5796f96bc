//! Reduction of an answer store to a per-trait score vector.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::answers::AnswerStore;
use crate::instruments::{Instrument, TraitLabel};

/// Final per-trait tally for one attempt.
///
/// Holds exactly one entry per trait of its instrument, in the
/// instrument's trait order. Serializes as a `{ "Trait": value }` map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreVector {
    instrument: Instrument,
    entries: Vec<(TraitLabel, i32)>,
}

impl ScoreVector {
    /// All-zero vector for `instrument`.
    pub fn zeroed(instrument: Instrument) -> Self {
        Self {
            instrument,
            entries: instrument.traits().iter().map(|t| (*t, 0)).collect(),
        }
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// Score for `label`, or `None` if the trait is not part of this instrument.
    pub fn get(&self, label: TraitLabel) -> Option<i32> {
        self.entries
            .iter()
            .find(|(t, _)| *t == label)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TraitLabel, i32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest-scoring trait. Ties resolve to the later trait.
    pub fn primary(&self) -> Option<TraitLabel> {
        self.entries
            .iter()
            .fold(None, |best: Option<(TraitLabel, i32)>, &(t, v)| match best {
                Some((_, bv)) if bv > v => best,
                _ => Some((t, v)),
            })
            .map(|(t, _)| t)
    }

    fn adjust(&mut self, label: TraitLabel, delta: i32) {
        if let Some(entry) = self.entries.iter_mut().find(|(t, _)| *t == label) {
            entry.1 += delta;
        }
    }
}

impl Serialize for ScoreVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label.name(), value)?;
        }
        map.end()
    }
}

/// Score `answers` against `instrument`.
///
/// For each question in order: the `most` word's trait gains one and the
/// `least` word's trait loses one. The two slots are independent, so a
/// partial answer still counts. Words not offered by the question are ignored.
pub fn score(instrument: Instrument, answers: &AnswerStore) -> ScoreVector {
    let mut scores = ScoreVector::zeroed(instrument);

    for question in instrument.questions() {
        let Some(answer) = answers.get(question.id) else {
            continue;
        };
        if let Some(option) = answer.most().and_then(|w| question.option(w)) {
            scores.adjust(option.label, 1);
        }
        if let Some(option) = answer.least().and_then(|w| question.option(w)) {
            scores.adjust(option.label, -1);
        }
    }

    scores
}
