//! Core types for the study engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type WordId = i64;
pub type StudyItemId = i64;

/// Stable identifier of a signed-in learner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnerId(pub String);

impl LearnerId {
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LearnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    /// Surface form.
    pub tango: String,
    /// Kana reading.
    pub yomi: String,
    /// Pitch-accent class: the mora after which pitch drops, 0 for none.
    pub pitch: u32,
    pub definition: String,
    pub pos: String,
    pub category: String,
}

/// A learner's spaced-repetition record for one word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyItem {
    pub id: StudyItemId,
    #[serde(rename = "item")]
    pub word: Word,
    pub due: DateTime<Utc>,
    /// Days until the next review, always >= 1.
    pub interval: f64,
    /// Multiplier applied to the interval on correct recall, always > 1.
    pub easing_factor: f64,
}

impl StudyItem {
    /// Whether interval and easing factor satisfy the scheduling invariants.
    pub fn is_valid(&self) -> bool {
        self.interval >= 1.0 && self.easing_factor > 1.0
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due <= now
    }
}

/// Candidate pitch value offered for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub yomi: String,
    pub pitch: u32,
    pub correct: bool,
}

/// Something the session can quiz: a bare word for anonymous learners,
/// a study item for signed-in ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueueEntry {
    Word(Word),
    Item(StudyItem),
}

impl QueueEntry {
    pub fn word(&self) -> &Word {
        match self {
            Self::Word(word) => word,
            Self::Item(item) => &item.word,
        }
    }

    pub fn study_item(&self) -> Option<&StudyItem> {
        match self {
            Self::Word(_) => None,
            Self::Item(item) => Some(item),
        }
    }
}

/// Feedback for the option the learner picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Index of the chosen option.
    pub clicked: usize,
    pub correct: bool,
}
