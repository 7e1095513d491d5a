use std::fmt;

use serde::Deserialize;
use uuid::Uuid;

/// Identifier assigned to a question when it is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionId(Uuid);

impl QuestionId {
    /// Generate a fresh, unique id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Question shape as reported by the trivia service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[default]
    Multiple,
    Boolean,
}

/// A fetched question with all text already entity-decoded.
///
/// Records are immutable once built; a new round replaces them wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRecord {
    id: QuestionId,
    kind: QuestionKind,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl QuestionRecord {
    pub fn new(
        question: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Self {
        Self {
            id: QuestionId::new(),
            kind: QuestionKind::default(),
            question: question.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers,
        }
    }

    pub fn with_kind(mut self, kind: QuestionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn incorrect_answers(&self) -> &[String] {
        &self.incorrect_answers
    }

    /// Exact, case-sensitive comparison against the correct answer.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}
