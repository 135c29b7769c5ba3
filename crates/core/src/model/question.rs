use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised when a question record violates its invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("a question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("answer index {answer} is out of range for {len} options")]
    AnswerOutOfRange { answer: usize, len: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,
}

//
// ─── CATEGORY ─────────────────────────────────────────────────────────────────
//

/// Validated category label (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a validated category name.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, CategoryError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// One multiple-choice question from the pool.
///
/// The serde field names follow the question data file: the prompt is stored
/// under `question` and the correct option index under `answer`. The pool is
/// read-only for the duration of a session; nothing in the engine mutates a
/// question after it is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Opaque identifier owned by the data file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Category label used to scope training sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(rename = "question")]
    pub prompt: String,

    /// Ordered answer options, at least two.
    pub options: Vec<String>,

    /// Index into `options` of the correct answer.
    #[serde(rename = "answer")]
    pub answer_index: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Relative path of an illustration asset, when the question has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Question {
    /// Check the record invariants: at least two options, answer in range.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::TooFewOptions` or
    /// `QuestionError::AnswerOutOfRange` accordingly.
    pub fn validate(&self) -> Result<(), QuestionError> {
        let len = self.options.len();
        if len < 2 {
            return Err(QuestionError::TooFewOptions { len });
        }
        if self.answer_index >= len {
            return Err(QuestionError::AnswerOutOfRange {
                answer: self.answer_index,
                len,
            });
        }
        Ok(())
    }

    /// Whether the given option index is the correct answer.
    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.answer_index
    }

    /// Whether this question belongs to the given category.
    #[must_use]
    pub fn in_category(&self, category: &CategoryName) -> bool {
        self.category.as_deref() == Some(category.as_str())
    }
}

/// Distinct category labels of a pool, in first-seen order.
///
/// Questions without a category (or with a blank label) contribute nothing;
/// the result drives the training-mode category menu.
#[must_use]
pub fn categories(questions: &[Question]) -> Vec<CategoryName> {
    let mut seen = Vec::new();
    for question in questions {
        let Some(label) = question.category.as_deref() else {
            continue;
        };
        let Ok(name) = CategoryName::new(label) else {
            continue;
        };
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
