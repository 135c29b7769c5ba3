use std::path::{Path, PathBuf};

use tracing::warn;

use teori_core::model::Question;

use crate::error::QuestionSourceError;

/// A source of the full question pool.
///
/// One read returns every question; category filtering and ordering happen
/// in the session engine.
pub trait QuestionSource {
    /// Load the full pool.
    ///
    /// Records that fail validation (too few options, answer index out of
    /// range) are dropped with a warning rather than failing the load.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSourceError` if the pool cannot be read or parsed
    /// at all.
    fn load(&self) -> Result<Vec<Question>, QuestionSourceError>;
}

/// Loads questions from a JSON file holding an array of question records.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionSource for JsonFileSource {
    fn load(&self) -> Result<Vec<Question>, QuestionSourceError> {
        let bytes = std::fs::read(&self.path)?;
        let pool: Vec<Question> = serde_json::from_slice(&bytes)?;
        Ok(retain_valid(pool))
    }
}

/// Fixed in-memory pool for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    questions: Vec<Question>,
}

impl StaticSource {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

impl QuestionSource for StaticSource {
    fn load(&self) -> Result<Vec<Question>, QuestionSourceError> {
        Ok(retain_valid(self.questions.clone()))
    }
}

fn retain_valid(pool: Vec<Question>) -> Vec<Question> {
    pool.into_iter()
        .filter(|question| match question.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, id = ?question.id, "dropping invalid question");
                false
            }
        })
        .collect()
}
