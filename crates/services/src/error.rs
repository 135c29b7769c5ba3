//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted while loading a question pool.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionSourceError {
    #[error("failed to read question data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse question data: {0}")]
    Parse(#[from] serde_json::Error),
}
