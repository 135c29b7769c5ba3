#![forbid(unsafe_code)]

pub mod error;
pub mod provider;
pub mod sessions;
pub mod shuffle;
pub mod timer;

pub use teori_core::Clock;

pub use error::QuestionSourceError;
pub use provider::{JsonFileSource, QuestionSource, StaticSource};
pub use sessions::QuizSession;
pub use shuffle::shuffled;
pub use timer::{Countdown, TickOutcome};
