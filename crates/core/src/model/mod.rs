mod question;
mod session;

pub use question::{CategoryError, CategoryName, Question, QuestionError, categories};
pub use session::{SessionMode, SessionProgress, SessionSettings, SettingsError};
