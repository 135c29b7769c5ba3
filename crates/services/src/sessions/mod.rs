mod service;

// Public API of the session subsystem.
pub use service::QuizSession;
