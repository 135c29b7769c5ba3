use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("session duration must be > 0 seconds")]
    InvalidDuration,

    #[error("test session size must be > 0")]
    InvalidTestSize,
}

//
// ─── MODE ─────────────────────────────────────────────────────────────────────
//

/// The screen the session is on.
///
/// One tagged value instead of the overlapping `mode`/`started`/category
/// flags a UI tends to grow: every representable combination is a reachable
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Start screen: pick training or a timed test.
    Menu,
    /// Training chosen, waiting for a category.
    CategorySelect,
    /// Category chosen, waiting for the user to start.
    Confirm,
    /// A question set is in play.
    Active,
    /// The attempt ended (last question passed, or time ran out).
    Finished,
}

//
// ─── SETTINGS ─────────────────────────────────────────────────────────────────
//

/// Tunable parameters of one quiz attempt.
///
/// Defaults match the real exam format: 70 questions in 50 minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    session_duration_secs: u32,
    test_session_size: usize,
}

impl SessionSettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter is zero.
    pub fn new(session_duration_secs: u32, test_session_size: usize) -> Result<Self, SettingsError> {
        if session_duration_secs == 0 {
            return Err(SettingsError::InvalidDuration);
        }
        if test_session_size == 0 {
            return Err(SettingsError::InvalidTestSize);
        }
        Ok(Self {
            session_duration_secs,
            test_session_size,
        })
    }

    /// Countdown length for one attempt, in seconds.
    #[must_use]
    pub fn session_duration_secs(&self) -> u32 {
        self.session_duration_secs
    }

    /// How many questions a test-mode attempt draws from the pool.
    #[must_use]
    pub fn test_session_size(&self) -> usize {
        self.test_session_size
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            // 50 minutes.
            session_duration_secs: 50 * 60,
            test_session_size: 70,
        }
    }
}

//
// ─── PROGRESS ─────────────────────────────────────────────────────────────────
//

/// Aggregated view of session progress, useful for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    /// 1-based position of the question on screen; 0 when no set is in play.
    pub position: usize,
    pub score: u32,
    pub time_remaining_secs: u32,
    pub is_complete: bool,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
