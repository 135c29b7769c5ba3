use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use storage::repository::SnapshotStore;
use storage::snapshot::{SessionSnapshot, SessionStore};
use teori_core::Clock;
use teori_core::model::{
    CategoryName, Question, SessionMode, SessionProgress, SessionSettings, categories,
};

use crate::shuffle::shuffled;
use crate::timer::{Countdown, TickOutcome};

//
// ─── QUIZ SESSION ─────────────────────────────────────────────────────────────
//

/// The quiz session state machine.
///
/// Owns all mutable session state for one attempt and the countdown that
/// goes with it. User intents and timer ticks are the only stimuli; an
/// intent that is not valid in the current mode is silently ignored, so
/// duplicate or out-of-order input can never corrupt an attempt.
///
/// Every transition that touches persisted state writes through to the
/// injected snapshot store. Writes are fire-and-forget: a failure is logged
/// and swallowed, and the in-memory state stays authoritative.
pub struct QuizSession {
    settings: SessionSettings,
    clock: Clock,
    pool: Vec<Question>,
    store: SessionStore,

    mode: SessionMode,
    selected_category: Option<CategoryName>,
    question_set: Vec<Question>,
    current: usize,
    selected: Option<usize>,
    score: u32,
    timer: Countdown,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session machine on the menu screen.
    ///
    /// `pool` is the full question pool (read-only for the lifetime of the
    /// machine); `store` is the external store that snapshots are written
    /// into.
    #[must_use]
    pub fn new(pool: Vec<Question>, store: Arc<dyn SnapshotStore>) -> Self {
        let settings = SessionSettings::default();
        let mut timer = Countdown::new();
        timer.reset(settings.session_duration_secs());

        Self {
            settings,
            clock: Clock::default_clock(),
            pool,
            store: SessionStore::new(store),
            mode: SessionMode::Menu,
            selected_category: None,
            question_set: Vec::new(),
            current: 0,
            selected: None,
            score: 0,
            timer,
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self.timer.reset(settings.session_duration_secs());
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    //
    // ─── RESTORE ──────────────────────────────────────────────────────────
    //

    /// Pick up a previously persisted in-progress attempt, if one exists.
    ///
    /// Call once at startup, from the menu. When the snapshot says an
    /// attempt was running, the machine re-enters `Active` and re-arms the
    /// countdown at the saved remaining time immediately — the attempt
    /// resumes counting down without further user action. Missing numeric
    /// fields fall back to defaults; a snapshot without a usable question
    /// set (absent, empty, or an index past its end) is rejected whole.
    ///
    /// Returns whether an attempt was resumed.
    pub fn resume_saved(&mut self) -> bool {
        if self.mode != SessionMode::Menu {
            return false;
        }
        let Some(snapshot) = self.store.load() else {
            return false;
        };
        if snapshot.started != Some(true) {
            return false;
        }
        let Some(question_set) = snapshot.shuffled else {
            debug!("saved session has no question set; ignoring");
            return false;
        };
        if question_set.is_empty() {
            debug!("saved session has an empty question set; ignoring");
            return false;
        }
        let current = snapshot.current.unwrap_or(0);
        if current >= question_set.len() {
            debug!(
                current,
                len = question_set.len(),
                "saved session index is out of range; ignoring"
            );
            return false;
        }

        let time_left = snapshot
            .time_left
            .unwrap_or_else(|| self.settings.session_duration_secs());

        self.question_set = question_set;
        self.current = current;
        self.selected = None;
        self.score = snapshot.score.unwrap_or(0);
        self.selected_category = None;
        self.started_at = Some(self.clock.now());
        self.completed_at = None;
        self.timer.start(time_left);
        self.mode = SessionMode::Active;

        debug!(
            current = self.current,
            score = self.score,
            time_left,
            total = self.question_set.len(),
            "resumed saved session"
        );
        true
    }

    //
    // ─── INTENTS ──────────────────────────────────────────────────────────
    //

    /// Menu → category selection (training mode).
    pub fn choose_training(&mut self) {
        if self.mode != SessionMode::Menu {
            return;
        }
        self.selected_category = None;
        self.mode = SessionMode::CategorySelect;
        debug!("entering category selection");
    }

    /// Menu → active test attempt: shuffle the full pool and draw up to the
    /// test session size. Auto-confirms; there is no confirm screen for
    /// test mode.
    pub fn choose_test(&mut self) {
        if self.mode != SessionMode::Menu {
            return;
        }
        let mut question_set = shuffled(&self.pool);
        question_set.truncate(self.settings.test_session_size());
        debug!(total = question_set.len(), "starting test session");
        self.start_active(question_set, None);
    }

    /// Category selection → confirm screen.
    ///
    /// A category with no matching questions is accepted here; starting it
    /// yields an empty set and an immediately finished attempt.
    pub fn choose_category(&mut self, category: CategoryName) {
        if self.mode != SessionMode::CategorySelect {
            return;
        }
        debug!(category = %category, "category picked");
        self.selected_category = Some(category);
        self.mode = SessionMode::Confirm;
    }

    /// Confirm screen → active training attempt: all pool questions in the
    /// chosen category, shuffled.
    pub fn confirm_start(&mut self) {
        if self.mode != SessionMode::Confirm {
            return;
        }
        let Some(category) = self.selected_category.clone() else {
            return;
        };
        let matches: Vec<Question> = self
            .pool
            .iter()
            .filter(|q| q.in_category(&category))
            .cloned()
            .collect();
        let question_set = shuffled(&matches);
        debug!(category = %category, total = question_set.len(), "starting training session");
        self.start_active(question_set, Some(category));
    }

    /// Answer the current question.
    ///
    /// Valid only while active and unanswered; an out-of-range index, a
    /// repeat answer, and any other mode are ignored. Scores exactly +1
    /// when the index hits the question's answer. Does not advance.
    pub fn select_option(&mut self, index: usize) {
        if self.mode != SessionMode::Active || self.selected.is_some() {
            return;
        }
        let correct = match self.question_set.get(self.current) {
            Some(question) if index < question.options.len() => question.is_correct(index),
            _ => return,
        };

        self.selected = Some(index);
        if correct {
            self.score += 1;
        }
        debug!(index, correct, score = self.score, "answer recorded");
        self.persist();
    }

    /// Step to the next question, or finish after the last one.
    ///
    /// Ignored until the current question has been answered.
    pub fn advance(&mut self) {
        if self.mode != SessionMode::Active || self.selected.is_none() {
            return;
        }
        if self.current + 1 >= self.question_set.len() {
            self.enter_finished();
            return;
        }
        self.current += 1;
        self.selected = None;
        self.persist();
    }

    /// Deliver one one-second tick to the countdown.
    ///
    /// Expiry finishes the attempt regardless of whether the current
    /// question was answered; the running score is kept as-is. The
    /// `Expired` outcome surfaces exactly once.
    pub fn tick(&mut self) -> TickOutcome {
        if self.mode != SessionMode::Active {
            return TickOutcome::Ignored;
        }
        let outcome = self.timer.tick();
        match outcome {
            TickOutcome::Ignored => {}
            TickOutcome::Ticked { .. } => self.persist(),
            TickOutcome::Expired => {
                debug!(score = self.score, "time expired");
                self.enter_finished();
            }
        }
        outcome
    }

    /// Leave the current screen for the menu.
    ///
    /// From the finished screen this ends the attempt for good: the
    /// persisted snapshot is deleted and every session field returns to its
    /// initial value. From category selection or the confirm screen it
    /// just backs out, discarding the chosen category. Ignored while a set
    /// is in play.
    pub fn return_to_menu(&mut self) {
        match self.mode {
            SessionMode::CategorySelect | SessionMode::Confirm => {
                self.selected_category = None;
                self.mode = SessionMode::Menu;
            }
            SessionMode::Finished => {
                if let Err(err) = self.store.clear() {
                    warn!(error = %err, "failed to clear session snapshot");
                }
                self.reset_fields();
                self.mode = SessionMode::Menu;
                debug!("session dismissed, back on menu");
            }
            SessionMode::Menu | SessionMode::Active => {}
        }
    }

    //
    // ─── ACCESSORS ────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<&CategoryName> {
        self.selected_category.as_ref()
    }

    /// Distinct categories of the pool, for the training menu.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryName> {
        categories(&self.pool)
    }

    #[must_use]
    pub fn question_set(&self) -> &[Question] {
        &self.question_set
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.question_set.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.mode == SessionMode::Active {
            self.question_set.get(self.current)
        } else {
            None
        }
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn time_remaining_secs(&self) -> u32 {
        self.timer.remaining()
    }

    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.question_set.len();
        SessionProgress {
            total,
            position: if total == 0 {
                0
            } else {
                (self.current + 1).min(total)
            },
            score: self.score,
            time_remaining_secs: self.timer.remaining(),
            is_complete: self.mode == SessionMode::Finished,
        }
    }

    //
    // ─── INTERNALS ────────────────────────────────────────────────────────
    //

    /// Enter `Active` with a freshly built question set.
    ///
    /// An empty set has nothing to display, so the attempt finishes on the
    /// spot instead of indexing out of bounds.
    fn start_active(&mut self, question_set: Vec<Question>, category: Option<CategoryName>) {
        self.question_set = question_set;
        self.selected_category = category;
        self.current = 0;
        self.selected = None;
        self.score = 0;
        self.started_at = Some(self.clock.now());
        self.completed_at = None;
        self.timer.start(self.settings.session_duration_secs());
        self.mode = SessionMode::Active;

        if self.question_set.is_empty() {
            self.enter_finished();
        } else {
            self.persist();
        }
    }

    /// The single exit from `Active`: stop the countdown, stamp completion,
    /// persist. Finishing twice is harmless; stray ticks afterwards are
    /// ignored by mode and by the stopped countdown.
    fn enter_finished(&mut self) {
        self.timer.stop();
        self.completed_at = Some(self.clock.now());
        self.mode = SessionMode::Finished;
        self.persist();
    }

    /// Return every session field to the value it holds on a fresh machine,
    /// mirroring `new`. The caller is responsible for setting `mode`.
    fn reset_fields(&mut self) {
        self.selected_category = None;
        self.question_set = Vec::new();
        self.current = 0;
        self.selected = None;
        self.score = 0;
        self.started_at = None;
        self.completed_at = None;
        self.timer.reset(self.settings.session_duration_secs());
    }

    /// Write-through of the persisted subset. Failures are logged and
    /// swallowed; the next mutation's write is the retry.
    fn persist(&mut self) {
        let snapshot = SessionSnapshot::capture(
            self.timer.is_running(),
            self.timer.remaining(),
            self.current,
            self.score,
            &self.question_set,
        );
        if let Err(err) = self.store.save(&snapshot) {
            warn!(error = %err, "failed to persist session snapshot");
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("mode", &self.mode)
            .field("pool_len", &self.pool.len())
            .field("question_set_len", &self.question_set.len())
            .field("current", &self.current)
            .field("selected", &self.selected)
            .field("score", &self.score)
            .field("time_remaining", &self.timer.remaining())
            .field("timer_running", &self.timer.is_running())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::{InMemoryStore, StorageError};
    use storage::snapshot::SNAPSHOT_KEY;
    use teori_core::time::fixed_clock;

    fn build_question(category: &str, answer: usize) -> Question {
        Question {
            id: None,
            category: Some(category.to_owned()),
            prompt: format!("{category}?"),
            options: vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
            answer_index: answer,
            explanation: None,
            image: None,
        }
    }

    fn build_pool(len: usize) -> Vec<Question> {
        (0..len)
            .map(|i| build_question(if i % 2 == 0 { "A" } else { "B" }, i % 3))
            .collect()
    }

    fn machine(pool: Vec<Question>, store: Arc<InMemoryStore>) -> QuizSession {
        QuizSession::new(pool, store)
            .with_clock(fixed_clock())
            .with_settings(SessionSettings::new(10, 3).unwrap())
    }

    fn answer_current_correctly(session: &mut QuizSession) {
        let answer = session.current_question().unwrap().answer_index;
        session.select_option(answer);
    }

    #[test]
    fn fresh_machine_sits_on_menu_with_full_time() {
        let session = machine(build_pool(4), Arc::new(InMemoryStore::new()));
        assert_eq!(session.mode(), SessionMode::Menu);
        assert_eq!(session.time_remaining_secs(), 10);
        assert!(!session.timer_running());
        assert_eq!(session.total_questions(), 0);
    }

    #[test]
    fn test_mode_draws_up_to_the_test_size() {
        let mut session = machine(build_pool(9), Arc::new(InMemoryStore::new()));
        session.choose_test();

        assert_eq!(session.mode(), SessionMode::Active);
        assert_eq!(session.total_questions(), 3);
        assert!(session.timer_running());
        assert_eq!(session.time_remaining_secs(), 10);
        assert_eq!(session.started_at(), Some(fixed_clock().now()));
    }

    #[test]
    fn undersized_pool_uses_everything_it_has() {
        let mut session = machine(build_pool(2), Arc::new(InMemoryStore::new()));
        session.choose_test();
        assert_eq!(session.total_questions(), 2);
    }

    #[test]
    fn training_flow_filters_by_category() {
        // 3 questions, exactly 2 in category "A".
        let pool = vec![
            build_question("A", 0),
            build_question("B", 1),
            build_question("A", 2),
        ];
        let mut session = machine(pool, Arc::new(InMemoryStore::new()));

        session.choose_training();
        assert_eq!(session.mode(), SessionMode::CategorySelect);

        session.choose_category(CategoryName::new("A").unwrap());
        assert_eq!(session.mode(), SessionMode::Confirm);
        assert_eq!(session.selected_category().unwrap().as_str(), "A");

        session.confirm_start();
        assert_eq!(session.mode(), SessionMode::Active);
        assert_eq!(session.total_questions(), 2);
        assert!(session.question_set().iter().all(|q| q.category.as_deref() == Some("A")));

        answer_current_correctly(&mut session);
        session.advance();
        answer_current_correctly(&mut session);
        session.advance();

        assert_eq!(session.mode(), SessionMode::Finished);
        assert_eq!(session.score(), 2);
        assert!(!session.timer_running());
    }

    #[test]
    fn zero_match_category_finishes_immediately() {
        let mut session = machine(build_pool(4), Arc::new(InMemoryStore::new()));
        session.choose_training();
        session.choose_category(CategoryName::new("No such category").unwrap());
        session.confirm_start();

        assert_eq!(session.mode(), SessionMode::Finished);
        assert_eq!(session.total_questions(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.timer_running());
    }

    #[test]
    fn backing_out_of_confirm_discards_the_category() {
        let mut session = machine(build_pool(4), Arc::new(InMemoryStore::new()));
        session.choose_training();
        session.choose_category(CategoryName::new("A").unwrap());

        session.return_to_menu();
        assert_eq!(session.mode(), SessionMode::Menu);
        assert!(session.selected_category().is_none());
    }

    #[test]
    fn correct_answer_scores_exactly_one() {
        let mut session = machine(build_pool(4), Arc::new(InMemoryStore::new()));
        session.choose_test();

        let answer = session.current_question().unwrap().answer_index;
        let wrong = (answer + 1) % session.current_question().unwrap().options.len();

        session.select_option(wrong);
        assert_eq!(session.score(), 0);
        assert_eq!(session.selected_option(), Some(wrong));

        session.advance();
        answer_current_correctly(&mut session);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn answering_twice_changes_nothing() {
        let mut session = machine(build_pool(4), Arc::new(InMemoryStore::new()));
        session.choose_test();

        let answer = session.current_question().unwrap().answer_index;
        session.select_option(answer);
        assert_eq!(session.score(), 1);

        // A second answer, right or wrong, is ignored.
        session.select_option(answer);
        let other = (answer + 1) % 3;
        session.select_option(other);
        assert_eq!(session.score(), 1);
        assert_eq!(session.selected_option(), Some(answer));
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let mut session = machine(build_pool(4), Arc::new(InMemoryStore::new()));
        session.choose_test();

        session.select_option(99);
        assert_eq!(session.selected_option(), None);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn advance_waits_for_an_answer() {
        let mut session = machine(build_pool(4), Arc::new(InMemoryStore::new()));
        session.choose_test();

        session.advance();
        assert_eq!(session.current_index(), 0);

        answer_current_correctly(&mut session);
        session.advance();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.selected_option(), None);
    }

    #[test]
    fn advancing_past_the_last_question_finishes() {
        let mut session = machine(build_pool(2), Arc::new(InMemoryStore::new()));
        session.choose_test();
        assert_eq!(session.total_questions(), 2);

        answer_current_correctly(&mut session);
        session.advance();
        answer_current_correctly(&mut session);
        session.advance();

        assert_eq!(session.mode(), SessionMode::Finished);
        assert!(!session.timer_running());
        assert!(session.completed_at().is_some());

        // Finished sessions ignore answers and advances.
        session.select_option(0);
        session.advance();
        assert_eq!(session.mode(), SessionMode::Finished);
    }

    #[test]
    fn tick_counts_down_and_expiry_finishes_once() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = machine(build_pool(4), Arc::clone(&store))
            .with_settings(SessionSettings::new(2, 3).unwrap());
        session.choose_test();

        assert_eq!(session.tick(), TickOutcome::Ticked { remaining: 1 });
        assert_eq!(session.tick(), TickOutcome::Expired);
        assert_eq!(session.mode(), SessionMode::Finished);
        assert_eq!(session.time_remaining_secs(), 0);
        assert!(!session.timer_running());

        // Stray ticks after expiry do nothing and never re-fire.
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.time_remaining_secs(), 0);
    }

    #[test]
    fn one_second_left_expires_on_the_next_tick() {
        let mut session = machine(build_pool(4), Arc::new(InMemoryStore::new()))
            .with_settings(SessionSettings::new(1, 3).unwrap());
        session.choose_test();
        assert!(session.timer_running());

        assert_eq!(session.tick(), TickOutcome::Expired);
        assert_eq!(session.time_remaining_secs(), 0);
        assert_eq!(session.mode(), SessionMode::Finished);
        assert!(!session.timer_running());
    }

    #[test]
    fn expiry_preserves_score_and_selection() {
        let mut session = machine(build_pool(4), Arc::new(InMemoryStore::new()))
            .with_settings(SessionSettings::new(1, 3).unwrap());
        session.choose_test();
        answer_current_correctly(&mut session);

        session.tick();
        assert_eq!(session.mode(), SessionMode::Finished);
        assert_eq!(session.score(), 1);
        let expected = session.question_set()[0].answer_index;
        assert_eq!(session.selected_option(), Some(expected));
    }

    #[test]
    fn ticks_outside_active_are_ignored() {
        let mut session = machine(build_pool(4), Arc::new(InMemoryStore::new()));
        assert_eq!(session.tick(), TickOutcome::Ignored);

        session.choose_training();
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.time_remaining_secs(), 10);
    }

    #[test]
    fn finished_to_menu_clears_the_snapshot_and_resets() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = machine(build_pool(2), Arc::clone(&store));
        session.choose_test();
        answer_current_correctly(&mut session);
        session.advance();
        answer_current_correctly(&mut session);
        session.advance();
        assert_eq!(session.mode(), SessionMode::Finished);
        assert!(store.get(SNAPSHOT_KEY).unwrap().is_some());

        session.return_to_menu();
        assert_eq!(session.mode(), SessionMode::Menu);
        assert!(store.get(SNAPSHOT_KEY).unwrap().is_none());
        assert_eq!(session.score(), 0);
        assert_eq!(session.total_questions(), 0);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.selected_option(), None);
        assert_eq!(session.time_remaining_secs(), 10);
        assert!(session.started_at().is_none());
    }

    #[test]
    fn score_never_decreases_over_a_run() {
        let mut session = machine(build_pool(6), Arc::new(InMemoryStore::new()));
        session.choose_test();

        let mut last_score = 0;
        while session.mode() == SessionMode::Active {
            session.select_option(0);
            assert!(session.score() >= last_score);
            assert!(session.score() <= session.current_index() as u32 + 1);
            last_score = session.score();
            session.advance();
        }
    }

    #[test]
    fn saved_active_session_resumes_with_the_same_fields() {
        let store = Arc::new(InMemoryStore::new());
        let mut first = machine(build_pool(6), Arc::clone(&store));
        first.choose_test();
        answer_current_correctly(&mut first);
        first.advance();
        first.tick();
        let expected_set: Vec<Question> = first.question_set().to_vec();
        let expected_time = first.time_remaining_secs();

        // A new machine over the same store models a process restart.
        let mut second = machine(build_pool(6), Arc::clone(&store));
        assert!(second.resume_saved());

        assert_eq!(second.mode(), SessionMode::Active);
        assert_eq!(second.current_index(), 1);
        assert_eq!(second.score(), 1);
        assert_eq!(second.time_remaining_secs(), expected_time);
        assert_eq!(second.question_set(), &expected_set[..]);
        assert!(second.timer_running());
        assert_eq!(second.selected_option(), None);
    }

    #[test]
    fn resume_ignores_snapshots_that_were_not_running() {
        let store = Arc::new(InMemoryStore::new());
        let mut first = machine(build_pool(2), Arc::clone(&store));
        first.choose_test();
        answer_current_correctly(&mut first);
        first.advance();
        answer_current_correctly(&mut first);
        first.advance();
        assert_eq!(first.mode(), SessionMode::Finished);

        let mut second = machine(build_pool(2), Arc::clone(&store));
        assert!(!second.resume_saved());
        assert_eq!(second.mode(), SessionMode::Menu);
    }

    #[test]
    fn resume_rejects_an_out_of_range_index() {
        let store = Arc::new(InMemoryStore::new());
        let snapshot = SessionSnapshot::capture(true, 100, 7, 2, &build_pool(2));
        SessionStore::new(Arc::clone(&store) as Arc<dyn SnapshotStore>)
            .save(&snapshot)
            .unwrap();

        let mut session = machine(build_pool(2), store);
        assert!(!session.resume_saved());
        assert_eq!(session.mode(), SessionMode::Menu);
    }

    #[test]
    fn resume_fills_missing_time_with_the_full_duration() {
        let store = Arc::new(InMemoryStore::new());
        let snapshot = SessionSnapshot {
            started: Some(true),
            time_left: None,
            current: Some(0),
            score: None,
            shuffled: Some(build_pool(2)),
        };
        SessionStore::new(Arc::clone(&store) as Arc<dyn SnapshotStore>)
            .save(&snapshot)
            .unwrap();

        let mut session = machine(build_pool(2), store);
        assert!(session.resume_saved());
        assert_eq!(session.time_remaining_secs(), 10);
        assert_eq!(session.score(), 0);
    }

    struct FailingStore;

    impl SnapshotStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            Err(StorageError::Backend("offline".to_owned()))
        }

        fn set(&self, _key: &str, _bytes: &[u8]) -> Result<(), StorageError> {
            Err(StorageError::Backend("offline".to_owned()))
        }

        fn delete(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("offline".to_owned()))
        }
    }

    #[test]
    fn storage_failures_never_disturb_the_session() {
        let mut session = QuizSession::new(build_pool(2), Arc::new(FailingStore))
            .with_clock(fixed_clock())
            .with_settings(SessionSettings::new(10, 3).unwrap());

        assert!(!session.resume_saved());
        session.choose_test();
        answer_current_correctly(&mut session);
        session.advance();
        answer_current_correctly(&mut session);
        session.advance();
        assert_eq!(session.mode(), SessionMode::Finished);

        session.return_to_menu();
        assert_eq!(session.mode(), SessionMode::Menu);
    }
}
