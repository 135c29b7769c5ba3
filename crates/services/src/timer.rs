//
// ─── TICK OUTCOME ─────────────────────────────────────────────────────────────
//

/// What one delivered tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was not running; the tick was discarded.
    Ignored,
    /// One second was consumed; the countdown keeps running.
    Ticked { remaining: u32 },
    /// The countdown just reached zero and stopped itself. Yielded exactly
    /// once per armed countdown; later ticks are `Ignored`.
    Expired,
}

//
// ─── COUNTDOWN ────────────────────────────────────────────────────────────────
//

/// Owned countdown state, decremented once per delivered tick.
///
/// The tick *source* (an interval, a test loop) lives with the caller; this
/// type only consumes ticks, so there is never more than one countdown in
/// flight and a stray tick after `stop` cannot mutate anything. A missed
/// tick is not compensated: remaining time reflects tick count, not
/// wall-clock drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    running: bool,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the countdown at `secs` and start consuming ticks. Starting an
    /// already-running countdown replaces it; the previous remaining time
    /// is discarded.
    pub fn start(&mut self, secs: u32) {
        self.remaining = secs;
        self.running = true;
    }

    /// Stop consuming ticks. Idempotent; the remaining time is kept.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Set the remaining time without starting. Used for fresh sessions so
    /// the full duration is visible before the countdown is armed.
    pub fn reset(&mut self, secs: u32) {
        self.remaining = secs;
        self.running = false;
    }

    /// Consume one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked {
                remaining: self.remaining,
            }
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
