//! Activity clock implementation.
//!
//! The clock is a pure, tick-driven state machine. It does no I/O and holds
//! no thread -- the caller delivers one `tick()` per wall-clock second and
//! applies commands between ticks.
//!
//! ## States
//!
//! The states are the five [`Category`] values. Countdown categories
//! (Task, Break, Long Break) decrement toward zero and auto-transition at
//! expiry; count-up categories (Meeting, Lunch) accumulate from zero until
//! explicitly exited.
//!
//! ```text
//! Task --expiry--> Break --expiry--> Task
//! Break|LongBreak|Lunch --switch_to(Task)--> Task   (completed rest cycle)
//! ```

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::ConfigError;

/// Remaining seconds at which the imminent-expiry cue fires.
const EXPIRY_WARNING_SECS: i64 = 10;

/// Validated duration snapshot used by the clock.
///
/// Replacing it via [`ActivityClock::reconfigure`] re-initializes the clock
/// to Task at the new full duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    task_secs: i64,
    break_secs: i64,
}

impl ClockConfig {
    /// Build a config, rejecting non-positive durations up front so the
    /// tick path never has to.
    pub fn new(task_secs: i64, break_secs: i64) -> Result<Self, ConfigError> {
        if task_secs <= 0 {
            return Err(ConfigError::InvalidDuration { field: "task duration" });
        }
        if break_secs <= 0 {
            return Err(ConfigError::InvalidDuration { field: "break duration" });
        }
        Ok(Self { task_secs, break_secs })
    }

    pub fn task_secs(&self) -> i64 {
        self.task_secs
    }

    pub fn break_secs(&self) -> i64 {
        self.break_secs
    }

    /// Starting value of `remaining_secs` when entering `category`.
    /// Count-up categories start from zero.
    pub fn initial_secs(&self, category: Category) -> i64 {
        if category.counts_up() {
            0
        } else {
            match category {
                Category::Task => self.task_secs,
                // Long Break shares the configured break duration.
                Category::Break | Category::LongBreak => self.break_secs,
                Category::Meeting | Category::Lunch => 0,
            }
        }
    }
}

/// A category change, automatic (expiry) or commanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Category,
    pub to: Category,
    /// True when the transition was fired by a countdown reaching zero.
    pub automatic: bool,
    /// True when this transition completes a rest cycle: entering Task
    /// directly from Break, Long Break, or Lunch.
    pub completed_rest: bool,
}

/// Result of one delivered tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// The category that accrued this tick's second (the category active
    /// before any transition fired).
    pub accrued: Category,
    /// Remaining (or elapsed, for count-up categories) seconds after the
    /// tick and any transition.
    pub remaining_secs: i64,
    /// Fired on the first tick that leaves a countdown at or inside the
    /// warning threshold, once per approach to zero. Extending the
    /// interval past the threshold re-arms it; an adjustment that lands
    /// inside the threshold fires on the following tick.
    pub imminent_expiry: bool,
    pub transition: Option<Transition>,
}

/// The timer/status state machine.
///
/// One instance is owned by the session orchestrator; there is no ambient
/// global clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityClock {
    config: ClockConfig,
    category: Category,
    /// Signed: countdown categories stay >= 0 while running and hit exactly
    /// 0 at expiry; count-up categories only increase.
    remaining_secs: i64,
    running: bool,
    /// Updated only on category transition; used to detect completed rest
    /// cycles.
    previous: Category,
    /// Latched once the warning has fired for the current approach to
    /// zero; cleared on transition and when the countdown leaves the
    /// threshold again.
    #[serde(default)]
    expiry_warned: bool,
}

impl ActivityClock {
    /// A fresh clock: Task at full duration, running.
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            category: Category::Task,
            remaining_secs: config.task_secs(),
            running: true,
            previous: Category::Task,
            expiry_warned: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn remaining_secs(&self) -> i64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn previous_category(&self) -> Category {
        self.previous
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance one second. The caller must not deliver ticks while paused;
    /// a paused clock returns `None` rather than corrupting accumulation.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.running {
            return None;
        }

        let accrued = self.category;
        if self.category.counts_up() {
            self.remaining_secs += 1;
        } else {
            self.remaining_secs -= 1;
        }

        let imminent_expiry = !self.category.counts_up()
            && !self.expiry_warned
            && self.remaining_secs > 0
            && self.remaining_secs <= EXPIRY_WARNING_SECS;
        if imminent_expiry {
            self.expiry_warned = true;
        }

        let transition = if !self.category.counts_up() && self.remaining_secs == 0 {
            let to = match self.category {
                Category::Task => Category::Break,
                _ => Category::Task,
            };
            Some(self.enter(to, true))
        } else {
            None
        };

        Some(TickOutcome {
            accrued,
            remaining_secs: self.remaining_secs,
            imminent_expiry,
            transition,
        })
    }

    /// Explicit category switch.
    ///
    /// Re-selecting the active Task or Meeting is a no-op. Re-selecting the
    /// active Break, Long Break, or Lunch deliberately restarts the
    /// interval. Switching always resumes a paused clock.
    pub fn switch_to(&mut self, category: Category) -> Option<Transition> {
        if category == self.category {
            match category {
                Category::Task | Category::Meeting => return None,
                Category::Break | Category::LongBreak | Category::Lunch => {}
            }
        }
        self.running = true;
        Some(self.enter(category, false))
    }

    /// Stop the countdown. Idempotent; remaining time is untouched.
    /// Returns whether the running flag changed.
    pub fn pause(&mut self) -> bool {
        let changed = self.running;
        self.running = false;
        changed
    }

    /// Resume ticking. Idempotent.
    pub fn resume(&mut self) -> bool {
        let changed = !self.running;
        self.running = true;
        changed
    }

    /// Extend (or shrink) the current interval. Countdown categories only;
    /// a no-op while counting up. The result is floored at one second so an
    /// adjustment can never jump past the expiry tick.
    pub fn add_seconds(&mut self, secs: i64) -> bool {
        if self.category.counts_up() {
            return false;
        }
        self.remaining_secs = (self.remaining_secs + secs).max(1);
        if self.remaining_secs > EXPIRY_WARNING_SECS {
            self.expiry_warned = false;
        }
        true
    }

    /// Replace the duration config and reset to Task at full duration.
    ///
    /// This is a deliberate reset, not a transition: any in-progress
    /// interval is discarded and no rest cycle is credited.
    pub fn reconfigure(&mut self, config: ClockConfig) {
        self.config = config;
        self.category = Category::Task;
        self.previous = Category::Task;
        self.remaining_secs = config.task_secs();
        self.running = true;
        self.expiry_warned = false;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter(&mut self, to: Category, automatic: bool) -> Transition {
        let from = self.category;
        let completed_rest = to == Category::Task && from.counts_as_rest();
        self.previous = from;
        self.category = to;
        self.remaining_secs = self.config.initial_secs(to);
        self.expiry_warned = false;
        Transition { from, to, automatic, completed_rest }
    }
}
