//! Session orchestration.
//!
//! The orchestrator owns the live clock and today's metrics, applies one
//! tick per wall-clock second, and fans results out to the metrics store
//! and the collaborators. Ticks and commands must be serialized by the
//! caller onto one logical thread; while paused the caller stops feeding
//! ticks instead of delivering ignorable ones, keeping accumulation exact.

use chrono::Local;

use crate::category::Category;
use crate::clock::{ActivityClock, Transition};
use crate::display::StatusView;
use crate::error::{CoreError, StoreError};
use crate::metrics::DailyMetrics;
use crate::session::collab::{
    AudioCue, NoopNotifier, NoopPresence, NoopPresentation, Notifier, PresenceHint,
    PresenceNotifier, Presentation, SilentAudio, REST_MELODY, WORK_MELODY,
};
use crate::storage::{Config, ReportStore};

/// Ticks between periodic metrics flushes.
const FLUSH_INTERVAL_TICKS: u32 = 60;

/// The collaborator bundle. Defaults to all no-ops so hosts wire up only
/// what they support.
pub struct Collaborators {
    pub presentation: Box<dyn Presentation + Send>,
    pub notifier: Box<dyn Notifier + Send>,
    pub audio: Box<dyn AudioCue + Send>,
    pub presence: Box<dyn PresenceNotifier + Send>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            presentation: Box::new(NoopPresentation),
            notifier: Box::new(NoopNotifier),
            audio: Box::new(SilentAudio),
            presence: Box::new(NoopPresence),
        }
    }
}

/// User commands, applied synchronously between ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pause,
    Resume,
    SwitchTo(Category),
    AddSeconds(i64),
    /// Persist the new configuration and re-initialize the clock to Task
    /// at the new full duration, discarding any in-progress interval.
    Reconfigure(Config),
}

pub struct SessionOrchestrator {
    clock: ActivityClock,
    metrics: DailyMetrics,
    store: ReportStore,
    config: Config,
    collab: Collaborators,
    ticks_since_flush: u32,
}

impl SessionOrchestrator {
    /// Build a session: validates the configured durations, loads today's
    /// metrics (absent or malformed rows degrade to zero), and pushes the
    /// initial state to all collaborators.
    pub fn new(
        config: Config,
        store: ReportStore,
        collab: Collaborators,
    ) -> Result<Self, CoreError> {
        let clock = ActivityClock::new(config.clock_config()?);
        let metrics = store.load(Local::now().date_naive());
        let mut session = Self {
            clock,
            metrics,
            store,
            config,
            collab,
            ticks_since_flush: 0,
        };
        session.apply_appearance();
        session.render();
        Ok(session)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn clock(&self) -> &ActivityClock {
        &self.clock
    }

    pub fn metrics(&self) -> &DailyMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn status(&self) -> StatusView {
        StatusView::snapshot(&self.clock, &self.metrics)
    }

    /// Ask the presentation layer to surface its command menu.
    pub fn show_menu(&self) {
        self.collab.presentation.show_menu();
    }

    // ── Tick path ────────────────────────────────────────────────────

    /// Apply one wall-clock second.
    ///
    /// Persistence failures are returned for the caller to surface; the
    /// in-memory counters keep accumulating and a later save may succeed.
    pub fn handle_tick(&mut self) -> Result<(), StoreError> {
        let mut flush_result = self.roll_over_day();

        let Some(outcome) = self.clock.tick() else {
            // The caller stops feeding ticks while paused; tolerate one
            // in flight.
            return flush_result;
        };
        self.metrics.record(outcome.accrued, 1);
        self.ticks_since_flush += 1;

        if outcome.imminent_expiry {
            self.play_melody(self.clock.category());
        }

        if let Some(transition) = outcome.transition {
            if let Err(e) = self.apply_transition(transition) {
                flush_result = Err(e);
            }
        } else if self.ticks_since_flush >= FLUSH_INTERVAL_TICKS {
            if let Err(e) = self.flush() {
                flush_result = Err(e);
            }
        }

        self.render();
        flush_result
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn handle_command(&mut self, command: Command) -> Result<(), CoreError> {
        match command {
            Command::Pause => {
                self.clock.pause();
                self.render();
                Ok(())
            }
            Command::Resume => {
                self.clock.resume();
                self.render();
                Ok(())
            }
            Command::SwitchTo(category) => {
                if let Some(transition) = self.clock.switch_to(category) {
                    self.apply_transition(transition)?;
                }
                self.render();
                Ok(())
            }
            Command::AddSeconds(secs) => {
                self.clock.add_seconds(secs);
                self.render();
                Ok(())
            }
            Command::Reconfigure(config) => {
                // A deliberate reset, not a transition: no rest-cycle
                // credit and no transition fan-out.
                let clock_config = config.clock_config()?;
                config.save()?;
                let flush = self.flush();
                self.clock.reconfigure(clock_config);
                self.config = config;
                self.apply_appearance();
                self.render();
                flush.map_err(CoreError::from)
            }
        }
    }

    /// Final synchronous flush. Called once when the session ends.
    pub fn shutdown(&mut self) -> Result<(), StoreError> {
        self.flush()
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// On the first tick of a new calendar day, flush the old record and
    /// start a fresh one.
    fn roll_over_day(&mut self) -> Result<(), StoreError> {
        let today = Local::now().date_naive();
        if today == self.metrics.date {
            return Ok(());
        }
        let result = self.flush();
        self.metrics = self.store.load(today);
        result
    }

    /// Transition fan-out: credit rest cycles, persist, update appearance,
    /// announce, nudge presence, and play the melody for the new category.
    fn apply_transition(&mut self, transition: Transition) -> Result<(), StoreError> {
        if transition.completed_rest {
            self.metrics.rest_cycles += 1;
        }
        let flush = self.flush();

        self.apply_appearance();
        if self.config.notifications_enabled {
            self.collab.notifier.notify(&self.status().headline());
        }
        if let Some(hint) = presence_for(&transition) {
            self.collab.presence.set_presence(hint);
        }
        self.play_melody(transition.to);

        flush
    }

    fn apply_appearance(&mut self) {
        let category = self.clock.category();
        self.collab
            .presentation
            .set_full_screen(self.is_full_screen(category), category);
        self.collab.notifier.set_tray_glyph(category.tray_glyph());
    }

    /// Regular breaks take over the screen only when configured; long
    /// breaks and lunch always do.
    fn is_full_screen(&self, category: Category) -> bool {
        match category {
            Category::Break => self.config.full_screen_break,
            Category::LongBreak | Category::Lunch => true,
            Category::Task | Category::Meeting => false,
        }
    }

    fn play_melody(&self, category: Category) {
        if !self.config.sound_enabled {
            return;
        }
        let melody = if category.counts_as_rest() {
            &REST_MELODY
        } else {
            &WORK_MELODY
        };
        self.collab.audio.play_tones(melody);
    }

    fn render(&mut self) {
        let view = self.status();
        self.collab.presentation.render(&view);
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        self.ticks_since_flush = 0;
        self.store.save(&self.metrics)?;
        if let Some(dest) = self.config.export_path.clone() {
            self.store.export(&dest)?;
        }
        Ok(())
    }
}

/// Presence hint for a transition, when any.
///
/// Entering Task from a rest category means "back to work" (Busy); coming
/// back from a meeting or restarting Task changes nothing. Breaks announce
/// a short absence, long breaks and lunch a longer one. Meetings leave
/// presence to the chat application itself.
fn presence_for(transition: &Transition) -> Option<PresenceHint> {
    match transition.to {
        Category::Task if transition.from.counts_as_rest() => Some(PresenceHint::Busy),
        Category::Task => None,
        Category::Break => Some(PresenceHint::AwayBrb),
        Category::LongBreak | Category::Lunch => Some(PresenceHint::Away),
        Category::Meeting => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: Category, to: Category) -> Transition {
        Transition {
            from,
            to,
            automatic: false,
            completed_rest: to == Category::Task && from.counts_as_rest(),
        }
    }

    #[test]
    fn presence_mapping() {
        assert_eq!(
            presence_for(&transition(Category::Break, Category::Task)),
            Some(PresenceHint::Busy)
        );
        assert_eq!(presence_for(&transition(Category::Meeting, Category::Task)), None);
        assert_eq!(
            presence_for(&transition(Category::Task, Category::Break)),
            Some(PresenceHint::AwayBrb)
        );
        assert_eq!(
            presence_for(&transition(Category::Task, Category::Lunch)),
            Some(PresenceHint::Away)
        );
        assert_eq!(
            presence_for(&transition(Category::Task, Category::LongBreak)),
            Some(PresenceHint::Away)
        );
        assert_eq!(presence_for(&transition(Category::Task, Category::Meeting)), None);
    }
}
