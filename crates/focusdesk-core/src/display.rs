//! Status snapshot handed to presentation collaborators.

use serde::Serialize;

use crate::category::{Category, ColorHint};
use crate::clock::ActivityClock;
use crate::metrics::DailyMetrics;

/// Read-only snapshot passed to [`Presentation::render`].
///
/// [`Presentation::render`]: crate::session::Presentation::render
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub category: Category,
    pub label: &'static str,
    /// `MM:SS`, or `HH:MM:SS` for count-up categories and whenever the
    /// remaining time spans hours.
    pub time_text: String,
    pub color: ColorHint,
    pub remaining_secs: i64,
    pub running: bool,
    pub work_secs_today: i64,
    pub rest_secs_today: i64,
    pub rest_cycles_today: u32,
}

impl StatusView {
    pub fn snapshot(clock: &ActivityClock, metrics: &DailyMetrics) -> Self {
        let category = clock.category();
        Self {
            category,
            label: category.label(),
            time_text: time_text(category, clock.remaining_secs()),
            color: category.color(),
            remaining_secs: clock.remaining_secs(),
            running: clock.is_running(),
            work_secs_today: metrics.work_secs(),
            rest_secs_today: metrics.rest_secs(),
            rest_cycles_today: metrics.rest_cycles,
        }
    }

    /// `"Task - 24:59"` -- the overlay / notification line.
    pub fn headline(&self) -> String {
        format!("{} - {}", self.label, self.time_text)
    }
}

/// Format the remaining or elapsed time for display.
pub fn time_text(category: Category, secs: i64) -> String {
    let abs = secs.abs();
    let hours = abs / 3600;
    let minutes = (abs % 3600) / 60;
    let seconds = abs % 60;
    if category.counts_up() || hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_uses_minutes_seconds() {
        assert_eq!(time_text(Category::Task, 1499), "24:59");
        assert_eq!(time_text(Category::Break, 0), "00:00");
    }

    #[test]
    fn hours_appear_when_needed() {
        assert_eq!(time_text(Category::Task, 3600), "01:00:00");
        assert_eq!(time_text(Category::Break, 2 * 3600 + 61), "02:01:01");
    }

    #[test]
    fn count_up_always_shows_hours() {
        assert_eq!(time_text(Category::Meeting, 0), "00:00:00");
        assert_eq!(time_text(Category::Lunch, 125), "00:02:05");
    }
}
