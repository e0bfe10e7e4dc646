//! Per-day elapsed-time accumulation.
//!
//! One [`DailyMetrics`] instance is live at a time, keyed by calendar date.
//! Every delivered tick adds one second to a category; rest cycles count
//! completed excursions from a rest category back into Task. Work, rest and
//! total seconds are always derived, never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::Category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub date: NaiveDate,
    pub task_secs: i64,
    pub meeting_secs: i64,
    pub break_secs: i64,
    pub long_break_secs: i64,
    pub lunch_secs: i64,
    /// Completed rest cycles today ("breaks taken").
    pub rest_cycles: u32,
}

impl DailyMetrics {
    /// All-zero record for a day.
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            task_secs: 0,
            meeting_secs: 0,
            break_secs: 0,
            long_break_secs: 0,
            lunch_secs: 0,
            rest_cycles: 0,
        }
    }

    /// Add elapsed seconds to a category.
    pub fn record(&mut self, category: Category, secs: i64) {
        match category {
            Category::Task => self.task_secs += secs,
            Category::Meeting => self.meeting_secs += secs,
            Category::Break => self.break_secs += secs,
            Category::LongBreak => self.long_break_secs += secs,
            Category::Lunch => self.lunch_secs += secs,
        }
    }

    pub fn seconds_for(&self, category: Category) -> i64 {
        match category {
            Category::Task => self.task_secs,
            Category::Meeting => self.meeting_secs,
            Category::Break => self.break_secs,
            Category::LongBreak => self.long_break_secs,
            Category::Lunch => self.lunch_secs,
        }
    }

    /// Task + Meeting.
    pub fn work_secs(&self) -> i64 {
        Category::ALL
            .iter()
            .filter(|c| c.counts_as_work())
            .map(|c| self.seconds_for(*c))
            .sum()
    }

    /// Break + Long Break + Lunch.
    pub fn rest_secs(&self) -> i64 {
        Category::ALL
            .iter()
            .filter(|c| c.counts_as_rest())
            .map(|c| self.seconds_for(*c))
            .sum()
    }

    pub fn total_secs(&self) -> i64 {
        self.work_secs() + self.rest_secs()
    }
}

/// Format seconds as `HH:MM:SS` (hours not truncated at 24).
pub fn format_hms(total_secs: i64) -> String {
    let secs = total_secs.abs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
