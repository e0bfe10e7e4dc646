//! Activity categories and their static attributes.
//!
//! Every behavioral difference between categories (work vs rest accounting,
//! count-up vs countdown, display color, tray glyph) lives in one lookup
//! table here rather than being re-derived with `match` at call sites.

use serde::{Deserialize, Serialize};

/// The five mutually exclusive activity states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Task,
    Break,
    LongBreak,
    Meeting,
    Lunch,
}

/// Color hint for the overlay display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorHint {
    Green,
    Red,
    Orange,
}

/// Two-valued tray iconography: actively working vs resting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrayGlyph {
    Working,
    Resting,
}

struct CategoryInfo {
    label: &'static str,
    counts_as_work: bool,
    counts_as_rest: bool,
    /// Count-up categories accumulate from zero and never auto-expire.
    counts_up: bool,
    color: ColorHint,
    glyph: TrayGlyph,
}

const CATEGORY_TABLE: [CategoryInfo; 5] = [
    CategoryInfo {
        label: "Task",
        counts_as_work: true,
        counts_as_rest: false,
        counts_up: false,
        color: ColorHint::Green,
        glyph: TrayGlyph::Working,
    },
    CategoryInfo {
        label: "Break",
        counts_as_work: false,
        counts_as_rest: true,
        counts_up: false,
        color: ColorHint::Red,
        glyph: TrayGlyph::Resting,
    },
    CategoryInfo {
        label: "Long Break",
        counts_as_work: false,
        counts_as_rest: true,
        counts_up: false,
        color: ColorHint::Red,
        glyph: TrayGlyph::Resting,
    },
    CategoryInfo {
        label: "Meeting",
        counts_as_work: true,
        counts_as_rest: false,
        counts_up: true,
        color: ColorHint::Orange,
        glyph: TrayGlyph::Working,
    },
    CategoryInfo {
        label: "Lunch",
        counts_as_work: false,
        counts_as_rest: true,
        counts_up: true,
        color: ColorHint::Green,
        glyph: TrayGlyph::Working,
    },
];

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Task,
        Category::Break,
        Category::LongBreak,
        Category::Meeting,
        Category::Lunch,
    ];

    fn info(self) -> &'static CategoryInfo {
        &CATEGORY_TABLE[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn counts_as_work(self) -> bool {
        self.info().counts_as_work
    }

    pub fn counts_as_rest(self) -> bool {
        self.info().counts_as_rest
    }

    /// True for Meeting and Lunch: elapsed time only increases until the
    /// category is explicitly exited.
    pub fn counts_up(self) -> bool {
        self.info().counts_up
    }

    pub fn color(self) -> ColorHint {
        self.info().color
    }

    pub fn tray_glyph(self) -> TrayGlyph {
        self.info().glyph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_and_rest_partition() {
        for cat in Category::ALL {
            // Every category is exactly one of work / rest.
            assert_ne!(cat.counts_as_work(), cat.counts_as_rest(), "{cat:?}");
        }
    }

    #[test]
    fn count_up_categories() {
        assert!(Category::Meeting.counts_up());
        assert!(Category::Lunch.counts_up());
        assert!(!Category::Task.counts_up());
        assert!(!Category::Break.counts_up());
        assert!(!Category::LongBreak.counts_up());
    }

    #[test]
    fn colors_match_display_scheme() {
        assert_eq!(Category::Task.color(), ColorHint::Green);
        assert_eq!(Category::Break.color(), ColorHint::Red);
        assert_eq!(Category::LongBreak.color(), ColorHint::Red);
        assert_eq!(Category::Meeting.color(), ColorHint::Orange);
        assert_eq!(Category::Lunch.color(), ColorHint::Green);
    }

    #[test]
    fn tray_glyph_groups_breaks_as_resting() {
        assert_eq!(Category::Break.tray_glyph(), TrayGlyph::Resting);
        assert_eq!(Category::LongBreak.tray_glyph(), TrayGlyph::Resting);
        // Lunch rests for accounting purposes but keeps the working glyph.
        assert_eq!(Category::Lunch.tray_glyph(), TrayGlyph::Working);
        assert_eq!(Category::Task.tray_glyph(), TrayGlyph::Working);
        assert_eq!(Category::Meeting.tray_glyph(), TrayGlyph::Working);
    }

    #[test]
    fn table_order_matches_discriminants() {
        for cat in Category::ALL {
            assert_eq!(cat.label().is_empty(), false);
        }
        assert_eq!(Category::Task.label(), "Task");
        assert_eq!(Category::LongBreak.label(), "Long Break");
    }
}
