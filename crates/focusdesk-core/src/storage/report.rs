//! Durable per-day metrics report.
//!
//! The report is a header-row CSV with one row per calendar date. Each row
//! carries the formatted `HH:MM:SS` durations first (the human-readable
//! half, mirrored into the export file) and the raw integer seconds after
//! them; the raw columns are authoritative when loading. Rows are matched
//! by exact date string, updated in place, and appended when absent.
//!
//! The store is passive: it holds no state between calls, and a missing or
//! malformed row always degrades to an all-zero record rather than failing
//! the session.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::StoreError;
use crate::metrics::{format_hms, DailyMetrics};

const HEADER: &str = "Day,Date,Task Time,Meeting Time,Break Time,Long Break Time,Lunch Time,\
Breaks Count,Work Time,Rest Time,Total Time,Task Seconds,Meeting Seconds,Break Seconds,\
Long Break Seconds,Lunch Seconds,Work Seconds,Rest Seconds,Total Seconds";

const COLUMNS: usize = 19;
/// Day through Total Time -- the half mirrored into the export file.
const DISPLAY_COLUMNS: usize = 11;
const DATE_COLUMN: usize = 1;

pub struct ReportStore {
    path: PathBuf,
}

impl ReportStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default location, `~/.config/focusdesk/report.csv`.
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|source| StoreError::Read {
            path: PathBuf::from("~/.config/focusdesk"),
            source,
        })?;
        Ok(Self::new(dir.join("report.csv")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record for `date`, degrading to all-zero when the file or
    /// row is absent or malformed.
    pub fn load(&self, date: NaiveDate) -> DailyMetrics {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return DailyMetrics::zero(date);
        };
        let date_str = date.format("%Y-%m-%d").to_string();
        content
            .lines()
            .skip(1)
            .find_map(|line| parse_row(line, &date_str, date))
            .unwrap_or_else(|| DailyMetrics::zero(date))
    }

    /// Upsert the row for the record's date, appending when absent.
    pub fn save(&self, metrics: &DailyMetrics) -> Result<(), StoreError> {
        let date_str = metrics.date.format("%Y-%m-%d").to_string();
        let row = format_row(metrics);

        let mut lines: Vec<String> = match std::fs::read_to_string(&self.path) {
            Ok(content) => content.lines().map(str::to_string).collect(),
            Err(_) => vec![HEADER.to_string()],
        };
        if lines.is_empty() {
            lines.push(HEADER.to_string());
        }

        let existing = lines
            .iter()
            .skip(1)
            .position(|line| line.split(',').nth(DATE_COLUMN) == Some(date_str.as_str()));
        match existing {
            Some(idx) => lines[idx + 1] = row,
            None => lines.push(row),
        }

        std::fs::write(&self.path, lines.join("\n") + "\n").map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Regenerate the display-column mirror wholesale at `dest`.
    ///
    /// A destination held open by another process maps to
    /// [`StoreError::ExportLocked`] so callers can prompt for a retry.
    pub fn export(&self, dest: &Path) -> Result<(), StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            // Nothing saved yet: export just the header.
            Err(_) => String::new(),
        };

        let mut out = String::new();
        let lines = if content.is_empty() {
            vec![HEADER]
        } else {
            content.lines().collect()
        };
        for line in lines {
            let display: Vec<&str> = line.split(',').take(DISPLAY_COLUMNS).collect();
            out.push_str(&display.join(","));
            out.push('\n');
        }

        std::fs::write(dest, out).map_err(|source| {
            if is_locked(&source) {
                StoreError::ExportLocked { path: dest.to_path_buf() }
            } else {
                StoreError::Write { path: dest.to_path_buf(), source }
            }
        })
    }
}

fn is_locked(err: &std::io::Error) -> bool {
    // ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION on Windows; permission
    // denied covers the POSIX flock case.
    matches!(err.raw_os_error(), Some(32) | Some(33))
        || err.kind() == std::io::ErrorKind::PermissionDenied
}

fn format_row(m: &DailyMetrics) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        m.date.format("%A"),
        m.date.format("%Y-%m-%d"),
        format_hms(m.task_secs),
        format_hms(m.meeting_secs),
        format_hms(m.break_secs),
        format_hms(m.long_break_secs),
        format_hms(m.lunch_secs),
        m.rest_cycles,
        format_hms(m.work_secs()),
        format_hms(m.rest_secs()),
        format_hms(m.total_secs()),
        m.task_secs,
        m.meeting_secs,
        m.break_secs,
        m.long_break_secs,
        m.lunch_secs,
        m.work_secs(),
        m.rest_secs(),
        m.total_secs(),
    )
}

/// Parse one row if it matches `date_str`; any malformation yields `None`
/// and the caller degrades to zero.
fn parse_row(line: &str, date_str: &str, date: NaiveDate) -> Option<DailyMetrics> {
    let cols: Vec<&str> = line.split(',').collect();
    if cols.len() != COLUMNS || cols[DATE_COLUMN] != date_str {
        return None;
    }
    Some(DailyMetrics {
        date,
        task_secs: cols[11].parse().ok()?,
        meeting_secs: cols[12].parse().ok()?,
        break_secs: cols[13].parse().ok()?,
        long_break_secs: cols[14].parse().ok()?,
        lunch_secs: cols[15].parse().ok()?,
        rest_cycles: cols[7].parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> ReportStore {
        ReportStore::new(dir.path().join("report.csv"))
    }

    fn metrics(date: NaiveDate) -> DailyMetrics {
        let mut m = DailyMetrics::zero(date);
        m.record(Category::Task, 1500);
        m.record(Category::Meeting, 600);
        m.record(Category::Break, 300);
        m.rest_cycles = 3;
        m
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn load_missing_file_is_zero() {
        let dir = TempDir::new().unwrap();
        let m = store(&dir).load(day(29));
        assert_eq!(m, DailyMetrics::zero(day(29)));
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let m = metrics(day(29));
        s.save(&m).unwrap();
        assert_eq!(s.load(day(29)), m);
    }

    #[test]
    fn save_upserts_existing_date_row() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let mut m = metrics(day(29));
        s.save(&m).unwrap();

        m.record(Category::Task, 500);
        m.rest_cycles += 1;
        s.save(&m).unwrap();

        assert_eq!(s.load(day(29)), m);
        let content = std::fs::read_to_string(s.path()).unwrap();
        // Header plus exactly one data row.
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn save_appends_new_dates() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.save(&metrics(day(28))).unwrap();
        s.save(&metrics(day(29))).unwrap();

        let content = std::fs::read_to_string(s.path()).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(s.load(day(28)), metrics(day(28)));
        assert_eq!(s.load(day(29)), metrics(day(29)));
    }

    #[test]
    fn header_row_has_expected_columns() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.save(&metrics(day(29))).unwrap();
        let content = std::fs::read_to_string(s.path()).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header.split(',').count(), COLUMNS);
        assert!(header.starts_with("Day,Date,"));
    }

    #[test]
    fn malformed_row_degrades_to_zero() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        std::fs::write(
            s.path(),
            format!("{HEADER}\nSaturday,2026-08-29,bogus,row\n"),
        )
        .unwrap();
        assert_eq!(s.load(day(29)), DailyMetrics::zero(day(29)));
    }

    #[test]
    fn unparsable_seconds_degrade_to_zero() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let m = metrics(day(29));
        s.save(&m).unwrap();
        let content = std::fs::read_to_string(s.path()).unwrap();
        std::fs::write(s.path(), content.replace(",1500,", ",NaN,")).unwrap();
        assert_eq!(s.load(day(29)), DailyMetrics::zero(day(29)));
    }

    #[test]
    fn export_mirrors_display_columns_only() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.save(&metrics(day(29))).unwrap();

        let dest = dir.path().join("export.csv");
        s.export(&dest).unwrap();
        let content = std::fs::read_to_string(&dest).unwrap();
        for line in content.lines() {
            assert_eq!(line.split(',').count(), DISPLAY_COLUMNS);
        }
        assert!(content.contains("2026-08-29"));
        assert!(content.contains("00:25:00"));
    }

    #[test]
    fn export_is_regenerated_wholesale() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let dest = dir.path().join("export.csv");
        std::fs::write(&dest, "stale contents\n").unwrap();

        s.save(&metrics(day(29))).unwrap();
        s.export(&dest).unwrap();
        let content = std::fs::read_to_string(&dest).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.starts_with("Day,Date,"));
    }

    #[test]
    fn row_formatting_matches_hms() {
        let m = metrics(day(29));
        let row = format_row(&m);
        let cols: Vec<&str> = row.split(',').collect();
        assert_eq!(cols.len(), COLUMNS);
        assert_eq!(cols[0], "Saturday");
        assert_eq!(cols[1], "2026-08-29");
        assert_eq!(cols[2], "00:25:00");
        assert_eq!(cols[7], "3");
        // Work = task + meeting.
        assert_eq!(cols[16], "2100");
    }
}
