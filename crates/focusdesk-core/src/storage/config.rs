//! TOML-based application configuration.
//!
//! Stores the timer durations (as whole minutes -- the times-60 conversion
//! to seconds happens at the clock boundary), the full-screen-break flag,
//! the last overlay window position, and the optional report export path.
//!
//! Configuration is stored at `~/.config/focusdesk/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::clock::ClockConfig;
use crate::error::ConfigError;

/// Timer durations in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_task_minutes")]
    pub task_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

/// Last-known overlay window position in screen coordinates.
/// `(0, 0)` means "never placed".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl OverlayConfig {
    /// Clamp the saved position to a display of `screen_w` x `screen_h`,
    /// falling back to screen-center when the position is unset or lies
    /// outside the display bounds.
    pub fn position_on(&self, screen_w: u32, screen_h: u32, win_w: u32, win_h: u32) -> (i32, i32) {
        let unset = self.x == 0 && self.y == 0;
        let outside = self.x < 0
            || self.y < 0
            || self.x.saturating_add(win_w as i32) > screen_w as i32
            || self.y.saturating_add(win_h as i32) > screen_h as i32;
        if unset || outside {
            (
                (screen_w.saturating_sub(win_w) / 2) as i32,
                (screen_h.saturating_sub(win_h) / 2) as i32,
            )
        } else {
            (self.x, self.y)
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusdesk/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    /// Show regular breaks as a full-screen takeover. Long breaks and
    /// lunch are always full screen.
    #[serde(default)]
    pub full_screen_break: bool,
    #[serde(default)]
    pub overlay: OverlayConfig,
    /// Destination for the mirrored report export; disabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    /// Overrides the default on-disk location. Hosts that keep their
    /// config elsewhere inject it here; unset means the data dir.
    #[serde(skip)]
    path: Option<PathBuf>,
}

fn default_task_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            task_minutes: default_task_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            full_screen_break: false,
            overlay: OverlayConfig::default(),
            export_path: None,
            sound_enabled: true,
            notifications_enabled: true,
            path: None,
        }
    }
}

impl Config {
    fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/focusdesk"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Save to `path` instead of the default location from now on.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    fn file_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Self::default_path(),
        }
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, if it
    /// holds a non-positive duration, or if the default config cannot be
    /// written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| {
                    ConfigError::LoadFailed { path: path.clone(), message: e.to_string() }
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk, at the injected path when one was set.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.file_path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content)
            .map_err(|e| ConfigError::SaveFailed { path, message: e.to_string() })
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Reject non-positive durations before they ever reach the clock.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timer.task_minutes == 0 {
            return Err(ConfigError::InvalidDuration { field: "timer.task_minutes" });
        }
        if self.timer.break_minutes == 0 {
            return Err(ConfigError::InvalidDuration { field: "timer.break_minutes" });
        }
        Ok(())
    }

    /// The validated duration snapshot handed to the clock (minutes x 60).
    pub fn clock_config(&self) -> Result<ClockConfig, ConfigError> {
        self.validate()?;
        ClockConfig::new(
            i64::from(self.timer.task_minutes) * 60,
            i64::from(self.timer.break_minutes) * 60,
        )
    }

    /// Get a config value as a string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "timer.task_minutes" => Some(self.timer.task_minutes.to_string()),
            "timer.break_minutes" => Some(self.timer.break_minutes.to_string()),
            "full_screen_break" => Some(self.full_screen_break.to_string()),
            "overlay.x" => Some(self.overlay.x.to_string()),
            "overlay.y" => Some(self.overlay.y.to_string()),
            "export_path" => Some(
                self.export_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "sound_enabled" => Some(self.sound_enabled.to_string()),
            "notifications_enabled" => Some(self.notifications_enabled.to_string()),
            _ => None,
        }
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, unparsable values, zero
    /// durations, or a failed save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue { key: key.to_string(), message };
        match key {
            "timer.task_minutes" => {
                self.timer.task_minutes = value.parse().map_err(|_| invalid(format!("'{value}' is not a number")))?;
            }
            "timer.break_minutes" => {
                self.timer.break_minutes = value.parse().map_err(|_| invalid(format!("'{value}' is not a number")))?;
            }
            "full_screen_break" => {
                self.full_screen_break = value.parse().map_err(|_| invalid(format!("'{value}' is not a bool")))?;
            }
            "overlay.x" => {
                self.overlay.x = value.parse().map_err(|_| invalid(format!("'{value}' is not a number")))?;
            }
            "overlay.y" => {
                self.overlay.y = value.parse().map_err(|_| invalid(format!("'{value}' is not a number")))?;
            }
            "export_path" => {
                self.export_path = if value.is_empty() { None } else { Some(PathBuf::from(value)) };
            }
            "sound_enabled" => {
                self.sound_enabled = value.parse().map_err(|_| invalid(format!("'{value}' is not a bool")))?;
            }
            "notifications_enabled" => {
                self.notifications_enabled = value.parse().map_err(|_| invalid(format!("'{value}' is not a bool")))?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        self.validate()?;
        self.save()
    }

    /// Keys accepted by [`Config::get`] and [`Config::set`].
    pub fn keys() -> &'static [&'static str] {
        &[
            "timer.task_minutes",
            "timer.break_minutes",
            "full_screen_break",
            "overlay.x",
            "overlay.y",
            "export_path",
            "sound_enabled",
            "notifications_enabled",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.timer.task_minutes, 25);
        assert_eq!(parsed.timer.break_minutes, 5);
    }

    #[test]
    fn empty_toml_fills_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, Config::default());
        assert!(parsed.sound_enabled);
    }

    #[test]
    fn validate_rejects_zero_durations() {
        let mut cfg = Config::default();
        cfg.timer.task_minutes = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidDuration { field: "timer.task_minutes" })
        ));
    }

    #[test]
    fn clock_config_converts_minutes_to_seconds() {
        let cfg = Config::default();
        let clock = cfg.clock_config().unwrap();
        assert_eq!(clock.task_secs(), 25 * 60);
        assert_eq!(clock.break_secs(), 5 * 60);
    }

    #[test]
    fn save_honors_injected_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default().with_path(path.clone());
        cfg.timer.task_minutes = 40;
        cfg.save().unwrap();

        let parsed: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.timer.task_minutes, 40);
    }

    #[test]
    fn get_covers_every_listed_key() {
        let cfg = Config::default();
        for key in Config::keys() {
            assert!(cfg.get(key).is_some(), "missing key {key}");
        }
        assert!(cfg.get("no.such.key").is_none());
    }

    #[test]
    fn overlay_position_reset_to_center_when_unset_or_outside() {
        let unset = OverlayConfig::default();
        assert_eq!(unset.position_on(1920, 1080, 400, 80), (760, 500));

        let outside = OverlayConfig { x: 3000, y: 200 };
        assert_eq!(outside.position_on(1920, 1080, 400, 80), (760, 500));

        let negative = OverlayConfig { x: -5, y: 200 };
        assert_eq!(negative.position_on(1920, 1080, 400, 80), (760, 500));
    }

    #[test]
    fn overlay_position_kept_when_inside_bounds() {
        let inside = OverlayConfig { x: 100, y: 200 };
        assert_eq!(inside.position_on(1920, 1080, 400, 80), (100, 200));
    }
}
