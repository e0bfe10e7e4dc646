mod config;
mod report;

pub use config::{Config, OverlayConfig, TimerConfig};
pub use report::ReportStore;

use std::path::PathBuf;

/// Returns `~/.config/focusdesk[-dev]/`, creating it if needed.
///
/// Set FOCUSDESK_ENV=dev to use a separate development data directory.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSDESK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusdesk-dev")
    } else {
        base_dir.join("focusdesk")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
