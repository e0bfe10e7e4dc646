//! Collaborator interfaces consumed by the session orchestrator.
//!
//! Presentation, notification, audio and presence are external concerns
//! behind narrow traits. Implementations are fire-and-forget: they receive
//! read-only snapshots, must not block the tick path, and never touch clock
//! or metrics state. Each trait ships a no-op implementation so a host can
//! wire up only what it supports.

use serde::{Deserialize, Serialize};

use crate::category::{Category, TrayGlyph};
use crate::display::StatusView;

/// One note of an audible cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tone {
    pub freq_hz: u32,
    pub duration_ms: u64,
}

/// Two short notes announcing work time.
pub const WORK_MELODY: [Tone; 2] = [
    Tone { freq_hz: 523, duration_ms: 300 },
    Tone { freq_hz: 523, duration_ms: 300 },
];

/// Two short notes announcing rest time, an octave up.
pub const REST_MELODY: [Tone; 2] = [
    Tone { freq_hz: 1047, duration_ms: 300 },
    Tone { freq_hz: 1047, duration_ms: 300 },
];

/// Best-effort presence status for an external chat application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenceHint {
    Busy,
    Away,
    /// "Away - be right back".
    AwayBrb,
    Available,
}

/// Overlay window / status display.
pub trait Presentation {
    fn render(&self, view: &StatusView);
    /// Enter or leave the full-screen takeover for rest categories.
    fn set_full_screen(&self, active: bool, category: Category);
    /// Surface the command menu (context menu, key-binding help line).
    fn show_menu(&self) {}
}

/// Desktop notification delivery plus the two-valued tray icon.
pub trait Notifier {
    fn notify(&self, message: &str);
    fn set_tray_glyph(&self, glyph: TrayGlyph);
}

/// Audible alert playback. Invoked on imminent expiry and on transition.
pub trait AudioCue {
    fn play_tones(&self, tones: &[Tone]);
}

/// External presence automation. Explicitly best-effort: implementations
/// fail silently and must never affect timer correctness.
pub trait PresenceNotifier {
    fn set_presence(&self, hint: PresenceHint);
}

/// No-op presentation.
#[derive(Debug, Default)]
pub struct NoopPresentation;

impl Presentation for NoopPresentation {
    fn render(&self, _view: &StatusView) {}
    fn set_full_screen(&self, _active: bool, _category: Category) {}
}

/// No-op notifier.
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &str) {}
    fn set_tray_glyph(&self, _glyph: TrayGlyph) {}
}

/// Silent audio sink.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioCue for SilentAudio {
    fn play_tones(&self, _tones: &[Tone]) {}
}

/// The portable presence implementation: does nothing.
#[derive(Debug, Default)]
pub struct NoopPresence;

impl PresenceNotifier for NoopPresence {
    fn set_presence(&self, _hint: PresenceHint) {}
}
