//! Terminal-side implementations of the session collaborator traits.
//!
//! Everything here is fire-and-forget: slow work (notifications, audio)
//! happens off the tick thread, and failures are logged rather than
//! propagated.

use std::io::Write;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::style::{Color, Stylize};
use focusdesk_core::session::{AudioCue, Notifier, Presentation, Tone};
use focusdesk_core::{Category, ColorHint, StatusView, TrayGlyph};
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};
use tracing::{debug, warn};

/// Single-line in-place status rendering.
pub struct TerminalPresentation;

fn terminal_color(hint: ColorHint) -> Color {
    match hint {
        ColorHint::Green => Color::Green,
        ColorHint::Red => Color::Red,
        ColorHint::Orange => Color::Yellow,
    }
}

impl Presentation for TerminalPresentation {
    fn render(&self, view: &StatusView) {
        let paused = if view.running { "" } else { " [paused]" };
        let line = format!(
            "{}{}  work {}  rest {}  breaks {}",
            view.headline(),
            paused,
            focusdesk_core::metrics::format_hms(view.work_secs_today),
            focusdesk_core::metrics::format_hms(view.rest_secs_today),
            view.rest_cycles_today,
        );
        // \r + clear-to-end keeps the line in place under raw mode.
        print!("\r\x1b[K{}", line.with(terminal_color(view.color)));
        let _ = std::io::stdout().flush();
    }

    fn set_full_screen(&self, active: bool, category: Category) {
        if active {
            print!("\r\x1b[K==== {} - step away from the desk ====\r\n", category.label());
            let _ = std::io::stdout().flush();
        }
    }

    fn show_menu(&self) {
        print!(
            "\r\x1b[Kspace pause/resume   1 task  2 meeting  3 break  4 long break  5 lunch   \
             + extend 5m   r reload config   m menu   q quit\r\n"
        );
        let _ = std::io::stdout().flush();
    }
}

/// Desktop notifications via the platform notification service.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) {
        let message = message.to_string();
        // The notification daemon can block for seconds; never on the
        // tick thread.
        std::thread::spawn(move || {
            if let Err(e) = notify_rust::Notification::new()
                .appname("focusdesk")
                .summary("Focusdesk")
                .body(&message)
                .show()
            {
                warn!("desktop notification failed: {e}");
            }
        });
    }

    fn set_tray_glyph(&self, glyph: TrayGlyph) {
        // No tray in a terminal; keep the signal visible in the logs.
        debug!(?glyph, "tray glyph change");
    }
}

/// Sine-wave melody playback on a dedicated audio thread.
///
/// The session thread only sends the tone list over a channel; opening
/// the output device and sleeping for the melody duration happen on the
/// player thread.
pub struct TonePlayer {
    tx: mpsc::Sender<Vec<Tone>>,
}

impl TonePlayer {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Vec<Tone>>();
        let result = std::thread::Builder::new()
            .name("tone-player".to_string())
            .spawn(move || {
                while let Ok(tones) = rx.recv() {
                    play(&tones);
                }
            });
        if let Err(e) = result {
            warn!("audio thread failed to start: {e}");
        }
        Self { tx }
    }
}

impl AudioCue for TonePlayer {
    fn play_tones(&self, tones: &[Tone]) {
        let _ = self.tx.send(tones.to_vec());
    }
}

fn play(tones: &[Tone]) {
    let Ok((_stream, handle)) = OutputStream::try_default() else {
        debug!("no audio output device");
        return;
    };
    let Ok(sink) = Sink::try_new(&handle) else {
        return;
    };
    for tone in tones {
        sink.append(
            SineWave::new(tone.freq_hz as f32)
                .take_duration(Duration::from_millis(tone.duration_ms))
                .amplify(0.20),
        );
        // Short gap so repeated notes read as separate.
        sink.append(
            SineWave::new(0.0)
                .take_duration(Duration::from_millis(75))
                .amplify(0.0),
        );
    }
    sink.sleep_until_end();
}
