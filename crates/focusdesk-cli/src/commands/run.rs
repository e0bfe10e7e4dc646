//! The interactive timer session.
//!
//! A single loop owns the orchestrator and serializes the two input
//! sources: a one-second interval for ticks and keyboard events from a
//! blocking reader thread. Commands and ticks therefore never interleave.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use focusdesk_core::session::{NoopNotifier, NoopPresence, SilentAudio};
use focusdesk_core::{Category, Collaborators, Command, Config, ReportStore, SessionOrchestrator};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::MissedTickBehavior;
use tracing::warn;

use crate::collaborators::{DesktopNotifier, TerminalPresentation, TonePlayer};

enum Input {
    Command(Command),
    TogglePause,
    /// Re-read config from disk and restart the clock with it.
    Reconfigure,
    ShowMenu,
    Quit,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = ReportStore::open_default()?;

    let collab = Collaborators {
        presentation: Box::new(TerminalPresentation),
        notifier: if config.notifications_enabled {
            Box::new(DesktopNotifier)
        } else {
            Box::new(NoopNotifier)
        },
        audio: if config.sound_enabled {
            Box::new(TonePlayer::spawn())
        } else {
            Box::new(SilentAudio)
        },
        presence: Box::new(NoopPresence),
    };
    let mut session = SessionOrchestrator::new(config, store, collab)?;
    session.show_menu();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(event_loop(&mut session));
    println!();
    result
}

async fn event_loop(
    session: &mut SessionOrchestrator,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || keyboard_loop(tx));

    let mut ticks = tokio::time::interval(Duration::from_secs(1));
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The interval fires immediately once; skip that so the first second
    // is a full second.
    ticks.tick().await;

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                if session.is_running() {
                    if let Err(e) = session.handle_tick() {
                        warn!("metrics flush failed: {e}");
                    }
                }
            }
            input = rx.recv() => {
                match input {
                    Some(Input::Command(command)) => {
                        if let Err(e) = session.handle_command(command) {
                            warn!("command failed: {e}");
                        }
                    }
                    Some(Input::ShowMenu) => session.show_menu(),
                    Some(Input::Reconfigure) => {
                        match Config::load() {
                            Ok(config) => {
                                if let Err(e) = session.handle_command(Command::Reconfigure(config)) {
                                    warn!("reconfigure failed: {e}");
                                }
                            }
                            Err(e) => warn!("config reload failed: {e}"),
                        }
                    }
                    Some(Input::TogglePause) => {
                        let command = if session.is_running() {
                            Command::Pause
                        } else {
                            Command::Resume
                        };
                        if let Err(e) = session.handle_command(command) {
                            warn!("command failed: {e}");
                        }
                    }
                    Some(Input::Quit) | None => break,
                }
            }
        }
    }

    session.shutdown()?;
    Ok(())
}

/// Blocking keyboard reader. Runs on its own thread with the terminal in
/// raw mode; sends inputs to the session loop and exits on quit.
fn keyboard_loop(tx: UnboundedSender<Input>) {
    if let Err(e) = terminal::enable_raw_mode() {
        warn!("raw mode unavailable: {e}");
    }
    loop {
        let event = match event::read() {
            Ok(event) => event,
            Err(_) => {
                let _ = tx.send(Input::Quit);
                break;
            }
        };
        let Event::Key(key) = event else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        let input = match key.code {
            _ if ctrl_c => Input::Quit,
            KeyCode::Char('q') | KeyCode::Esc => Input::Quit,
            KeyCode::Char(' ') => Input::TogglePause,
            KeyCode::Char('1') => Input::Command(Command::SwitchTo(Category::Task)),
            KeyCode::Char('2') => Input::Command(Command::SwitchTo(Category::Meeting)),
            KeyCode::Char('3') => Input::Command(Command::SwitchTo(Category::Break)),
            KeyCode::Char('4') => Input::Command(Command::SwitchTo(Category::LongBreak)),
            KeyCode::Char('5') => Input::Command(Command::SwitchTo(Category::Lunch)),
            KeyCode::Char('+') => Input::Command(Command::AddSeconds(300)),
            KeyCode::Char('r') => Input::Reconfigure,
            KeyCode::Char('m') | KeyCode::Char('h') => Input::ShowMenu,
            _ => continue,
        };
        let quit = matches!(input, Input::Quit);
        if tx.send(input).is_err() || quit {
            break;
        }
    }
    let _ = terminal::disable_raw_mode();
}
