//! # Focusdesk Core Library
//!
//! Core business logic for the Focusdesk work/rest cycle timer. The CLI
//! binary is a thin host over this library; a graphical shell would sit on
//! the same collaborator traits.
//!
//! ## Architecture
//!
//! - **Activity Clock**: a pure, tick-driven state machine over the five
//!   activity categories -- the caller delivers one `tick()` per second
//!   and applies commands between ticks
//! - **Session Orchestrator**: owns the clock and today's metrics, fans
//!   tick results out to the store and the collaborators
//! - **Storage**: CSV-backed daily metrics report and TOML configuration
//! - **Collaborators**: presentation, notification, audio and presence
//!   behind narrow traits with no-op defaults
//!
//! ## Key Components
//!
//! - [`ActivityClock`]: the timer/status state machine
//! - [`SessionOrchestrator`]: tick/command sequencing and fan-out
//! - [`ReportStore`]: per-day metrics persistence
//! - [`Config`]: application configuration

pub mod category;
pub mod clock;
pub mod display;
pub mod error;
pub mod metrics;
pub mod session;
pub mod storage;

pub use category::{Category, ColorHint, TrayGlyph};
pub use clock::{ActivityClock, ClockConfig, TickOutcome, Transition};
pub use display::StatusView;
pub use error::{ConfigError, CoreError, StoreError};
pub use metrics::DailyMetrics;
pub use session::{Collaborators, Command, SessionOrchestrator};
pub use storage::{Config, ReportStore};
