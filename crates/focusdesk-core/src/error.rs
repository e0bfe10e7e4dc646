//! Error types for focusdesk-core.
//!
//! The activity clock itself has no failure modes; errors come from the
//! configuration and persistence edges only.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for focusdesk-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Metrics store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// A duration that must be positive was zero
    #[error("Invalid {field}: durations must be at least one minute")]
    InvalidDuration { field: &'static str },

    /// Unknown configuration key in get/set
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Value could not be parsed for the given key
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Metrics store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Report file could not be read
    #[error("Failed to read report at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report file could not be written
    #[error("Failed to write report at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Export destination is locked by another process
    #[error("Export destination {path} is locked by another process")]
    ExportLocked { path: PathBuf },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
