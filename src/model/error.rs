//! Error types for the hplv application.
//!
//! Errors are split by how they are handled:
//!
//! - [`PayloadViewError`] - terminal, non-retryable failures of the payload
//!   view itself (no session, no record). The host closes the view.
//! - [`CaptureError`] - failures loading the capture log file. A missing or
//!   unreadable file is fatal; a malformed record line is non-fatal and is
//!   logged and skipped.
//! - [`AppError`] - top-level umbrella returned from the main application
//!   logic, composing the above via `From` so `?` propagates cleanly.
//!
//! Mode switches and consent transitions are total functions over their
//! state spaces and have no error variants at all.

use std::path::PathBuf;
use thiserror::Error;

/// Terminal failures of the payload view.
///
/// Both variants instruct the host to close the view; neither is recovered
/// locally or retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadViewError {
    /// There is no active capture session, so no log store exists to
    /// resolve records against. The host closes without further action.
    #[error("no active capture session")]
    SessionUnavailable,

    /// The log store has no record at the requested index. The host
    /// surfaces a brief user-visible notice, then closes.
    #[error("no request found at index {index}")]
    RecordNotFound {
        /// The index that failed to resolve.
        index: usize,
    },
}

/// Failures while loading a capture log file.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The capture file does not exist at the given path.
    #[error("capture file not found: {path}")]
    FileNotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// A record line is not valid JSON for the capture schema.
    ///
    /// Non-fatal: the loader logs the line and skips it, so a partially
    /// corrupted capture still opens.
    #[error("invalid record at line {line}: {message}")]
    InvalidRecord {
        /// 1-based line number in the capture file.
        line: usize,
        /// Parser error message.
        message: String,
    },

    /// I/O failure reading the capture file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load or parse the configuration file.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Failed to load the capture log.
    #[error("failed to load capture: {0}")]
    Capture(#[from] CaptureError),

    /// The payload view signalled a terminal failure.
    #[error("{0}")]
    View(#[from] PayloadViewError),

    /// Terminal or TUI rendering error from the crossterm/ratatui layer.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
