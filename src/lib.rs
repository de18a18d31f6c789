//! HTTP Payload Log Viewer (hplv)
//!
//! TUI application for inspecting the captured payload of a single logged
//! HTTP transaction, as printable text or a hexdump, behind a one-time
//! consent notice.
//!
//! Architecture: pure state machines under [`state`] drive everything; the
//! [`view`] module is a thin host adapter around a terminal.

pub mod config;
pub mod consent;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
