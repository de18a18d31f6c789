//! Domain model types (pure).
//!
//! All types in this module are pure data; no I/O and no UI dependencies.

pub mod display_mode;
pub mod error;
pub mod record;

// Re-export for convenience
pub use display_mode::{DisplayMode, MenuEntry};
pub use error::{AppError, CaptureError, PayloadViewError};
pub use record::HttpRecord;
