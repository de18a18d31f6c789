//! Payload view state machines (pure).
//!
//! All transitions here are synchronous and testable without a terminal;
//! the view layer is just glue around them.

pub mod consent_gate;
pub mod display_mode;
pub mod export_binding;
pub mod payload_view;

// Re-export for convenience
pub use consent_gate::{ConsentGate, GateDecision, GateOutcome, GateState, PromptChoice};
pub use display_mode::{DisplayModeController, ModeMenu, ModeSwitch};
pub use export_binding::{ExportBindable, ExportHandlerBinding, ExportPayloadHandler};
pub use payload_view::{PayloadViewController, RenderInstructions};
