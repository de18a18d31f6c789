//! Payload view orchestration.
//!
//! [`PayloadViewController`] binds one logged HTTP transaction to the host
//! view: it resolves the record, runs the consent gate on visibility
//! transitions, keeps the display mode and its menu indicator in sync, and
//! manages the export capability across host attach/detach.
//!
//! The host drives it with explicit lifecycle calls (`initialize`,
//! `on_become_visible`, `on_mode_menu_initialized`, `on_attach`,
//! `on_detach`); side effects are limited to instructing the host to
//! render or close and to delegating to the sub-components.

use crate::consent::SharedConsentStore;
use crate::model::{DisplayMode, HttpRecord, MenuEntry, PayloadViewError};
use crate::source::LogSource;
use crate::state::consent_gate::{ConsentGate, GateDecision, GateOutcome, PromptChoice};
use crate::state::display_mode::{DisplayModeController, ModeMenu, ModeSwitch};
use crate::state::export_binding::{ExportBindable, ExportHandlerBinding, ExportPayloadHandler};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Everything the host needs to render the payload: the resolved record,
/// which side to show, and the active display mode.
#[derive(Debug, Clone, Copy)]
pub struct RenderInstructions<'a> {
    /// The resolved transaction record.
    pub record: &'a Rc<HttpRecord>,
    /// Whether the paired response (instead of the request) is shown.
    pub show_reply: bool,
    /// Active rendering mode.
    pub mode: DisplayMode,
}

/// Controller for the payload screen of one logged HTTP transaction.
pub struct PayloadViewController {
    record: Rc<HttpRecord>,
    show_reply: bool,
    /// Pending first-render flag: forces PrintableText the first time the
    /// mode menu is constructed, so the initial mode is deterministic
    /// regardless of transient state set before the menu existed.
    just_created: bool,
    modes: DisplayModeController,
    gate: ConsentGate,
    export: ExportHandlerBinding,
}

impl PayloadViewController {
    /// Resolve the record at `index` and build the controller.
    ///
    /// `log` is `None` when there is no active capture session, which is
    /// fatal for this view ([`PayloadViewError::SessionUnavailable`]). A
    /// live session without a record at `index` yields
    /// [`PayloadViewError::RecordNotFound`]; the host surfaces a notice and
    /// closes. On success the mode starts as PrintableText and the pending
    /// first-render flag is set.
    pub fn initialize(
        log: Option<&dyn LogSource>,
        index: usize,
        show_reply: bool,
        store: SharedConsentStore,
    ) -> Result<Self, PayloadViewError> {
        let log = log.ok_or(PayloadViewError::SessionUnavailable)?;
        let record = log
            .get_request(index)
            .ok_or(PayloadViewError::RecordNotFound { index })?;

        debug!(index, show_reply, "payload view initialized");
        Ok(Self {
            record,
            show_reply,
            just_created: true,
            modes: DisplayModeController::new(),
            gate: ConsentGate::new(store),
            export: ExportHandlerBinding::new(),
        })
    }

    /// Current render instructions. Pure; no side effects.
    pub fn render_instructions(&self) -> RenderInstructions<'_> {
        RenderInstructions {
            record: &self.record,
            show_reply: self.show_reply,
            mode: self.modes.mode(),
        }
    }

    /// Active display mode.
    pub fn mode(&self) -> DisplayMode {
        self.modes.mode()
    }

    /// The view became visible: run the consent gate.
    ///
    /// On [`GateDecision::Reveal`] the host binds its data source and
    /// starts rendering; on [`GateDecision::Prompt`] it withholds rendering
    /// and shows the warning until [`resolve_prompt`](Self::resolve_prompt).
    pub fn on_become_visible(&mut self) -> GateDecision {
        self.gate.evaluate()
    }

    /// Forward the user's prompt resolution to the gate.
    pub fn resolve_prompt(&mut self, choice: PromptChoice) -> GateOutcome {
        let outcome = self.gate.resolve(choice);
        debug!(?choice, ?outcome, "consent prompt resolved");
        outcome
    }

    /// The mode menu has been constructed.
    ///
    /// The first time this runs for the view, the mode is forced back to
    /// PrintableText and the pending flag cleared; the indicator is then
    /// refreshed either way.
    pub fn on_mode_menu_initialized(&mut self, menu: Rc<RefCell<dyn ModeMenu>>) {
        self.modes.register_menu(menu);
        if self.just_created {
            self.modes.force_mode(DisplayMode::PrintableText);
            self.just_created = false;
        }
        self.modes.refresh_indicator();
    }

    /// A menu entry was selected.
    ///
    /// Returns `true` when the mode actually changed and the host must
    /// re-render the payload.
    pub fn on_menu_item_selected(&mut self, entry: MenuEntry) -> bool {
        let changed = self.modes.set_mode(entry.mode()) == ModeSwitch::Changed;
        debug!(entry = entry.id(), changed, "mode menu selection");
        changed
    }

    /// The host became the active foreground context: bind its export
    /// capability.
    pub fn on_attach(&mut self, target: Rc<dyn ExportPayloadHandler>) {
        self.export.attach(target);
    }

    /// The host stopped being the active foreground context: release the
    /// export capability so no reference to a torn-down host is retained.
    pub fn on_detach(&mut self) {
        self.export.detach();
    }

    /// Register the render adapter with the export binding.
    pub fn register_adapter(&mut self, adapter: Rc<RefCell<dyn ExportBindable>>) {
        self.export.register_adapter(adapter);
    }

    /// Whether an export target is currently bound.
    pub fn export_attached(&self) -> bool {
        self.export.is_attached()
    }
}

impl std::fmt::Debug for PayloadViewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadViewController")
            .field("show_reply", &self.show_reply)
            .field("just_created", &self.just_created)
            .field("mode", &self.modes.mode())
            .field("gate", &self.gate.state())
            .field("export", &self.export)
            .finish()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "payload_view_tests.rs"]
mod tests;
