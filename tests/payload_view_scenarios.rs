//! Acceptance scenarios for the payload view controller.
//!
//! These drive the controller the way the host does: initialize, make the
//! view visible, resolve the consent prompt, switch modes, attach and
//! detach the export capability.

use hplv::consent::{ConsentStore, MemoryConsentStore};
use hplv::model::{DisplayMode, HttpRecord, MenuEntry, PayloadViewError};
use hplv::source::{HttpLog, LogSource};
use hplv::state::{
    ExportPayloadHandler, GateDecision, GateOutcome, ModeMenu, PayloadViewController, PromptChoice,
};
use std::cell::RefCell;
use std::rc::Rc;

fn capture_log() -> HttpLog {
    HttpLog::from_records(
        (0..4)
            .map(|i| HttpRecord {
                method: "GET".to_string(),
                uri: format!("/page/{i}"),
                status: Some(200),
                request_payload: format!("request {i}").into_bytes(),
                reply_payload: Some(format!("reply {i}").into_bytes()),
            })
            .collect(),
    )
}

#[derive(Debug, Default)]
struct RecordingMenu {
    calls: Vec<(MenuEntry, bool)>,
}

impl ModeMenu for RecordingMenu {
    fn set_checked(&mut self, entry: MenuEntry, checked: bool) {
        self.calls.push((entry, checked));
    }
}

struct NullExport;

impl ExportPayloadHandler for NullExport {
    fn export_payload(&self, _payload: &[u8]) -> std::io::Result<std::path::PathBuf> {
        Ok(std::path::PathBuf::new())
    }
}

#[test]
fn absent_index_closes_without_ever_prompting() {
    // Scenario: index absent -> RecordNotFound, close, no prompt evaluated.
    let log = capture_log();
    let store = MemoryConsentStore::new().shared();

    let err = PayloadViewController::initialize(Some(&log), 99, false, store.clone()).unwrap_err();
    assert_eq!(err, PayloadViewError::RecordNotFound { index: 99 });
    assert!(!store.borrow().is_acknowledged());
}

#[test]
fn missing_session_closes_without_notice() {
    let err = PayloadViewController::initialize(
        None,
        0,
        false,
        MemoryConsentStore::new().shared(),
    )
    .unwrap_err();
    assert_eq!(err, PayloadViewError::SessionUnavailable);
}

#[test]
fn decline_leaves_consent_untouched() {
    // Scenario: index=3, show_reply=false, nothing acknowledged, user declines.
    let log = capture_log();
    let store = MemoryConsentStore::new().shared();

    let mut view =
        PayloadViewController::initialize(Some(&log), 3, false, store.clone()).unwrap();
    assert_eq!(view.on_become_visible(), GateDecision::Prompt);
    assert_eq!(view.resolve_prompt(PromptChoice::Decline), GateOutcome::Close);
    assert!(!store.borrow().is_acknowledged());
}

#[test]
fn accept_reveals_printable_rendering() {
    // Scenario: same as decline, but the user accepts.
    let log = capture_log();
    let store = MemoryConsentStore::new().shared();

    let mut view =
        PayloadViewController::initialize(Some(&log), 3, false, store.clone()).unwrap();
    assert_eq!(view.on_become_visible(), GateDecision::Prompt);
    assert_eq!(view.resolve_prompt(PromptChoice::Accept), GateOutcome::Reveal);

    assert!(store.borrow().is_acknowledged());
    let render = view.render_instructions();
    assert_eq!(render.mode, DisplayMode::PrintableText);
    assert_eq!(render.record.uri, "/page/3");
    assert!(!render.show_reply);
}

#[test]
fn acknowledgement_suppresses_prompts_for_later_views() {
    let log = capture_log();
    let store = MemoryConsentStore::new().shared();

    let mut first =
        PayloadViewController::initialize(Some(&log), 0, false, store.clone()).unwrap();
    first.on_become_visible();
    first.resolve_prompt(PromptChoice::Accept);

    for index in 1..log.len() {
        let mut later =
            PayloadViewController::initialize(Some(&log), index, true, store.clone()).unwrap();
        assert_eq!(later.on_become_visible(), GateDecision::Reveal);
    }
}

#[test]
fn returning_to_an_unacknowledged_view_reprompts() {
    let log = capture_log();
    let mut view = PayloadViewController::initialize(
        Some(&log),
        0,
        false,
        MemoryConsentStore::new().shared(),
    )
    .unwrap();

    assert_eq!(view.on_become_visible(), GateDecision::Prompt);
    // Host goes to the background without resolving, then comes back.
    assert_eq!(view.on_become_visible(), GateDecision::Prompt);
}

#[test]
fn full_mode_switch_flow_keeps_menu_in_sync() {
    let log = capture_log();
    let mut view = PayloadViewController::initialize(
        Some(&log),
        1,
        false,
        MemoryConsentStore::acknowledged().shared(),
    )
    .unwrap();

    let menu = Rc::new(RefCell::new(RecordingMenu::default()));
    view.on_mode_menu_initialized(menu.clone());
    assert_eq!(view.mode(), DisplayMode::PrintableText);

    assert!(view.on_menu_item_selected(MenuEntry::HexDump));
    assert!(!view.on_menu_item_selected(MenuEntry::HexDump));

    // Initial refresh plus exactly one refresh for the single real change.
    let calls = menu.borrow().calls.clone();
    assert_eq!(
        calls,
        vec![
            (MenuEntry::HexDump, false),
            (MenuEntry::PrintableText, true),
            (MenuEntry::PrintableText, false),
            (MenuEntry::HexDump, true),
        ]
    );
}

#[test]
fn export_binding_follows_host_lifecycle() {
    let log = capture_log();
    let mut view = PayloadViewController::initialize(
        Some(&log),
        0,
        false,
        MemoryConsentStore::acknowledged().shared(),
    )
    .unwrap();

    view.on_attach(Rc::new(NullExport));
    assert!(view.export_attached());

    view.on_detach();
    assert!(!view.export_attached());

    view.on_attach(Rc::new(NullExport));
    assert!(view.export_attached());
}
