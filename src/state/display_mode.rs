//! Display mode state and its menu control surface.
//!
//! The controller owns the active [`DisplayMode`] and keeps a menu-like
//! control surface with two mutually exclusive checkable entries in sync
//! with it. The surface is registered lazily because menus are constructed
//! after the view itself.

use crate::model::{DisplayMode, MenuEntry};
use std::cell::RefCell;
use std::rc::Rc;

/// A control surface with two mutually exclusive checkable entries.
///
/// Implementations that enforce single-selection may reject checking a
/// second entry while another is checked, which is why
/// [`DisplayModeController::refresh_indicator`] unchecks before checking.
pub trait ModeMenu {
    /// Set the checked state of one entry.
    fn set_checked(&mut self, entry: MenuEntry, checked: bool);
}

/// Result of a mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSwitch {
    /// The mode changed; the host must re-render.
    Changed,
    /// The requested mode was already active; nothing happened.
    Unchanged,
}

/// Holds and toggles the rendering mode, mirroring it onto the menu.
pub struct DisplayModeController {
    mode: DisplayMode,
    menu: Option<Rc<RefCell<dyn ModeMenu>>>,
}

impl std::fmt::Debug for DisplayModeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayModeController")
            .field("mode", &self.mode)
            .field("has_menu", &self.menu.is_some())
            .finish()
    }
}

impl Default for DisplayModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayModeController {
    /// New controller in the initial mode, with no menu registered yet.
    pub fn new() -> Self {
        Self {
            mode: DisplayMode::PrintableText,
            menu: None,
        }
    }

    /// Currently active mode.
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Switch to `mode`.
    ///
    /// Idempotent: switching to the already-active mode is a no-op and
    /// triggers no indicator refresh. An actual change refreshes the
    /// indicator exactly once.
    pub fn set_mode(&mut self, mode: DisplayMode) -> ModeSwitch {
        if self.mode == mode {
            return ModeSwitch::Unchanged;
        }
        self.mode = mode;
        self.refresh_indicator();
        ModeSwitch::Changed
    }

    /// Overwrite the mode without touching the indicator.
    ///
    /// Used for the deterministic reset when the menu is first constructed;
    /// callers follow up with [`refresh_indicator`](Self::refresh_indicator).
    pub fn force_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    /// Register the menu surface to keep in sync.
    ///
    /// Does not refresh by itself; the view-level menu-initialized hook
    /// refreshes after any first-creation reset has been applied.
    pub fn register_menu(&mut self, menu: Rc<RefCell<dyn ModeMenu>>) {
        self.menu = Some(menu);
    }

    /// Sync the menu check marks with the active mode.
    ///
    /// No-op while no menu is registered. The inactive entry is unchecked
    /// *before* the active one is checked: single-selection surfaces can
    /// reject a second checked entry, so the ordering is mandatory.
    pub fn refresh_indicator(&self) {
        let Some(menu) = &self.menu else {
            return;
        };
        let mut menu = menu.borrow_mut();
        match self.mode {
            DisplayMode::PrintableText => {
                menu.set_checked(MenuEntry::HexDump, false);
                menu.set_checked(MenuEntry::PrintableText, true);
            }
            DisplayMode::HexDump => {
                menu.set_checked(MenuEntry::PrintableText, false);
                menu.set_checked(MenuEntry::HexDump, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every `set_checked` call in order.
    #[derive(Debug, Default)]
    struct RecordingMenu {
        calls: Vec<(MenuEntry, bool)>,
    }

    impl ModeMenu for RecordingMenu {
        fn set_checked(&mut self, entry: MenuEntry, checked: bool) {
            self.calls.push((entry, checked));
        }
    }

    fn controller_with_menu() -> (DisplayModeController, Rc<RefCell<RecordingMenu>>) {
        let menu = Rc::new(RefCell::new(RecordingMenu::default()));
        let mut modes = DisplayModeController::new();
        modes.register_menu(menu.clone());
        (modes, menu)
    }

    #[test]
    fn initial_mode_is_printable() {
        assert_eq!(DisplayModeController::new().mode(), DisplayMode::PrintableText);
    }

    #[test]
    fn set_mode_changes_and_refreshes_once() {
        let (mut modes, menu) = controller_with_menu();

        assert_eq!(modes.set_mode(DisplayMode::HexDump), ModeSwitch::Changed);
        assert_eq!(modes.mode(), DisplayMode::HexDump);
        assert_eq!(
            menu.borrow().calls,
            vec![(MenuEntry::PrintableText, false), (MenuEntry::HexDump, true)]
        );
    }

    #[test]
    fn repeated_set_mode_is_idempotent() {
        let (mut modes, menu) = controller_with_menu();

        assert_eq!(modes.set_mode(DisplayMode::HexDump), ModeSwitch::Changed);
        assert_eq!(modes.set_mode(DisplayMode::HexDump), ModeSwitch::Unchanged);

        // Exactly one refresh: hexdump checked once, printable unchecked once.
        let calls = &menu.borrow().calls;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], (MenuEntry::PrintableText, false));
        assert_eq!(calls[1], (MenuEntry::HexDump, true));
    }

    #[test]
    fn uncheck_always_precedes_check() {
        let (mut modes, menu) = controller_with_menu();

        modes.set_mode(DisplayMode::HexDump);
        modes.set_mode(DisplayMode::PrintableText);

        for pair in menu.borrow().calls.chunks(2) {
            assert!(!pair[0].1, "first call of each refresh must uncheck");
            assert!(pair[1].1, "second call of each refresh must check");
            assert_ne!(pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn refresh_without_menu_is_noop() {
        let mut modes = DisplayModeController::new();
        // Menu not constructed yet; must not panic or change anything.
        modes.refresh_indicator();
        assert_eq!(modes.set_mode(DisplayMode::HexDump), ModeSwitch::Changed);
    }

    #[test]
    fn force_mode_skips_indicator() {
        let (mut modes, menu) = controller_with_menu();
        modes.force_mode(DisplayMode::HexDump);
        assert_eq!(modes.mode(), DisplayMode::HexDump);
        assert!(menu.borrow().calls.is_empty());
    }

    #[test]
    fn refresh_after_registration_reflects_current_mode() {
        let mut modes = DisplayModeController::new();
        modes.set_mode(DisplayMode::HexDump);

        let menu = Rc::new(RefCell::new(RecordingMenu::default()));
        modes.register_menu(menu.clone());
        modes.refresh_indicator();

        assert_eq!(
            menu.borrow().calls,
            vec![(MenuEntry::PrintableText, false), (MenuEntry::HexDump, true)]
        );
    }
}
