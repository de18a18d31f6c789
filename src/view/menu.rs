//! Mode menu bar widget.
//!
//! The TUI rendition of the two checkable menu entries. The widget is the
//! registered [`ModeMenu`](crate::state::ModeMenu) control surface: the
//! display mode controller drives the check marks, the view only draws
//! whatever is currently checked.

use crate::model::MenuEntry;
use crate::state::ModeMenu;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Check-mark state of the two mode entries.
///
/// Starts with both entries unchecked; the first indicator refresh after
/// menu initialization establishes the real state.
#[derive(Debug, Default)]
pub struct ModeMenuBar {
    printable_checked: bool,
    hexdump_checked: bool,
}

impl ModeMenuBar {
    /// New bar with both entries unchecked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an entry is currently checked.
    pub fn is_checked(&self, entry: MenuEntry) -> bool {
        match entry {
            MenuEntry::PrintableText => self.printable_checked,
            MenuEntry::HexDump => self.hexdump_checked,
        }
    }

    /// Render the bar as a single line.
    pub fn line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];
        spans.extend(entry_spans("[p] Printable text", self.printable_checked));
        spans.push(Span::raw("   "));
        spans.extend(entry_spans("[x] Hexdump", self.hexdump_checked));
        Line::from(spans)
    }
}

fn entry_spans(label: &'static str, checked: bool) -> Vec<Span<'static>> {
    let mark = if checked { "(*) " } else { "( ) " };
    let style = if checked {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    vec![Span::styled(mark, style), Span::styled(label, style)]
}

impl ModeMenu for ModeMenuBar {
    fn set_checked(&mut self, entry: MenuEntry, checked: bool) {
        match entry {
            MenuEntry::PrintableText => self.printable_checked = checked,
            MenuEntry::HexDump => self.hexdump_checked = checked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bar_has_nothing_checked() {
        let bar = ModeMenuBar::new();
        assert!(!bar.is_checked(MenuEntry::PrintableText));
        assert!(!bar.is_checked(MenuEntry::HexDump));
    }

    #[test]
    fn set_checked_updates_one_entry() {
        let mut bar = ModeMenuBar::new();
        bar.set_checked(MenuEntry::HexDump, true);
        assert!(bar.is_checked(MenuEntry::HexDump));
        assert!(!bar.is_checked(MenuEntry::PrintableText));
    }

    #[test]
    fn line_marks_the_checked_entry() {
        let mut bar = ModeMenuBar::new();
        bar.set_checked(MenuEntry::PrintableText, true);

        let text = bar.line().to_string();
        assert!(text.contains("(*) [p] Printable text"));
        assert!(text.contains("( ) [x] Hexdump"));
    }
}
