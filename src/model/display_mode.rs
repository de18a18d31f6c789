//! Payload rendering modes and the mode-menu control surface ids.

/// How the payload body of a captured transaction is rendered.
///
/// Exactly one mode is active at any time. Every freshly created payload
/// view starts in [`DisplayMode::PrintableText`]; the mode is not persisted
/// across view instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// Render payload bytes as human-readable text.
    PrintableText,
    /// Render payload bytes as a hexadecimal byte dump.
    HexDump,
}

impl DisplayMode {
    /// Whether this mode renders the payload as printable text.
    pub fn is_printable(self) -> bool {
        matches!(self, DisplayMode::PrintableText)
    }
}

/// Identifiers for the two mutually-exclusive checkable entries on the
/// mode menu.
///
/// Selecting either entry routes through
/// [`PayloadViewController::on_menu_item_selected`](crate::state::PayloadViewController::on_menu_item_selected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuEntry {
    /// The `printable-text` entry.
    PrintableText,
    /// The `hexdump` entry.
    HexDump,
}

impl MenuEntry {
    /// Stable identifier for the entry.
    pub fn id(self) -> &'static str {
        match self {
            MenuEntry::PrintableText => "printable-text",
            MenuEntry::HexDump => "hexdump",
        }
    }

    /// The display mode this entry activates.
    pub fn mode(self) -> DisplayMode {
        match self {
            MenuEntry::PrintableText => DisplayMode::PrintableText,
            MenuEntry::HexDump => DisplayMode::HexDump,
        }
    }

    /// The entry that activates the given mode.
    pub fn for_mode(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::PrintableText => MenuEntry::PrintableText,
            DisplayMode::HexDump => MenuEntry::HexDump,
        }
    }
}
