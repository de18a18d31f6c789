//! Renders one transaction's payload as displayable lines.
//!
//! The adapter owns the resolved record reference, the side selection and
//! the printable-vs-hexdump flag, and produces the `Line`s the payload pane
//! draws. It also carries the export handler slot managed by
//! [`ExportHandlerBinding`](crate::state::ExportHandlerBinding).

use crate::model::HttpRecord;
use crate::state::{ExportBindable, ExportPayloadHandler};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// Bytes per hexdump row.
const BYTES_PER_ROW: usize = 16;

/// Width of the hex column for a full row: 16 * "xx " plus the mid-row gap.
const HEX_COLUMN_WIDTH: usize = BYTES_PER_ROW * 3 + 1;

/// Produces display lines for one side of a captured transaction.
pub struct PayloadAdapter {
    record: Rc<HttpRecord>,
    show_reply: bool,
    printable: bool,
    export_handler: Option<Rc<dyn ExportPayloadHandler>>,
}

impl PayloadAdapter {
    /// New adapter over `record`, starting in printable-text mode.
    pub fn new(record: Rc<HttpRecord>, show_reply: bool) -> Self {
        Self {
            record,
            show_reply,
            printable: true,
            export_handler: None,
        }
    }

    /// Switch between printable text and hexdump output.
    pub fn set_display_as_printable_text(&mut self, printable: bool) {
        self.printable = printable;
    }

    /// Whether the adapter renders printable text.
    pub fn displays_printable_text(&self) -> bool {
        self.printable
    }

    /// Invoke the bound export handler on the displayed payload.
    ///
    /// `None` when no handler is bound (host detached).
    pub fn export_current(&self) -> Option<io::Result<PathBuf>> {
        let handler = self.export_handler.as_ref()?;
        Some(handler.export_payload(self.record.payload(self.show_reply)))
    }

    /// All display lines: a header for the selected side, then the body in
    /// the active mode.
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                self.record.header_line(self.show_reply),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        let payload = self.record.payload(self.show_reply);
        if self.printable {
            lines.extend(printable_lines(payload).into_iter().map(Line::from));
        } else {
            lines.extend(hexdump_rows(payload).into_iter().map(Line::from));
        }
        lines
    }
}

impl ExportBindable for PayloadAdapter {
    fn set_export_handler(&mut self, handler: Option<Rc<dyn ExportPayloadHandler>>) {
        self.export_handler = handler;
    }
}

impl std::fmt::Debug for PayloadAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadAdapter")
            .field("show_reply", &self.show_reply)
            .field("printable", &self.printable)
            .field("has_export_handler", &self.export_handler.is_some())
            .finish()
    }
}

/// Render payload bytes as printable text lines.
///
/// Lossy UTF-8; CR is dropped, LF splits lines, every other control byte
/// becomes `.`.
pub fn printable_lines(payload: &[u8]) -> Vec<String> {
    let text: String = String::from_utf8_lossy(payload)
        .chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\r' => None,
            c if c.is_control() => Some('.'),
            c => Some(c),
        })
        .collect();
    text.split('\n').map(str::to_string).collect()
}

/// Render payload bytes as classic hexdump rows.
///
/// Each row: 8-digit hex offset, 16 hex bytes with an extra gap after the
/// eighth, and an ASCII column where only graphic characters and space are
/// shown verbatim.
pub fn hexdump_rows(payload: &[u8]) -> Vec<String> {
    payload
        .chunks(BYTES_PER_ROW)
        .enumerate()
        .map(|(row, chunk)| {
            let mut hex = String::with_capacity(HEX_COLUMN_WIDTH);
            let mut ascii = String::with_capacity(BYTES_PER_ROW);
            for (i, byte) in chunk.iter().enumerate() {
                if i == BYTES_PER_ROW / 2 {
                    hex.push(' ');
                }
                hex.push_str(&format!("{byte:02x} "));
                if byte.is_ascii_graphic() || *byte == b' ' {
                    ascii.push(*byte as char);
                } else {
                    ascii.push('.');
                }
            }
            let width = HEX_COLUMN_WIDTH;
            format!("{:08x}  {hex:<width$} |{ascii}|", row * BYTES_PER_ROW)
        })
        .collect()
}
