//! Payload notice modal rendering.
//!
//! The blocking warning shown before captured payload data is revealed for
//! the first time. Only explicit keys resolve it; there is no
//! click-outside-to-continue.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

/// Warning text shown before revealing captured data.
const NOTICE: &str = "The captured payload may contain sensitive data (credentials, cookies, \
personal information). It may also contain content crafted to deceive you. \
Only proceed if you understand the risks.";

/// Render the centered consent prompt over the current frame.
pub fn render_consent_modal(frame: &mut Frame) {
    let modal_area = centered_rect(60, 9, frame.area());

    frame.render_widget(Clear, modal_area);

    let body = vec![
        Line::from(""),
        Line::from(NOTICE),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Show the data   "),
            Span::styled("[n]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel   "),
            Span::styled("[Esc]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Back"),
        ]),
    ];

    let paragraph = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    " Warning ",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
        );

    frame.render_widget(paragraph, modal_area);
}

/// Centered rect of `width` columns and `height` rows within `area`,
/// clamped to the available space.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
