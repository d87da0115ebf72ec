use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::OpenMessage;
use crate::config::ThemeConfig;

/// Render the single-message panel: header fields on top, body below. All
/// fields render as raw text, never as markup.
pub fn render_reader(f: &mut Frame, area: Rect, open: &OpenMessage, scroll: u16, theme: &ThemeConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // header fields
            Constraint::Min(3),    // body
        ])
        .split(area);

    let d = &open.detail;
    let label = Style::default().fg(theme.primary());
    let header_text = vec![
        Line::from(vec![Span::styled("From: ", label), Span::raw(d.sender.clone())]),
        Line::from(vec![
            Span::styled("To: ", label),
            Span::raw(d.recipients.clone()),
        ]),
        Line::from(vec![
            Span::styled("Date: ", label),
            Span::raw(d.timestamp.clone()),
        ]),
        Line::from(vec![
            Span::styled("Subject: ", label),
            Span::raw(d.subject.clone()),
        ]),
    ];
    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_active()))
            .title(open.origin.title()),
    );
    f.render_widget(header, chunks[0]);

    let body_lines: Vec<Line> = d.body.lines().map(Line::raw).collect();
    let body = Paragraph::new(body_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border())),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(body, chunks[1]);
}
