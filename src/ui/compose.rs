use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::ComposeState;
use crate::config::ThemeConfig;

/// Render the compose review panel for the current draft.
pub fn render_compose(f: &mut Frame, area: Rect, compose: &ComposeState, theme: &ThemeConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // To/Subject
            Constraint::Min(5),    // Body preview
        ])
        .split(area);

    let label = Style::default().fg(theme.primary());
    let header_text = vec![
        Line::from(vec![
            Span::styled("To: ", label),
            Span::raw(compose.recipients.clone()),
        ]),
        Line::from(vec![
            Span::styled("Subject: ", label),
            Span::raw(compose.subject.clone()),
        ]),
    ];
    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_active()))
            .title("Compose"),
    );
    f.render_widget(header, chunks[0]);

    let body = Paragraph::new(compose.body.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border()))
                .title("Body"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(body, chunks[1]);
}
