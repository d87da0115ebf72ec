use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{Alert, AlertKind, OpenMessage, View};
use crate::config::ThemeConfig;

/// Bottom line: key hints for the visible panel, then the current alert.
pub fn render_statusbar(
    f: &mut Frame,
    area: Rect,
    view: View,
    open: Option<&OpenMessage>,
    alert: Option<&Alert>,
    theme: &ThemeConfig,
) {
    let key_style = Style::default().fg(theme.primary());
    let text_style = Style::default().fg(theme.fg_muted());

    let mut hints = match view {
        View::List => vec![
            Span::styled("j/k", key_style),
            Span::styled(" nav  ", text_style),
            Span::styled("Enter", key_style),
            Span::styled(" open  ", text_style),
            Span::styled("i/s/a", key_style),
            Span::styled(" mailbox  ", text_style),
            Span::styled("c", key_style),
            Span::styled(" compose  ", text_style),
            Span::styled("R", key_style),
            Span::styled(" refresh  ", text_style),
            Span::styled("q", key_style),
            Span::styled(" quit", text_style),
        ],
        View::Reader => {
            let mut spans = vec![
                Span::styled("j/k", key_style),
                Span::styled(" scroll  ", text_style),
                Span::styled("r", key_style),
                Span::styled(" reply  ", text_style),
            ];
            if open.is_some_and(OpenMessage::can_archive) {
                spans.push(Span::styled("e", key_style));
                spans.push(Span::styled(" archive  ", text_style));
            }
            if open.is_some_and(OpenMessage::can_unarchive) {
                spans.push(Span::styled("u", key_style));
                spans.push(Span::styled(" unarchive  ", text_style));
            }
            spans.push(Span::styled("i/s/a", key_style));
            spans.push(Span::styled(" mailbox  ", text_style));
            spans.push(Span::styled("q/Esc", key_style));
            spans.push(Span::styled(" back", text_style));
            spans
        }
        View::Compose => vec![
            Span::styled("e", key_style),
            Span::styled(" edit  ", text_style),
            Span::styled("s", key_style),
            Span::styled(" send  ", text_style),
            Span::styled("q/Esc", key_style),
            Span::styled(" discard", text_style),
        ],
    };

    if let Some(alert) = alert {
        let color = match alert.kind {
            AlertKind::Success => theme.success(),
            AlertKind::Error => theme.error(),
        };
        hints.push(Span::styled("  │  ", Style::default().fg(theme.border())));
        hints.push(Span::styled(
            alert.text.clone(),
            Style::default().fg(color),
        ));
    }

    let paragraph = Paragraph::new(Line::from(hints)).style(Style::default().bg(theme.bg_panel()));
    f.render_widget(paragraph, area);
}
