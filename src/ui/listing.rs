use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::api::MessageSummary;
use crate::config::{LayoutConfig, ThemeConfig};

/// Render the mailbox listing. Rows appear in the order they were fetched.
pub fn render_listing(
    f: &mut Frame,
    area: Rect,
    messages: &[MessageSummary],
    state: &mut ListState,
    title: &str,
    layout: &LayoutConfig,
    theme: &ThemeConfig,
) {
    // Available width: area minus borders (2) minus highlight symbol (2)
    let avail_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = messages
        .iter()
        .map(|m| ListItem::new(listing_line(m, layout, avail_width, theme)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_active()))
                .title(title.to_string()),
        )
        .highlight_style(
            Style::default()
                .bg(theme.selected_bg())
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, state);
}

/// One listing row: marker, sender, subject, timestamp. Already-read rows
/// carry the dimmed "opened" look; unread rows are bold with a `*` marker.
pub fn listing_line(
    msg: &MessageSummary,
    layout: &LayoutConfig,
    avail_width: usize,
    theme: &ThemeConfig,
) -> Line<'static> {
    let sender_width = layout
        .sender_width
        .min(avail_width.saturating_sub(layout.timestamp_width + 4) / 2);
    let subject_width = avail_width.saturating_sub(sender_width + layout.timestamp_width + 4);

    let marker = if msg.read { " " } else { "*" };
    let text = format!(
        "{} {:sw$} {:jw$} {}",
        marker,
        truncate(&msg.sender, sender_width),
        truncate(&msg.subject, subject_width),
        truncate(&msg.timestamp, layout.timestamp_width),
        sw = sender_width,
        jw = subject_width,
    );

    Line::from(Span::styled(text, row_style(msg.read, theme)))
}

/// Opened rows are dimmed and muted; unread rows are bold in the unread color.
fn row_style(read: bool, theme: &ThemeConfig) -> Style {
    if read {
        Style::default()
            .fg(theme.fg_muted())
            .add_modifier(Modifier::DIM)
    } else {
        Style::default()
            .fg(theme.unread())
            .add_modifier(Modifier::BOLD)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if max < 4 {
        return s.chars().take(max).collect();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}
