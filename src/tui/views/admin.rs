// Admin screen - upload and delete card images
//
// Only reachable with an authenticated session. Uploads made during this run
// are listed so they can be removed again.

use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // path input
            Constraint::Length(2), // target
            Constraint::Min(3),    // uploads
        ])
        .split(area);

    let block = |title: &'static str| {
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(title)
    };

    // Text field with a block cursor
    let input = Paragraph::new(Line::from(vec![
        Span::styled(app.admin.path_input.as_str(), Style::default().fg(theme.fg)),
        Span::styled("█", Style::default().fg(theme.accent)),
    ]))
    .block(block(" Image path (Enter to upload) "));
    f.render_widget(input, chunks[0]);

    let busy = if app.admin.pending > 0 {
        format!("  working on {} request(s)...", app.admin.pending)
    } else {
        String::new()
    };
    let target = Paragraph::new(Line::from(vec![
        Span::styled(" Bucket: ", Style::default().fg(theme.muted)),
        Span::styled(app.config.storage.bucket.as_str(), Style::default().fg(theme.fg)),
        Span::styled("  Folder: ", Style::default().fg(theme.muted)),
        Span::styled(app.config.storage.folder.as_str(), Style::default().fg(theme.fg)),
        Span::styled(busy, Style::default().fg(theme.warn)),
    ]));
    f.render_widget(target, chunks[1]);

    let items: Vec<ListItem> = if app.admin.uploads.is_empty() {
        vec![ListItem::new(Span::styled(
            "No uploads yet",
            Style::default().fg(theme.muted),
        ))]
    } else {
        app.admin
            .uploads
            .iter()
            .map(|url| ListItem::new(url.as_str()))
            .collect()
    };
    let list = List::new(items)
        .style(Style::default().fg(theme.fg))
        .highlight_style(
            Style::default()
                .fg(theme.selected_fg)
                .bg(theme.selected_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ")
        .block(block(" Uploaded this session (Del to delete) "));

    let mut state = ListState::default().with_selected(app.admin.selected);
    f.render_stateful_widget(list, chunks[2], &mut state);
}
