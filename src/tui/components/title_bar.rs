// Title bar component
//
// App name on the left, session marker and interaction mode on the right.

use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(28)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" regdesk ", theme.title_style()),
        Span::styled("· member registration", Style::default().fg(theme.muted)),
    ]))
    .style(theme.base());
    f.render_widget(title, halves[0]);

    let mut right = vec![Span::styled(
        format!("{} ", app.mode().as_str()),
        Style::default().fg(theme.muted),
    )];
    if app.session.admin_authenticated {
        right.insert(
            0,
            Span::styled(
                "● admin  ",
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
            ),
        );
    }
    f.render_widget(
        Paragraph::new(Line::from(right).right_aligned()).style(theme.base()),
        halves[1],
    );
}
