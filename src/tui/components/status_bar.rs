// Status bar component
//
// Bottom line: current route, key hints for it, and the latest warning or
// error captured from tracing. Captured logs never reach the terminal
// directly, so this is where they surface.

use crate::tui::app::{App, Route};
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn hints(route: Route) -> &'static str {
    match route {
        Route::Landing => "Tab focus · Space preview · Enter register · c copy · a admin · ? help",
        Route::Register => "c copy · Esc back · q quit",
        Route::Admin => "Enter upload · Del delete · Ctrl+L log out · Esc back",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let bp = Breakpoint::from_width(area.width);

    let mut spans = vec![Span::styled(
        format!(" {} ", app.route.name()),
        Style::default()
            .fg(theme.button_fg)
            .bg(theme.button_bg)
            .add_modifier(Modifier::BOLD),
    )];

    if bp >= Breakpoint::Normal {
        spans.push(Span::styled(
            format!(" {}", hints(app.route)),
            Style::default().fg(theme.muted),
        ));
    }

    if bp == Breakpoint::Wide {
        if let Some(entry) = app.status_log() {
            spans.push(Span::styled(
                format!(
                    "  {} {} {}",
                    entry.timestamp.with_timezone(&chrono::Local).format("%H:%M:%S"),
                    entry.level.as_str(),
                    entry.message
                ),
                theme.log_style(entry.level),
            ));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.base()), area);
}
