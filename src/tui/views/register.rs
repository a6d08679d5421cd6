// Registration screen - where a confirmed trigger leads

use crate::tui::app::App;
use crate::tui::views::centered_rect;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let label = Style::default().fg(theme.muted);
    let value = Style::default().fg(theme.fg).add_modifier(Modifier::BOLD);

    let copy_hint = if app.copy.is_copied() {
        Span::styled("Copied ✓", Style::default().fg(theme.success))
    } else {
        Span::styled("press c to copy", label)
    };

    let content = vec![
        Line::raw(""),
        Line::from(Span::styled("Continue your registration", theme.title_style())).centered(),
        Line::raw(""),
        Line::from(Span::styled(
            "Open the registration form on your phone or at the desk:",
            Style::default().fg(theme.fg),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Form:      ", label),
            Span::styled(app.config.register_url.as_str(), Style::default().fg(theme.accent)),
        ]),
        Line::from(vec![
            Span::styled("  Referral:  ", label),
            Span::styled(
                app.config.referral_code.as_str(),
                Style::default().fg(theme.code).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            copy_hint,
        ]),
        Line::raw(""),
        Line::from(Span::styled(
            "Enter the referral code in the \"Referred by\" field.",
            value,
        )),
    ];

    let dialog = centered_rect(70, 14, area);
    f.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .style(theme.base())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(theme.border))
                    .title(" Register ")
                    .title_bottom(Line::from(" Esc back ").centered()),
            ),
        dialog,
    );
}
