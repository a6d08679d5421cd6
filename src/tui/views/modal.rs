// Modal overlay rendering
//
// Modals are rendered on top of the page and the tooltip panel:
// - Help modal: keyboard shortcuts and current config
// - Login modal: admin username/password form

use super::centered_rect;
use crate::tui::app::App;
use crate::tui::modal::{LoginField, LoginForm, Modal};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render a modal dialog as a centered overlay
pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Login(form) => render_login(f, form, app),
    }
}

fn render_help(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let key_style = Style::default().fg(theme.accent);
    let desc_style = Style::default().fg(theme.fg);
    let header_style = Style::default()
        .fg(theme.title)
        .add_modifier(Modifier::BOLD);

    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let register_key = match app.mode() {
        crate::tooltip::InteractionMode::Pointer => "Click Register to continue",
        crate::tooltip::InteractionMode::Touch => "Tap once to preview, again to continue",
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Home", header_style)),
        kb("Tab", "Focus next register button"),
        kb("Space", "Preview referral code"),
        kb("Enter", "Register"),
        kb("c", "Copy referral code"),
        kb("↑/↓, PgUp", "Scroll"),
        kb("Esc", "Close the referral panel"),
        Line::raw(""),
        Line::from(Span::styled("  Admin", header_style)),
        kb("a", "Admin screen (login required)"),
        kb("Enter", "Upload the typed path"),
        kb("↑/↓", "Select upload"),
        kb("Del", "Delete selected upload"),
        kb("Ctrl+L", "Log out"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("t", "Switch theme"),
        kb("?", "Toggle this help"),
        kb("q, Ctrl+C", "Quit"),
        Line::raw(""),
        Line::from(Span::styled("  Mouse", header_style)),
        Line::from(Span::styled(format!("    {}", register_key), desc_style)),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(theme.kind.name(), key_style),
            Span::styled("  |  Mode: ", desc_style),
            Span::styled(app.mode().as_str(), key_style),
        ]),
    ]);

    let area = centered_rect(50, 30, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(content)
            .style(Style::default().bg(theme.panel_bg))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.panel_border))
                    .border_type(theme.border_type)
                    .title(" Help ")
                    .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
            ),
        area,
    );
}

fn render_login(f: &mut Frame, form: &LoginForm, app: &App) {
    let theme = &app.theme;

    let field = |label: &'static str, value: String, focused: bool| -> Vec<Line<'static>> {
        let (marker, style) = if focused {
            (
                "▶ ",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(theme.muted))
        };
        let cursor = if focused { "█" } else { "" };
        vec![
            Line::from(Span::styled(format!("{}{}", marker, label), style)),
            Line::from(vec![
                Span::raw("    "),
                Span::styled(value, Style::default().fg(theme.fg)),
                Span::styled(cursor, Style::default().fg(theme.accent)),
            ]),
        ]
    };

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "  Staff only. Sign in to manage card images.",
            Style::default().fg(theme.fg),
        )),
        Line::raw(""),
    ];
    lines.extend(field(
        "Username",
        form.username.clone(),
        form.focus == LoginField::Username,
    ));
    lines.push(Line::raw(""));
    lines.extend(field(
        "Password",
        form.masked_password(),
        form.focus == LoginField::Password,
    ));

    let area = centered_rect(48, 12, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(theme.panel_bg))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.panel_border))
                    .border_type(theme.border_type)
                    .title(" Admin login ")
                    .title_bottom(Line::from(" Tab switch · Enter submit · Esc cancel ").centered()),
            ),
        area,
    );
}
