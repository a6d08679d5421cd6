// Landing page
//
// A scrollable page with two register triggers. Trigger boxes are computed
// from the same row table used for drawing, so the controllers and the
// screen always agree on where a trigger is.

use crate::tui::app::{App, TRIGGER_LABELS};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

enum Row {
    Blank,
    Heading(&'static str),
    Text(&'static str),
    Bullet(&'static str),
    /// Index into `TRIGGER_LABELS`
    Trigger(usize),
}

const PAGE: &[Row] = &[
    Row::Blank,
    Row::Heading("Join the member rewards programme"),
    Row::Blank,
    Row::Text("Earn points on every visit and unlock member-only pricing."),
    Row::Text("Registration takes two minutes. Ask the staff member helping you"),
    Row::Text("for their referral code, or preview it on the button below."),
    Row::Blank,
    Row::Trigger(0),
    Row::Blank,
    Row::Blank,
    Row::Heading("Why register"),
    Row::Blank,
    Row::Bullet("Points on every purchase, redeemable in store"),
    Row::Bullet("Early access to seasonal collections"),
    Row::Bullet("A birthday voucher every year"),
    Row::Bullet("Free alterations on full-price items"),
    Row::Bullet("Digital receipts, no paper"),
    Row::Blank,
    Row::Heading("How it works"),
    Row::Blank,
    Row::Text("1. Open the registration form."),
    Row::Text("2. Enter your details and the staff referral code."),
    Row::Text("3. Confirm your email address."),
    Row::Text("4. Show your member card at the till."),
    Row::Blank,
    Row::Heading("Your data"),
    Row::Blank,
    Row::Text("We only ask for what we need to run your account. You can"),
    Row::Text("close your account at any time from the member area."),
    Row::Blank,
    Row::Heading("Questions"),
    Row::Blank,
    Row::Text("Staff at the desk can help with anything on this page."),
    Row::Blank,
    Row::Blank,
    Row::Heading("Ready?"),
    Row::Blank,
    Row::Trigger(1),
    Row::Blank,
    Row::Blank,
    Row::Text("Staff: press a for the admin screen."),
    Row::Blank,
];

/// Total rows of the page
pub fn content_height() -> u16 {
    PAGE.len() as u16
}

/// Rendered label of a trigger, padded like a button
fn button_text(label: &str) -> String {
    format!("  {}  ", label)
}

fn button_width(label: &str, max: u16) -> u16 {
    (button_text(label).width() as u16).min(max)
}

/// On-screen trigger boxes for a page drawn into `body` at `scroll`
///
/// A trigger scrolled out of `body` has no box.
pub fn trigger_areas(body: Rect, scroll: u16) -> Vec<Option<Rect>> {
    let mut areas = vec![None; TRIGGER_LABELS.len()];
    for (row, entry) in PAGE.iter().enumerate() {
        let Row::Trigger(index) = entry else {
            continue;
        };
        let row = row as u16;
        if row < scroll || row - scroll >= body.height {
            continue;
        }
        let width = button_width(TRIGGER_LABELS[*index], body.width);
        let x = body.x + (body.width - width) / 2;
        areas[*index] = Some(Rect::new(x, body.y + row - scroll, width, 1));
    }
    areas
}

pub fn render(f: &mut Frame, body: Rect, app: &App) {
    let theme = &app.theme;
    let heading = theme.title_style();
    let text = Style::default().fg(theme.fg);
    let bullet = Style::default().fg(theme.accent);

    let lines: Vec<Line> = PAGE
        .iter()
        .map(|row| match row {
            Row::Blank | Row::Trigger(_) => Line::raw(""),
            Row::Heading(s) => Line::from(Span::styled(*s, heading)).centered(),
            Row::Text(s) => Line::from(Span::styled(*s, text)).centered(),
            Row::Bullet(s) => Line::from(vec![
                Span::styled("• ", bullet),
                Span::styled(*s, text),
            ])
            .centered(),
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines)
            .style(theme.base())
            .scroll((app.landing_scroll, 0)),
        body,
    );

    // Buttons go on top at the exact boxes the controllers were given
    for (index, trigger) in app.triggers.iter().enumerate() {
        let Some(area) = trigger.area else {
            continue;
        };
        let highlighted = index == app.focused_trigger || trigger.controller.is_visible();
        let mut style = theme.button_style(highlighted);
        if trigger.controller.is_visible() {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        f.render_widget(
            Paragraph::new(button_text(trigger.label)).style(style),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_areas_follow_scroll() {
        let body = Rect::new(0, 1, 80, 20);
        let top = trigger_areas(body, 0);
        let first = top[0].unwrap();
        assert_eq!(first.y, 1 + 7);
        assert_eq!(first.width, button_text(TRIGGER_LABELS[0]).width() as u16);
        assert_eq!(first.x, (80 - first.width) / 2);
        // Second trigger is below the fold
        assert!(top[1].is_none());

        let scrolled = trigger_areas(body, 5);
        assert_eq!(scrolled[0].unwrap().y, 1 + 2);
    }

    #[test]
    fn test_trigger_scrolled_off_top_is_unmounted() {
        let body = Rect::new(0, 1, 80, 20);
        let areas = trigger_areas(body, 8);
        assert!(areas[0].is_none());
    }

    #[test]
    fn test_every_trigger_appears_once() {
        for index in 0..TRIGGER_LABELS.len() {
            let count = PAGE
                .iter()
                .filter(|row| matches!(row, Row::Trigger(i) if *i == index))
                .count();
            assert_eq!(count, 1);
        }
    }
}
