//! Referral tooltip panel
//!
//! Floating panel anchored to a register trigger. Shows the staff referral
//! code, a copy button, and a hint for how to continue. The panel is drawn
//! over page content at the controller's computed placement.

use crate::tooltip::{InteractionMode, PanelSize, Placement, Side};
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const TITLE: &str = "Staff referral code";
const PROMPT: &str = "Enter this code on the registration form:";

// Same width so the panel does not resize when the label flips
const COPY_LABEL: &str = "[ Copy code ]";
const COPIED_LABEL: &str = "[ Copied ✓  ]";

/// Row of the copy button inside the padded inner area
const BUTTON_ROW: u16 = 5;

/// Border plus one cell of horizontal padding on each side
const CHROME_WIDTH: u16 = 4;
const CHROME_HEIGHT: u16 = 2;

fn hint(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Pointer => "Click Register to continue",
        InteractionMode::Touch => "Tap Register again to continue",
    }
}

fn lines<'a>(code: &'a str, copied: bool, mode: InteractionMode, theme: &Theme) -> Vec<Line<'a>> {
    let button = if copied { COPIED_LABEL } else { COPY_LABEL };
    let button_style = if copied {
        Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    };

    vec![
        Line::from(Span::styled(TITLE, theme.title_style())).centered(),
        Line::raw(""),
        Line::from(Span::styled(PROMPT, Style::default().fg(theme.fg))).centered(),
        Line::from(Span::styled(
            code,
            Style::default().fg(theme.code).add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::raw(""),
        Line::from(Span::styled(button, button_style)).centered(),
        Line::raw(""),
        Line::from(Span::styled(hint(mode), Style::default().fg(theme.muted))).centered(),
    ]
}

/// Size the panel needs to show everything without wrapping
pub fn measure(code: &str, mode: InteractionMode) -> PanelSize {
    let content_width = [
        TITLE.width(),
        PROMPT.width(),
        code.width(),
        COPY_LABEL.width(),
        COPIED_LABEL.width(),
        hint(mode).width(),
    ]
    .into_iter()
    .max()
    .unwrap_or(0);

    let width = (content_width as u16).saturating_add(CHROME_WIDTH);
    // 8 content rows
    PanelSize::new(width, 8 + CHROME_HEIGHT)
}

/// Where the copy button lands inside a panel drawn at `area`
pub fn copy_button_area(area: Rect) -> Option<Rect> {
    let inner_x = area.x + CHROME_WIDTH / 2;
    let inner_width = area.width.saturating_sub(CHROME_WIDTH);
    let y = area.y + 1 + BUTTON_ROW;
    if y >= area.bottom().saturating_sub(1) {
        return None;
    }

    let button_width = (COPY_LABEL.width() as u16).min(inner_width);
    if button_width == 0 {
        return None;
    }
    // Matches how a centered line is laid out inside a paragraph
    let x = inner_x + (inner_width / 2).saturating_sub(button_width / 2);
    Some(Rect::new(x, y, button_width, 1))
}

/// Draw the panel; returns the copy button hit area
pub fn render(
    f: &mut Frame,
    placement: &Placement,
    code: &str,
    copied: bool,
    mode: InteractionMode,
    theme: &Theme,
) -> Option<Rect> {
    let area = placement.area.intersection(f.area());
    if area.is_empty() {
        return None;
    }

    // Small caret on the edge facing the trigger
    let caret = match placement.side {
        Side::Below => "▲",
        Side::Above => "▼",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.panel_border))
        .style(Style::default().bg(theme.panel_bg))
        .padding(Padding::horizontal(1));
    let block = match placement.side {
        Side::Below => block.title_top(Line::from(caret).centered()),
        Side::Above => block.title_bottom(Line::from(caret).centered()),
    };

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines(code, copied, mode, theme)).block(block),
        area,
    );

    copy_button_area(area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_fits_longest_line() {
        let size = measure("NV0000", InteractionMode::Touch);
        assert_eq!(
            size.width,
            PROMPT.width() as u16 + CHROME_WIDTH,
        );
        assert_eq!(size.height, 10);
    }

    #[test]
    fn test_long_code_widens_panel() {
        let code = "X".repeat(60);
        assert_eq!(measure(&code, InteractionMode::Pointer).width, 64);
    }

    #[test]
    fn test_copy_button_is_inside_panel() {
        let area = Rect::new(10, 4, 45, 10);
        let button = copy_button_area(area).unwrap();
        assert!(button.x >= area.x + 2);
        assert!(button.right() <= area.right() - 2);
        assert_eq!(button.y, 4 + 1 + BUTTON_ROW);
    }

    #[test]
    fn test_copy_button_hidden_when_panel_too_short() {
        assert_eq!(copy_button_area(Rect::new(0, 0, 45, 5)), None);
    }
}
