// Theme system for the TUI
//
// Two palettes, picked by name from config. Each theme defines colors for
// every element the landing, register, and admin screens draw.

use crate::logging::LogLevel;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    /// Resolve a config name; unknown names fall back to Dark
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
        }
    }
}

/// Complete theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,

    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,

    pub title: Color,
    pub accent: Color,

    /// Register triggers
    pub button_bg: Color,
    pub button_fg: Color,

    /// Tooltip panel
    pub panel_bg: Color,
    pub panel_border: Color,
    pub code: Color,

    pub selected_bg: Color,
    pub selected_fg: Color,

    pub success: Color,
    pub error: Color,
    pub warn: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            kind: ThemeKind::Dark,
            bg: Color::Reset,
            fg: Color::White,
            muted: Color::Gray,
            border: Color::DarkGray,
            border_type: BorderType::Rounded,

            title: Color::Cyan,
            accent: Color::Rgb(0x8b, 0xe9, 0xfd),

            button_bg: Color::Rgb(0x25, 0x63, 0xeb),
            button_fg: Color::White,

            panel_bg: Color::Rgb(0x1e, 0x1f, 0x29),
            panel_border: Color::Cyan,
            code: Color::Rgb(0xf1, 0xfa, 0x8c),

            selected_bg: Color::DarkGray,
            selected_fg: Color::Yellow,

            success: Color::Green,
            error: Color::Red,
            warn: Color::Yellow,
        }
    }

    pub fn light() -> Self {
        Self {
            kind: ThemeKind::Light,
            bg: Color::White,
            fg: Color::Black,
            muted: Color::DarkGray,
            border: Color::Gray,
            border_type: BorderType::Plain,

            title: Color::Blue,
            accent: Color::Rgb(0x1d, 0x4e, 0xd8),

            button_bg: Color::Blue,
            button_fg: Color::White,

            panel_bg: Color::Rgb(0xf8, 0xfa, 0xfc),
            panel_border: Color::Blue,
            code: Color::Rgb(184, 134, 11), // Dark goldenrod

            selected_bg: Color::LightBlue,
            selected_fg: Color::Black,

            success: Color::Green,
            error: Color::Red,
            warn: Color::Rgb(184, 134, 11),
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn button_style(&self, hovered: bool) -> Style {
        let style = Style::default().fg(self.button_fg).bg(self.button_bg);
        if hovered {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style.add_modifier(Modifier::BOLD)
        }
    }

    pub fn log_style(&self, level: LogLevel) -> Style {
        match level {
            LogLevel::Error => Style::default().fg(self.error),
            LogLevel::Warn => Style::default().fg(self.warn),
            _ => Style::default().fg(self.muted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_is_case_insensitive() {
        assert_eq!(ThemeKind::by_name("light"), ThemeKind::Light);
        assert_eq!(ThemeKind::by_name(" LIGHT "), ThemeKind::Light);
        assert_eq!(ThemeKind::by_name("Dark"), ThemeKind::Dark);
        assert_eq!(ThemeKind::by_name("solarized"), ThemeKind::Dark);
    }

    #[test]
    fn test_next_cycles() {
        assert_eq!(ThemeKind::Dark.next().next(), ThemeKind::Dark);
        assert_eq!(ThemeKind::Light.theme().kind, ThemeKind::Light);
    }
}
