// Components module - reusable UI building blocks
//
// Shell components are rendered on every route:
// - Title bar: app name, admin session marker, interaction mode
// - Status bar: route, key hints, latest warning
//
// Overlays:
// - Tooltip panel: referral code and copy button
// - Toasts: notifications, bottom-right

pub mod status_bar;
pub mod title_bar;
pub mod toast;
pub mod tooltip_panel;

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the title bar (convenience wrapper)
pub fn render_title(f: &mut Frame, area: Rect, app: &App) {
    title_bar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}
