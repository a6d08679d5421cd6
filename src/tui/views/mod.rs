// Views module - screen-level rendering logic
//
// Each route is a full-screen experience within the shell (title bar on top,
// status bar at the bottom):
// - Landing: scrollable page with the register triggers
// - Register: registration link and referral code
// - Admin: card image upload/delete
//
// Overlays are drawn last, in order: tooltip panel, modal, toasts.

mod admin;
pub(crate) mod landing;
mod modal;
mod register;

use super::app::{App, Route};
use crate::tui::components::{self, tooltip_panel};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Block;
use ratatui::Frame;

/// Calculate centered rect for a dialog
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Main UI render function - called on every frame
///
/// Also pushes this frame's trigger layout to the tooltip controllers before
/// anything is drawn, so the panel is placed against the current geometry.
pub fn draw(f: &mut Frame, app: &mut App) {
    let viewport = f.area();
    f.render_widget(Block::default().style(app.theme.base()), viewport);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(3),    // content
            Constraint::Length(1), // status
        ])
        .split(viewport);
    let body = chunks[1];

    let areas = match app.route {
        Route::Landing => {
            app.landing_max_scroll = landing::content_height().saturating_sub(body.height);
            app.landing_scroll = app.landing_scroll.min(app.landing_max_scroll);
            landing::trigger_areas(body, app.landing_scroll)
        }
        Route::Register | Route::Admin => Vec::new(),
    };
    app.apply_layout(viewport, &areas);

    components::render_title(f, chunks[0], app);
    match app.route {
        Route::Landing => landing::render(f, body, app),
        Route::Register => register::render(f, body, app),
        Route::Admin => admin::render(f, body, app),
    }
    components::render_status(f, chunks[2], app);

    // Tooltip panel floats over the page, pinned to the viewport. Measuring
    // may move an open panel, so placement is read afterwards.
    let code = app.config.referral_code.clone();
    app.measure_panel(tooltip_panel::measure(&code, app.mode()));
    app.copy_button = match app.visible_panel() {
        Some((_, placement)) => tooltip_panel::render(
            f,
            &placement,
            &code,
            app.copy.is_copied(),
            app.mode(),
            &app.theme,
        ),
        None => None,
    };

    if let Some(modal_state) = app.modal.as_ref() {
        modal::render(f, modal_state, app);
    }

    app.toasts.render(f, viewport, &app.theme);
}
