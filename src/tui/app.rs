// TUI application state
//
// Owns the page state (route, scroll, triggers and their tooltip controllers),
// the overlays (modal, toasts), the admin session, and the handles used to
// start background work. Input routing lives in `tui::mod`; rendering lives in
// `tui::views`. Everything here runs on the UI task.

use super::clipboard::{ClipboardWriter, CopyIndicator, SystemClipboard};
use super::components::toast::ToastQueue;
use super::input::InputHandler;
use super::modal::Modal;
use super::theme::{Theme, ThemeKind};
use crate::auth::Session;
use crate::config::Config;
use crate::events::AppEvent;
use crate::logging::{LogBuffer, LogEntry, LogLevel};
use crate::notify::{Notification, Notifier};
use crate::storage::{StorageClient, StorageError, UploadFile};
use crate::tooltip::{
    InteractionMode, PanelSize, Placement, TooltipAction, TooltipController, TooltipRegistry,
};
use crossterm::event::KeyCode;
use ratatui::layout::{Position, Rect};
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;

/// Screens the app can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Landing,
    /// Where a confirmed trigger leads
    Register,
    /// Card image management, behind the admin login
    Admin,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Landing => "Home",
            Route::Register => "Register",
            Route::Admin => "Admin",
        }
    }
}

/// Labels of the register triggers on the landing page, top to bottom
pub const TRIGGER_LABELS: [&str; 2] = ["Register now", "Create your account"];

/// One register call-to-action and its tooltip
pub struct Trigger {
    pub label: &'static str,
    pub controller: TooltipController,
    /// Last known on-screen box; `None` while scrolled out of view
    pub area: Option<Rect>,
    /// Pointer currently over the trigger or its panel
    hovered: bool,
}

/// Admin screen state
#[derive(Debug, Default)]
pub struct AdminScreen {
    /// Path typed into the upload field
    pub path_input: String,
    /// Public URLs uploaded during this run
    pub uploads: Vec<String>,
    pub selected: Option<usize>,
    /// Requests still in flight
    pub pending: usize,
}

impl AdminScreen {
    pub fn selected_url(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.uploads.get(i))
            .map(String::as_str)
    }

    pub fn select_next(&mut self) {
        if self.uploads.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(self.uploads.len() - 1),
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.uploads.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }

    fn remove(&mut self, url: &str) {
        self.uploads.retain(|u| u != url);
        self.selected = match self.selected {
            _ if self.uploads.is_empty() => None,
            Some(i) => Some(i.min(self.uploads.len() - 1)),
            None => None,
        };
    }
}

/// Main application state for the TUI
pub struct App {
    pub config: Config,
    pub theme: Theme,
    pub route: Route,
    pub should_quit: bool,

    pub triggers: Vec<Trigger>,
    /// Trigger that Enter/Space act on
    pub focused_trigger: usize,
    pub landing_scroll: u16,
    pub landing_max_scroll: u16,

    pub copy: CopyIndicator,
    /// Copy button of the open panel, as last drawn
    pub copy_button: Option<Rect>,

    pub toasts: ToastQueue,
    pub session: Session,
    pub modal: Option<Modal>,
    pub admin: AdminScreen,
    pub log_buffer: LogBuffer,

    input: InputHandler,
    storage: Option<StorageClient>,
    events_tx: mpsc::Sender<AppEvent>,
}

impl App {
    pub fn new(config: Config, log_buffer: LogBuffer, events_tx: mpsc::Sender<AppEvent>) -> Self {
        let registry = TooltipRegistry::new();
        let settings = config.tooltip.settings();
        let triggers = TRIGGER_LABELS
            .into_iter()
            .map(|label| {
                let mut controller =
                    TooltipController::new(registry.clone(), config.interaction, settings.clone());
                controller.set_enabled(config.tooltip.enabled);
                Trigger {
                    label,
                    controller,
                    area: None,
                    hovered: false,
                }
            })
            .collect();

        // Missing storage config is reported when an upload is attempted
        let storage = match StorageClient::new(&config.storage) {
            Ok(client) => Some(client),
            Err(StorageError::NotConfigured) => None,
            Err(e) => {
                tracing::warn!("Storage client unavailable: {}", e);
                None
            }
        };

        Self {
            theme: ThemeKind::by_name(&config.theme).theme(),
            config,
            route: Route::default(),
            should_quit: false,
            triggers,
            focused_trigger: 0,
            landing_scroll: 0,
            landing_max_scroll: 0,
            copy: CopyIndicator::new(),
            copy_button: None,
            toasts: ToastQueue::new(),
            session: Session::default(),
            modal: None,
            admin: AdminScreen::default(),
            log_buffer,
            input: InputHandler::default(),
            storage,
            events_tx,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.config.interaction
    }

    // ─────────────────────────────────────────────────────────────────────
    // Keys
    // ─────────────────────────────────────────────────────────────────────

    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.input.handle_key_press(key)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input.handle_key_release(key);
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.input.reset();
        self.modal = Some(modal);
    }

    pub fn close_modal(&mut self) {
        self.input.reset();
        self.modal = None;
    }

    pub fn cycle_theme(&mut self) {
        let next = self.theme.kind.next();
        self.theme = next.theme();
        tracing::debug!(theme = next.name(), "theme changed");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────

    /// Switch screens; the admin screen requires a logged-in session
    pub fn navigate(&mut self, route: Route) {
        if route == Route::Admin && !self.session.admin_authenticated {
            self.open_modal(Modal::login());
            return;
        }
        if route != Route::Landing {
            self.dismiss_tooltips(Instant::now());
        }
        if self.route != route {
            tracing::debug!(from = self.route.name(), to = route.name(), "navigate");
        }
        self.route = route;
    }

    fn route_action(&mut self, action: TooltipAction) {
        match action {
            TooltipAction::Proceed => self.navigate(Route::Register),
            // Whoever lost the slot drops its timers now
            TooltipAction::Shown => {
                for trigger in &mut self.triggers {
                    trigger.controller.sync();
                }
            }
            TooltipAction::None | TooltipAction::Hidden => {}
        }
    }

    /// Forget hover state; the next pointer move over a trigger counts as an enter
    fn clear_hover(&mut self) {
        for trigger in &mut self.triggers {
            trigger.hovered = false;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Layout and time
    // ─────────────────────────────────────────────────────────────────────

    /// Feed freshly computed trigger boxes to their controllers
    ///
    /// `areas` is indexed like `triggers`; off-page routes pass `None`s.
    pub fn apply_layout(&mut self, viewport: Rect, areas: &[Option<Rect>]) {
        for (i, trigger) in self.triggers.iter_mut().enumerate() {
            let area = areas.get(i).copied().flatten();
            trigger.area = area;
            trigger.controller.update_layout(area, viewport);
        }
    }

    /// Report the panel's rendered size to every controller
    ///
    /// Ignored until a panel is actually open, so the first show is placed
    /// with the provisional size and re-placed on its first paint.
    pub fn measure_panel(&mut self, size: PanelSize) {
        if self.visible_panel().is_none() {
            return;
        }
        for trigger in &mut self.triggers {
            trigger.controller.on_panel_measured(size);
        }
    }

    /// Open panel, if any
    pub fn visible_panel(&self) -> Option<(usize, Placement)> {
        self.triggers
            .iter()
            .enumerate()
            .find_map(|(i, t)| t.controller.placement().map(|p| (i, p)))
    }

    /// Periodic timer pass from the event loop
    pub fn tick(&mut self, now: Instant) {
        let actions: Vec<TooltipAction> = self
            .triggers
            .iter_mut()
            .map(|t| t.controller.tick(now))
            .collect();
        for action in actions {
            self.route_action(action);
        }
        self.copy.tick(now);
        self.toasts.tick(now);
    }

    pub fn scroll_landing(&mut self, delta: i32) {
        let next = (self.landing_scroll as i32 + delta).clamp(0, self.landing_max_scroll as i32);
        self.landing_scroll = next as u16;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Trigger interaction
    // ─────────────────────────────────────────────────────────────────────

    /// Click (pointer) or tap (touch) on a trigger
    pub fn activate_trigger(&mut self, index: usize, now: Instant) {
        if index >= self.triggers.len() {
            return;
        }
        self.focused_trigger = index;
        let mode = self.mode();
        let controller = &mut self.triggers[index].controller;
        let action = match mode {
            InteractionMode::Pointer => controller.click(now),
            InteractionMode::Touch => controller.tap(now),
        };
        self.route_action(action);
    }

    /// Keyboard preview of the focused trigger's panel
    pub fn preview_focused(&mut self, now: Instant) {
        let index = self.focused_trigger;
        match self.mode() {
            InteractionMode::Touch => self.activate_trigger(index, now),
            InteractionMode::Pointer => {
                let Some(trigger) = self.triggers.get_mut(index) else {
                    return;
                };
                let action = if trigger.controller.is_visible() {
                    trigger.controller.outside_tap(now)
                } else {
                    trigger.controller.pointer_enter(now)
                };
                self.route_action(action);
            }
        }
    }

    pub fn focus_next_trigger(&mut self) {
        self.focused_trigger = (self.focused_trigger + 1) % self.triggers.len().max(1);
    }

    /// Outside tap for every controller (Esc, click on empty page)
    pub fn dismiss_tooltips(&mut self, now: Instant) {
        for trigger in &mut self.triggers {
            trigger.controller.outside_tap(now);
        }
        self.clear_hover();
    }

    fn panel_contains(&self, index: usize, pos: Position) -> bool {
        self.triggers[index]
            .controller
            .placement()
            .is_some_and(|p| p.area.contains(pos))
    }

    /// Pointer moved: derive enter/leave per trigger
    ///
    /// The open panel counts as part of its trigger, so moving from the
    /// trigger onto the panel never closes it.
    pub fn pointer_moved(&mut self, column: u16, row: u16, now: Instant) {
        let pos = Position::new(column, row);
        for i in 0..self.triggers.len() {
            let inside = self.triggers[i].area.is_some_and(|a| a.contains(pos))
                || self.panel_contains(i, pos);
            let trigger = &mut self.triggers[i];
            if inside == trigger.hovered {
                continue;
            }
            trigger.hovered = inside;
            let action = if inside {
                trigger.controller.pointer_enter(now)
            } else {
                trigger.controller.pointer_leave(now)
            };
            self.route_action(action);
        }
    }

    /// Mouse button pressed at a cell
    pub fn pointer_down(&mut self, column: u16, row: u16, now: Instant) {
        let pos = Position::new(column, row);

        if self.copy_button.is_some_and(|b| b.contains(pos)) && self.visible_panel().is_some() {
            self.start_copy();
            return;
        }

        if let Some(index) = self
            .triggers
            .iter()
            .position(|t| t.area.is_some_and(|a| a.contains(pos)))
        {
            self.activate_trigger(index, now);
            return;
        }

        let on_panel = (0..self.triggers.len()).any(|i| self.panel_contains(i, pos));
        if !on_panel {
            self.dismiss_tooltips(now);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Background work
    // ─────────────────────────────────────────────────────────────────────

    /// Copy the referral code on a blocking task; the result comes back as
    /// `AppEvent::CopyFinished`
    pub fn start_copy(&mut self) {
        let code = self.config.referral_code.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = SystemClipboard.write_text(&code).await;
            let _ = tx.send(AppEvent::CopyFinished(result)).await;
        });
    }

    pub fn submit_login(&mut self, username: &str, password: &str) {
        match self
            .session
            .login(&self.config.admin, username, password, &mut self.toasts)
        {
            Ok(()) => {
                self.close_modal();
                self.navigate(Route::Admin);
            }
            Err(_) => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.reject_login();
                }
            }
        }
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.toasts
            .notify(Notification::success("Logged out", "Admin session ended"));
        self.navigate(Route::Landing);
    }

    /// Upload the file named in the admin path field
    pub fn start_upload(&mut self) {
        let path = self.admin.path_input.trim().to_string();
        if path.is_empty() {
            return;
        }
        let Some(client) = self.storage.clone() else {
            self.report_storage_error(&StorageError::NotConfigured);
            return;
        };

        let bucket = self.config.storage.bucket.clone();
        let folder = self.config.storage.folder.clone();
        let tx = self.events_tx.clone();
        self.admin.pending += 1;
        self.admin.path_input.clear();

        tokio::spawn(async move {
            let result = match UploadFile::from_path(&PathBuf::from(&path)).await {
                Ok(file) => client.upload(&file, &bucket, &folder).await,
                Err(e) => {
                    tracing::error!("Error reading {}: {}", path, e);
                    Err(e)
                }
            };
            let _ = tx
                .send(AppEvent::UploadFinished { file: path, result })
                .await;
        });
    }

    /// Delete the selected upload
    pub fn start_delete(&mut self) {
        let Some(url) = self.admin.selected_url().map(str::to_string) else {
            return;
        };
        let Some(client) = self.storage.clone() else {
            self.report_storage_error(&StorageError::NotConfigured);
            return;
        };

        let bucket = self.config.storage.bucket.clone();
        let tx = self.events_tx.clone();
        self.admin.pending += 1;

        tokio::spawn(async move {
            let result = client.delete(&url, &bucket).await;
            let _ = tx.send(AppEvent::DeleteFinished { url, result }).await;
        });
    }

    fn report_storage_error(&mut self, error: &StorageError) {
        self.toasts
            .notify(Notification::failure(error.title(), error.to_string()));
    }

    /// Apply a completion event from a background task
    pub fn on_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::CopyFinished(result) => {
                self.copy.complete(result, now, &mut self.toasts);
            }
            AppEvent::UploadFinished { file, result } => {
                self.admin.pending = self.admin.pending.saturating_sub(1);
                match result {
                    Ok(url) => {
                        self.admin.uploads.push(url);
                        self.admin.selected = Some(self.admin.uploads.len() - 1);
                        self.toasts
                            .notify(Notification::success("Image uploaded", file));
                    }
                    Err(e) => self.report_storage_error(&e),
                }
            }
            AppEvent::DeleteFinished { url, result } => {
                self.admin.pending = self.admin.pending.saturating_sub(1);
                match result {
                    Ok(()) => {
                        self.admin.remove(&url);
                        self.toasts.notify(Notification::success(
                            "Image deleted",
                            "The image was removed from storage",
                        ));
                    }
                    Err(e) => self.report_storage_error(&e),
                }
            }
        }
    }

    /// Latest warning or error for the status bar
    pub fn status_log(&self) -> Option<LogEntry> {
        self.log_buffer.latest_at_least(LogLevel::Warn)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.copy.reset();
    }
}
