// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks, task completions)
// - Routing input to the app, the modal, or the focused screen

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod layout;
pub mod modal;
pub mod theme;
pub mod views;

use crate::config::Config;
use crate::events::AppEvent;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, Route};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Timer resolution for tooltip, copy indicator, and toast deadlines
const TICK: Duration = Duration::from_millis(50);

/// Rows moved per mouse wheel notch
const WHEEL_STEP: i32 = 3;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (events_tx, mut events_rx) = mpsc::channel(32);
    let mut app = App::new(config, log_buffer, events_tx);
    tracing::info!(mode = app.mode().as_str(), "regdesk started");

    let result = run_event_loop(&mut terminal, &mut app, &mut events_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on terminal input, the tick interval, and completion events from
/// background tasks, handling whichever is ready first. All state changes
/// happen here, one at a time.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(TICK);
    tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        // Resize: the next draw re-lays out and repositions
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick(Instant::now());
            }

            Some(event) = events_rx.recv() => {
                app.on_event(event, Instant::now());
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Ctrl+C → Modal → Route-specific
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind == KeyEventKind::Press
        && key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        app.should_quit = true;
        return;
    }

    if handle_modal_input(app, &key_event) {
        return;
    }

    match key_event.kind {
        KeyEventKind::Press => match app.route {
            Route::Landing | Route::Register => handle_page_key(app, key_event.code),
            Route::Admin => handle_admin_key(app, &key_event),
        },
        KeyEventKind::Release => app.handle_key_release(key_event.code),
        _ => {}
    }
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    // Keep InputHandler in sync so keys don't stay "pressed" after close
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return true;
    }
    if key_event.kind != KeyEventKind::Press {
        return true;
    }

    // Typing goes straight to the modal; no debounce on text
    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.close_modal(),
        ModalAction::Submit { username, password } => app.submit_login(&username, &password),
    }
    true
}

/// Landing and register screens share the global keys
fn handle_page_key(app: &mut App, key: KeyCode) {
    if !app.handle_key_press(key) {
        return;
    }
    let now = Instant::now();

    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('?') => app.open_modal(Modal::help()),
        KeyCode::Char('t') => app.cycle_theme(),
        KeyCode::Char('c') => app.start_copy(),
        KeyCode::Char('a') => app.navigate(Route::Admin),
        KeyCode::Esc => match app.route {
            Route::Landing => app.dismiss_tooltips(now),
            _ => app.navigate(Route::Landing),
        },
        _ if app.route != Route::Landing => {}
        KeyCode::Tab | KeyCode::BackTab => {
            app.dismiss_tooltips(now);
            app.focus_next_trigger();
        }
        KeyCode::Char(' ') => app.preview_focused(now),
        KeyCode::Enter => app.activate_trigger(app.focused_trigger, now),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_landing(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_landing(1),
        KeyCode::PageUp => app.scroll_landing(-10),
        KeyCode::PageDown => app.scroll_landing(10),
        KeyCode::Home => app.scroll_landing(-(app.landing_max_scroll as i32)),
        KeyCode::End => app.scroll_landing(app.landing_max_scroll as i32),
        _ => {}
    }
}

/// Admin screen: printable keys edit the path field
fn handle_admin_key(app: &mut App, key_event: &KeyEvent) {
    let key = key_event.code;

    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        if key == KeyCode::Char('l') && app.handle_key_press(key) {
            app.logout();
        }
        return;
    }

    match key {
        KeyCode::Char(c) => app.admin.path_input.push(c),
        KeyCode::Backspace => {
            app.admin.path_input.pop();
        }
        _ if !app.handle_key_press(key) => {}
        KeyCode::Esc => app.navigate(Route::Landing),
        KeyCode::Enter => app.start_upload(),
        KeyCode::Delete => app.start_delete(),
        KeyCode::Up => app.admin.select_previous(),
        KeyCode::Down => app.admin.select_next(),
        _ => {}
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if app.modal.is_some() || app.route != Route::Landing {
        return;
    }
    let now = Instant::now();
    let (column, row) = (mouse_event.column, mouse_event.row);

    match mouse_event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => app.pointer_moved(column, row, now),
        MouseEventKind::Down(MouseButton::Left) => app.pointer_down(column, row, now),
        MouseEventKind::ScrollUp => app.scroll_landing(-WHEEL_STEP),
        MouseEventKind::ScrollDown => app.scroll_landing(WHEEL_STEP),
        _ => {}
    }
}
