//! Toast notification component
//!
//! Non-blocking overlays that auto-dismiss after a fixed duration. They stack
//! upward from the bottom-right corner on top of all other content.

use crate::notify::{Notification, Notifier, Variant};
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// How long a toast stays up
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Toasts beyond this are dropped oldest-first
const MAX_TOASTS: usize = 3;

/// A toast notification that auto-dismisses
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    /// When the toast was created
    created_at: Instant,
}

impl Toast {
    pub fn new(notification: Notification, now: Instant) -> Self {
        Self {
            notification,
            created_at: now,
        }
    }

    /// Check if the toast has expired and should be removed
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= TOAST_DURATION
    }

    fn width(&self) -> u16 {
        let title = self.notification.title.width();
        let body = self.notification.description.width();
        // 2 for borders, 2 for padding
        (title.max(body) + 4).min(u16::MAX as usize) as u16
    }

    /// Render at `area`, clearing what is underneath first
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let color = match self.notification.variant {
            Variant::Default => theme.success,
            Variant::Destructive => theme.error,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme.panel_bg));

        let text = vec![
            Line::from(Span::styled(
                format!(" {}", self.notification.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" {}", self.notification.description),
                Style::default().fg(theme.fg),
            )),
        ];

        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: false }).block(block),
            area,
        );
    }
}

/// Pending toasts, newest last
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_at(&mut self, notification: Notification, now: Instant) {
        if self.toasts.len() >= MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast::new(notification, now));
    }

    /// Drop expired toasts
    pub fn tick(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.is_expired(now));
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.toasts.back().map(|t| &t.notification)
    }

    /// Stack toasts upward from the bottom-right corner of `area`
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let height = 4;
        let mut bottom = area.bottom().saturating_sub(1);

        for toast in self.toasts.iter().rev() {
            if bottom < area.y + height {
                break;
            }
            let width = toast.width().min(area.width.saturating_sub(2)).max(12);
            let x = area.right().saturating_sub(width + 2).max(area.x);
            let toast_area = Rect::new(x, bottom - height, width.min(area.width), height);
            toast.render(f, toast_area, theme);
            bottom -= height;
        }
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, notification: Notification) {
        self.push_at(notification, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire_on_tick() {
        let mut queue = ToastQueue::new();
        let t0 = Instant::now();
        queue.push_at(Notification::success("Copied", "done"), t0);

        queue.tick(t0 + Duration::from_secs(1));
        assert_eq!(queue.len(), 1);

        queue.tick(t0 + TOAST_DURATION);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_keeps_newest() {
        let mut queue = ToastQueue::new();
        let t0 = Instant::now();
        for i in 0..5 {
            queue.push_at(Notification::failure("Error", format!("#{i}")), t0);
        }
        assert_eq!(queue.len(), MAX_TOASTS);
        assert_eq!(queue.latest().unwrap().description, "#4");
    }
}
