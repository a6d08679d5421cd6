//! Clipboard helper for copying text to the system clipboard
//!
//! Uses `arboard` crate for cross-platform support (Windows, macOS, Linux).
//! The clipboard is created fresh each time to avoid holding resources, and
//! the write runs on a blocking thread so the UI loop never stalls on it.

use crate::notify::{Notification, Notifier};
use crate::tooltip::timer::TimerSlot;
use anyhow::{Context, Result};
use arboard::Clipboard;
use std::future::Future;
use std::time::{Duration, Instant};

/// How long the "copied" indicator stays on
pub const COPIED_DISPLAY: Duration = Duration::from_millis(2000);

/// Copy text to the system clipboard
///
/// Returns Ok(()) on success, or an error if clipboard access fails.
/// Common failure cases: no display server (headless Linux), permission denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

/// Asynchronous "write text" operation; any error counts as failure
pub trait ClipboardWriter {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<()>> + Send;
}

/// The real system clipboard
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<()>> + Send {
        let text = text.to_string();
        async move {
            tokio::task::spawn_blocking(move || copy_to_clipboard(&text))
                .await
                .context("Clipboard task failed")?
        }
    }
}

/// Transient "copied" flag behind the copy button
#[derive(Debug, Default)]
pub struct CopyIndicator {
    copied: bool,
    revert: TimerSlot,
}

impl CopyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    /// Write `text` and update the indicator once the write resolves
    pub async fn copy<W, N>(&mut self, writer: &W, text: &str, notifier: &mut N) -> bool
    where
        W: ClipboardWriter,
        N: Notifier,
    {
        let result = writer.write_text(text).await;
        self.complete(result, Instant::now(), notifier)
    }

    /// Apply the outcome of a finished clipboard write
    ///
    /// Failure leaves the indicator exactly as it was. Returns whether the
    /// write succeeded.
    pub fn complete<N: Notifier>(&mut self, result: Result<()>, now: Instant, notifier: &mut N) -> bool {
        match result {
            Ok(()) => {
                self.copied = true;
                self.revert.arm(now, COPIED_DISPLAY);
                notifier.notify(Notification::success(
                    "Copied",
                    "Referral code copied to clipboard",
                ));
                true
            }
            Err(e) => {
                tracing::warn!("Failed to copy: {:#}", e);
                notifier.notify(Notification::failure(
                    "Error",
                    "Could not copy the referral code",
                ));
                false
            }
        }
    }

    /// Revert the flag once its display time is over
    pub fn tick(&mut self, now: Instant) {
        if self.revert.fire_if_due(now) {
            self.copied = false;
        }
    }

    /// Drop the pending revert (teardown)
    pub fn reset(&mut self) {
        self.revert.cancel();
        self.copied = false;
    }
}
