//! Tooltip timing and sizing
//!
//! Canonical policy: touch panels reset after 6 s, pointer panels hide
//! 150 ms after the pointer leaves, no hover auto-hide.

use crate::tooltip::{PanelSize, TooltipSettings};
use serde::Deserialize;
use std::time::Duration;

/// Tooltip configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipConfig {
    /// Show tooltips at all
    pub enabled: bool,
    /// Touch mode: armed panel resets after this many milliseconds
    pub auto_dismiss_ms: u64,
    /// Pointer mode: hide delay after the pointer leaves
    pub leave_debounce_ms: u64,
    /// Pointer mode: hide while hovered after this long (0 = never)
    pub hover_auto_hide_ms: u64,
    /// Rows between trigger and panel
    pub gap: u16,
    /// Width assumed before the panel is measured
    pub provisional_width: u16,
    /// Height assumed before the panel is measured
    pub provisional_height: u16,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_dismiss_ms: 6_000,
            leave_debounce_ms: 150,
            hover_auto_hide_ms: 0,
            gap: 1,
            provisional_width: 44,
            provisional_height: 12,
        }
    }
}

/// Tooltip settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileTooltip {
    pub enabled: Option<bool>,
    pub auto_dismiss_ms: Option<u64>,
    pub leave_debounce_ms: Option<u64>,
    pub hover_auto_hide_ms: Option<u64>,
    pub gap: Option<u16>,
    pub provisional_width: Option<u16>,
    pub provisional_height: Option<u16>,
}

impl TooltipConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileTooltip>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            enabled: file.enabled.unwrap_or(defaults.enabled),
            auto_dismiss_ms: file.auto_dismiss_ms.unwrap_or(defaults.auto_dismiss_ms),
            leave_debounce_ms: file.leave_debounce_ms.unwrap_or(defaults.leave_debounce_ms),
            hover_auto_hide_ms: file.hover_auto_hide_ms.unwrap_or(defaults.hover_auto_hide_ms),
            gap: file.gap.unwrap_or(defaults.gap),
            provisional_width: file
                .provisional_width
                .filter(|w| *w > 0)
                .unwrap_or(defaults.provisional_width),
            provisional_height: file
                .provisional_height
                .filter(|h| *h > 0)
                .unwrap_or(defaults.provisional_height),
        }
    }

    /// Controller settings derived from this config
    pub fn settings(&self) -> TooltipSettings {
        TooltipSettings {
            auto_dismiss: Duration::from_millis(self.auto_dismiss_ms),
            leave_debounce: Duration::from_millis(self.leave_debounce_ms),
            hover_auto_hide: (self.hover_auto_hide_ms > 0)
                .then(|| Duration::from_millis(self.hover_auto_hide_ms)),
            gap: self.gap,
            provisional_size: PanelSize::new(self.provisional_width, self.provisional_height),
        }
    }
}
