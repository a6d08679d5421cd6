//! Tooltip visibility controller
//!
//! Decides when a trigger's info panel is shown, where it goes, and when it
//! goes away. Pointer devices get hover-to-show with a leave debounce and a
//! direct click to proceed. Touch devices get tap-to-arm, tap-again-to-proceed,
//! with an auto-reset timer.
//!
//! Every handler takes the current `Instant`, first fires any due timers, then
//! reconciles with the shared registry before acting on the input. That keeps
//! the controller deterministic under test.

use super::placement::{compute_placement, PanelSize, Placement};
use super::registry::{TooltipId, TooltipRegistry};
use super::timer::TimerSlot;
use ratatui::layout::Rect;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// How the user reaches the trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    #[default]
    Pointer,
    Touch,
}

impl InteractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Pointer => "pointer",
            InteractionMode::Touch => "touch",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pointer" | "mouse" => Some(InteractionMode::Pointer),
            "touch" => Some(InteractionMode::Touch),
            _ => None,
        }
    }
}

/// Touch-mode phase between the first and the confirming tap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TapPhase {
    #[default]
    Idle,
    Armed,
}

/// What the caller should do after a handler ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipAction {
    /// Nothing observable changed
    None,
    /// Panel became visible
    Shown,
    /// Panel was hidden without proceeding
    Hidden,
    /// User confirmed; route to the proceed target
    Proceed,
}

/// Timing and sizing knobs
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipSettings {
    /// Touch mode: how long an armed panel waits for the second tap
    pub auto_dismiss: Duration,
    /// Pointer mode: delay between leaving the trigger and hiding
    pub leave_debounce: Duration,
    /// Pointer mode: optional auto-hide while hovered
    pub hover_auto_hide: Option<Duration>,
    /// Rows between trigger and panel
    pub gap: u16,
    /// Size assumed until the panel is first measured
    pub provisional_size: PanelSize,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self {
            auto_dismiss: Duration::from_secs(6),
            leave_debounce: Duration::from_millis(150),
            hover_auto_hide: None,
            gap: 1,
            provisional_size: PanelSize::new(44, 12),
        }
    }
}

/// Observable state of one controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipState {
    pub visible: bool,
    pub mode: InteractionMode,
    pub tap_phase: TapPhase,
    pub placement: Option<Placement>,
}

impl TooltipState {
    fn idle(mode: InteractionMode) -> Self {
        Self {
            visible: false,
            mode,
            tap_phase: TapPhase::Idle,
            placement: None,
        }
    }
}

pub struct TooltipController {
    id: TooltipId,
    registry: TooltipRegistry,
    settings: TooltipSettings,
    enabled: bool,
    state: TooltipState,

    trigger: Option<Rect>,
    viewport: Rect,
    panel_size: PanelSize,
    measured: bool,

    /// Touch: armed reset. Pointer: optional hover auto-hide.
    auto_dismiss: TimerSlot,
    /// Pointer: delayed hide after leave
    leave_debounce: TimerSlot,
}

impl TooltipController {
    pub fn new(registry: TooltipRegistry, mode: InteractionMode, settings: TooltipSettings) -> Self {
        let id = registry.register();
        let panel_size = settings.provisional_size;
        Self {
            id,
            registry,
            settings,
            enabled: true,
            state: TooltipState::idle(mode),
            trigger: None,
            viewport: Rect::default(),
            panel_size,
            measured: false,
            auto_dismiss: TimerSlot::new(),
            leave_debounce: TimerSlot::new(),
        }
    }

    pub fn id(&self) -> TooltipId {
        self.id
    }

    pub fn mode(&self) -> InteractionMode {
        self.state.mode
    }

    /// Visible and still owning the registry slot
    pub fn is_visible(&self) -> bool {
        self.state.visible && self.registry.is_active(self.id)
    }

    pub fn tap_phase(&self) -> TapPhase {
        if self.is_visible() {
            self.state.tap_phase
        } else {
            TapPhase::Idle
        }
    }

    pub fn placement(&self) -> Option<Placement> {
        if self.is_visible() {
            self.state.placement
        } else {
            None
        }
    }

    pub fn state(&self) -> TooltipState {
        if self.is_visible() {
            self.state
        } else {
            TooltipState::idle(self.state.mode)
        }
    }

    /// Close at once if another controller has taken the slot
    ///
    /// Handlers do this lazily; the owner of a page calls it on every other
    /// controller after one of them shows, so a displaced panel's timers are
    /// cancelled immediately rather than on its next event.
    pub fn sync(&mut self) -> bool {
        self.sync_with_registry()
    }

    pub fn has_pending_timers(&self) -> bool {
        self.auto_dismiss.is_armed() || self.leave_debounce.is_armed()
    }

    /// Turn the tooltip feature on or off; disabling closes an open panel
    pub fn set_enabled(&mut self, enabled: bool) -> TooltipAction {
        self.enabled = enabled;
        if !enabled && self.state.visible {
            return self.hide();
        }
        TooltipAction::None
    }

    // ─────────────────────────────────────────────────────────────────────
    // Layout inputs
    // ─────────────────────────────────────────────────────────────────────

    /// Feed the latest trigger box and viewport (after scroll or resize)
    ///
    /// `None` means the trigger is not on screen; an open panel keeps its last
    /// position in that case.
    pub fn update_layout(&mut self, trigger: Option<Rect>, viewport: Rect) {
        self.trigger = trigger;
        self.viewport = viewport;
        self.sync_with_registry();
        if self.state.visible {
            self.reposition();
        }
    }

    /// Record the panel's real size once it has been rendered
    pub fn on_panel_measured(&mut self, size: PanelSize) {
        if self.measured && self.panel_size == size {
            return;
        }
        self.measured = true;
        self.panel_size = size;
        if self.is_visible() {
            self.reposition();
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Interaction inputs
    // ─────────────────────────────────────────────────────────────────────

    pub fn pointer_enter(&mut self, now: Instant) -> TooltipAction {
        let expired = self.advance(now);
        if self.state.mode != InteractionMode::Pointer {
            return expired;
        }

        // Crossing back in before the debounce fires keeps the panel open
        self.leave_debounce.cancel();
        if self.state.visible {
            return expired;
        }
        self.show(now)
    }

    pub fn pointer_leave(&mut self, now: Instant) -> TooltipAction {
        let expired = self.advance(now);
        if self.state.mode != InteractionMode::Pointer || !self.state.visible {
            return expired;
        }
        self.leave_debounce.arm(now, self.settings.leave_debounce);
        TooltipAction::None
    }

    /// Pointer click on the trigger: proceed straight away
    pub fn click(&mut self, now: Instant) -> TooltipAction {
        self.advance(now);
        if self.state.mode != InteractionMode::Pointer {
            return TooltipAction::None;
        }
        if self.state.visible {
            self.hide();
        }
        TooltipAction::Proceed
    }

    /// Touch tap on the trigger: first tap arms, second tap proceeds
    pub fn tap(&mut self, now: Instant) -> TooltipAction {
        self.advance(now);
        if self.state.mode != InteractionMode::Touch {
            return TooltipAction::None;
        }

        match self.state.tap_phase {
            TapPhase::Armed if self.state.visible => {
                self.hide();
                TooltipAction::Proceed
            }
            _ => match self.show(now) {
                TooltipAction::Shown => {
                    self.state.tap_phase = TapPhase::Armed;
                    TooltipAction::Shown
                }
                other => other,
            },
        }
    }

    /// Tap or click anywhere outside the trigger and panel
    pub fn outside_tap(&mut self, now: Instant) -> TooltipAction {
        let expired = self.advance(now);
        if self.state.visible {
            return self.hide();
        }
        expired
    }

    /// Periodic timer check from the UI loop
    pub fn tick(&mut self, now: Instant) -> TooltipAction {
        self.advance(now)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────

    /// Fire due timers and drop state we no longer own
    fn advance(&mut self, now: Instant) -> TooltipAction {
        if self.sync_with_registry() {
            return TooltipAction::None;
        }
        if !self.state.visible {
            return TooltipAction::None;
        }

        if self.leave_debounce.fire_if_due(now) {
            tracing::trace!(id = self.id.get(), "tooltip hidden after pointer leave");
            return self.hide();
        }
        if self.auto_dismiss.fire_if_due(now) {
            tracing::debug!(
                id = self.id.get(),
                mode = self.state.mode.as_str(),
                "tooltip auto-dismissed"
            );
            return self.hide();
        }
        TooltipAction::None
    }

    /// Force idle if another controller took the slot. Returns true if it did.
    fn sync_with_registry(&mut self) -> bool {
        if self.state.visible && !self.registry.is_active(self.id) {
            self.reset();
            return true;
        }
        false
    }

    fn show(&mut self, now: Instant) -> TooltipAction {
        if !self.enabled {
            return TooltipAction::None;
        }
        let Some(trigger) = self.trigger else {
            // Trigger not mounted: nothing to anchor to
            return TooltipAction::None;
        };

        self.registry.activate(self.id);
        self.state.visible = true;
        self.state.tap_phase = TapPhase::Idle;
        self.state.placement = Some(compute_placement(
            trigger,
            self.viewport,
            self.panel_size,
            self.settings.gap,
        ));

        self.leave_debounce.cancel();
        match self.state.mode {
            InteractionMode::Touch => self.auto_dismiss.arm(now, self.settings.auto_dismiss),
            InteractionMode::Pointer => match self.settings.hover_auto_hide {
                Some(after) => self.auto_dismiss.arm(now, after),
                None => self.auto_dismiss.cancel(),
            },
        }
        TooltipAction::Shown
    }

    fn hide(&mut self) -> TooltipAction {
        self.registry.release(self.id);
        self.reset();
        TooltipAction::Hidden
    }

    fn reset(&mut self) {
        self.auto_dismiss.cancel();
        self.leave_debounce.cancel();
        self.state = TooltipState::idle(self.state.mode);
    }

    fn reposition(&mut self) {
        if let Some(trigger) = self.trigger {
            self.state.placement = Some(compute_placement(
                trigger,
                self.viewport,
                self.panel_size,
                self.settings.gap,
            ));
        }
    }
}

impl Drop for TooltipController {
    fn drop(&mut self) {
        self.auto_dismiss.cancel();
        self.leave_debounce.cancel();
        self.registry.release(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 40,
    };

    fn controller(registry: &TooltipRegistry, mode: InteractionMode) -> TooltipController {
        let mut c = TooltipController::new(registry.clone(), mode, TooltipSettings::default());
        c.update_layout(Some(Rect::new(40, 5, 20, 3)), VIEWPORT);
        c
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // ─── Touch mode ──────────────────────────────────────────────────────

    #[test]
    fn test_touch_first_tap_arms_and_shows() {
        let registry = TooltipRegistry::new();
        let mut c = controller(&registry, InteractionMode::Touch);
        let t0 = Instant::now();

        assert_eq!(c.tap(t0), TooltipAction::Shown);
        assert!(c.is_visible());
        assert_eq!(c.tap_phase(), TapPhase::Armed);
        assert!(c.placement().is_some());
    }

    #[test]
    fn test_touch_second_tap_proceeds_exactly_once() {
        let registry = TooltipRegistry::new();
        let mut c = controller(&registry, InteractionMode::Touch);
        let t0 = Instant::now();

        let actions = [c.tap(t0), c.tap(t0 + ms(500))];
        let proceeds = actions
            .iter()
            .filter(|a| **a == TooltipAction::Proceed)
            .count();

        assert_eq!(proceeds, 1);
        assert!(!c.is_visible());
        assert_eq!(c.tap_phase(), TapPhase::Idle);
        assert!(!c.has_pending_timers());
        assert_eq!(registry.active(), None);
    }

    #[test]
    fn test_touch_timeout_hides_without_proceed() {
        let registry = TooltipRegistry::new();
        let mut c = controller(&registry, InteractionMode::Touch);
        let t0 = Instant::now();

        c.tap(t0);
        assert_eq!(c.tick(t0 + ms(5_999)), TooltipAction::None);
        assert_eq!(c.tick(t0 + ms(6_000)), TooltipAction::Hidden);
        assert!(!c.is_visible());
    }

    #[test]
    fn test_touch_tap_after_timeout_is_fresh_first_tap() {
        let registry = TooltipRegistry::new();
        let mut c = controller(&registry, InteractionMode::Touch);
        let t0 = Instant::now();

        c.tap(t0);
        // No tick ran in between; the tap itself notices the expiry
        assert_eq!(c.tap(t0 + ms(7_000)), TooltipAction::Shown);
        assert_eq!(c.tap_phase(), TapPhase::Armed);
    }

    #[test]
    fn test_touch_outside_tap_dismisses_without_proceed() {
        let registry = TooltipRegistry::new();
        let mut c = controller(&registry, InteractionMode::Touch);
        let t0 = Instant::now();

        c.tap(t0);
        assert_eq!(c.outside_tap(t0 + ms(100)), TooltipAction::Hidden);
        assert!(!c.has_pending_timers());
        // Next tap arms again rather than proceeding
        assert_eq!(c.tap(t0 + ms(200)), TooltipAction::Shown);
    }

    #[test]
    fn test_touch_ignores_hover() {
        let registry = TooltipRegistry::new();
        let mut c = controller(&registry, InteractionMode::Touch);

        assert_eq!(c.pointer_enter(Instant::now()), TooltipAction::None);
        assert!(!c.is_visible());
    }

    // ─── Pointer mode ────────────────────────────────────────────────────

    #[test]
    fn test_pointer_hover_shows_and_leave_debounces() {
        let registry = TooltipRegistry::new();
        let mut c = controller(&registry, InteractionMode::Pointer);
        let t0 = Instant::now();

        assert_eq!(c.pointer_enter(t0), TooltipAction::Shown);
        assert_eq!(c.pointer_leave(t0 + ms(10)), TooltipAction::None);
        assert!(c.is_visible());

        assert_eq!(c.tick(t0 + ms(100)), TooltipAction::None);
        assert_eq!(c.tick(t0 + ms(160)), TooltipAction::Hidden);
        assert!(!c.is_visible());
    }

    #[test]
    fn test_pointer_reenter_cancels_pending_hide() {
        let registry = TooltipRegistry::new();
        let mut c = controller(&registry, InteractionMode::Pointer);
        let t0 = Instant::now();

        c.pointer_enter(t0);
        c.pointer_leave(t0 + ms(10));
        assert_eq!(c.pointer_enter(t0 + ms(50)), TooltipAction::None);

        assert_eq!(c.tick(t0 + ms(1_000)), TooltipAction::None);
        assert!(c.is_visible());
        assert!(!c.has_pending_timers());
    }

    #[test]
    fn test_pointer_click_proceeds_without_showing() {
        let registry = TooltipRegistry::new();
        let mut c = controller(&registry, InteractionMode::Pointer);

        assert_eq!(c.click(Instant::now()), TooltipAction::Proceed);
        assert!(!c.is_visible());
    }

    #[test]
    fn test_pointer_optional_auto_hide() {
        let registry = TooltipRegistry::new();
        let settings = TooltipSettings {
            hover_auto_hide: Some(Duration::from_secs(3)),
            ..TooltipSettings::default()
        };
        let mut c = TooltipController::new(registry, InteractionMode::Pointer, settings);
        c.update_layout(Some(Rect::new(10, 10, 8, 1)), VIEWPORT);
        let t0 = Instant::now();

        c.pointer_enter(t0);
        assert_eq!(c.tick(t0 + ms(3_000)), TooltipAction::Hidden);
    }

    // ─── Mounting, enabling, placement ───────────────────────────────────

    #[test]
    fn test_unmounted_trigger_never_shows() {
        let registry = TooltipRegistry::new();
        let mut c = TooltipController::new(
            registry.clone(),
            InteractionMode::Touch,
            TooltipSettings::default(),
        );

        assert_eq!(c.tap(Instant::now()), TooltipAction::None);
        assert!(!c.is_visible());
        assert_eq!(registry.active(), None);
    }

    #[test]
    fn test_disabled_controller_never_shows() {
        let registry = TooltipRegistry::new();
        let mut c = controller(&registry, InteractionMode::Pointer);
        let t0 = Instant::now();

        c.pointer_enter(t0);
        assert_eq!(c.set_enabled(false), TooltipAction::Hidden);
        assert_eq!(c.pointer_enter(t0 + ms(10)), TooltipAction::None);
        assert!(!c.is_visible());
    }

    #[test]
    fn test_scroll_repositions_visible_panel() {
        let registry = TooltipRegistry::new();
        let mut c = controller(&registry, InteractionMode::Pointer);
        c.pointer_enter(Instant::now());
        let before = c.placement().unwrap();

        c.update_layout(Some(Rect::new(40, 2, 20, 3)), VIEWPORT);
        let after = c.placement().unwrap();

        assert_eq!(after.area.y + 3, before.area.y);
    }

    #[test]
    fn test_unmount_while_visible_keeps_last_position() {
        let registry = TooltipRegistry::new();
        let mut c = controller(&registry, InteractionMode::Pointer);
        c.pointer_enter(Instant::now());
        let before = c.placement();

        c.update_layout(None, VIEWPORT);
        assert!(c.is_visible());
        assert_eq!(c.placement(), before);
    }

    #[test]
    fn test_measured_size_replaces_provisional() {
        let registry = TooltipRegistry::new();
        let mut c = controller(&registry, InteractionMode::Pointer);
        c.pointer_enter(Instant::now());
        assert_eq!(c.placement().unwrap().area.width, 44);

        c.on_panel_measured(PanelSize::new(30, 8));
        let placement = c.placement().unwrap();
        assert_eq!(placement.area.width, 30);
        assert_eq!(placement.area.height, 8);
    }

    // ─── Cross-instance exclusion ────────────────────────────────────────

    #[test]
    fn test_showing_one_closes_the_other() {
        let registry = TooltipRegistry::new();
        let mut a = controller(&registry, InteractionMode::Touch);
        let mut b = controller(&registry, InteractionMode::Touch);
        let t0 = Instant::now();

        a.tap(t0);
        assert!(a.is_visible());

        b.tap(t0 + ms(100));
        assert!(b.is_visible());
        assert!(!a.is_visible());

        assert!(a.sync());
        assert!(!a.has_pending_timers());
        assert!(!b.sync());
        assert!(b.has_pending_timers());

        // The stale auto-dismiss of `a` must not fire after it was forced closed
        assert_eq!(a.tick(t0 + ms(10_000)), TooltipAction::None);

        // A tap on `a` starts over instead of proceeding
        assert_eq!(a.tap(t0 + ms(10_100)), TooltipAction::Shown);
        assert!(!b.is_visible());
    }

    #[test]
    fn test_forced_close_does_not_release_new_owner() {
        let registry = TooltipRegistry::new();
        let mut a = controller(&registry, InteractionMode::Pointer);
        let mut b = controller(&registry, InteractionMode::Pointer);
        let t0 = Instant::now();

        a.pointer_enter(t0);
        a.pointer_leave(t0 + ms(10));
        b.pointer_enter(t0 + ms(20));

        a.tick(t0 + ms(500));
        assert_eq!(registry.active(), Some(b.id()));
    }

    #[test]
    fn test_drop_releases_slot() {
        let registry = TooltipRegistry::new();
        {
            let mut c = controller(&registry, InteractionMode::Pointer);
            c.pointer_enter(Instant::now());
            assert!(registry.active().is_some());
        }
        assert_eq!(registry.active(), None);
    }
}
